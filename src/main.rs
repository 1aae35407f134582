//! SVG Outline CLI
//!
//! Usage:
//!   svg-outline [OPTIONS] [FILE]
//!
//! Options:
//!   -w, --width <WIDTH>    Border width
//!   -c, --color <COLOR>    Border color
//!   --config <FILE>        Configuration file (TOML format)
//!   -o, --output <FILE>    Write the result to a file instead of stdout
//!   --strict               Report geometric failures instead of framing
//!   --sanitize-only        Only strip scripts from the input
//!   -v, --verbose          Log each pipeline stage
//!   -h, --help             Print help

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use svg_outline::{sanitize, BorderSpec, OutlineConfig, OutlineContext, OutlineError};

#[derive(Parser)]
#[command(name = "svg-outline")]
#[command(about = "Surround SVG artwork with an offset outline")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Border width in document units
    #[arg(short, long)]
    width: Option<f64>,

    /// Border color (any SVG color string)
    #[arg(short, long)]
    color: Option<String>,

    /// Configuration file (TOML format)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail on geometric errors instead of falling back to a border frame
    #[arg(long)]
    strict: bool,

    /// Only sanitize the input
    #[arg(long)]
    sanitize_only: bool,

    /// Log each pipeline stage to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Warning: could not install logger: {}", e);
    }

    // Load configuration
    let mut config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            let path = cli.config.as_deref().unwrap_or(Path::new(""));
            eprint!("{}", e.format("", &path.display().to_string()));
            std::process::exit(1);
        }
    };
    if cli.strict {
        config.strict = true;
    }

    // Read input
    let filename = cli
        .input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());
    let source = match &cli.input {
        Some(path) => match fs::read(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = Vec::new();
            match io::stdin().read_to_end(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let result = if cli.sanitize_only {
        Ok(sanitize(&source))
    } else {
        let border = BorderSpec::new(
            cli.width.unwrap_or(config.border.width),
            cli.color.clone().unwrap_or_else(|| config.border.color.clone()),
        );
        let mut ctx = OutlineContext::new(config);
        let result = ctx.process(&source, &border);
        if let Some(reason) = ctx.last_report().fallback {
            log::info!("framed instead of outlined: {}", reason);
        }
        result
    };

    match result {
        Ok(svg) => write_output(cli.output.as_ref(), &svg),
        Err(e) => {
            report_error(&e, &source, &filename);
            std::process::exit(1);
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<OutlineConfig, OutlineError> {
    match path {
        Some(path) => Ok(OutlineConfig::from_file(path)?),
        None => Ok(OutlineConfig::default()),
    }
}

fn write_output(path: Option<&PathBuf>, svg: &str) {
    match path {
        Some(path) => {
            if let Err(e) = fs::write(path, svg) {
                eprintln!("Error writing file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => print!("{}", svg),
    }
}

fn report_error(err: &OutlineError, source: &[u8], filename: &str) {
    match std::str::from_utf8(source) {
        // Spans point into the sanitized text
        Ok(text) => eprint!("{}", err.format(&sanitize(text), filename)),
        Err(_) => eprintln!("Error: {}", err),
    }
}
