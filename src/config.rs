//! Pipeline configuration
//!
//! Groups the geometry, output and border settings, with builder-style
//! setters for library callers and a TOML loader for the command line.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{BorderSpec, GeometryConfig};
use crate::renderer::SvgConfig;

/// Errors that can occur when loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Configuration for the complete outline pipeline
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutlineConfig {
    pub geometry: GeometryConfig,
    pub svg: SvgConfig,
    /// Border used when the caller does not supply one
    pub border: BorderSpec,
    /// Report geometric failures instead of falling back to a frame
    pub strict: bool,
}

/// TOML structure for deserializing configuration
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    border: Option<TomlBorder>,
    geometry: Option<TomlGeometry>,
    output: Option<TomlOutput>,
    pipeline: Option<TomlPipeline>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlBorder {
    width: Option<f64>,
    color: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlGeometry {
    safety_margin: Option<f64>,
    flatten_tolerance: Option<f64>,
    min_area: Option<f64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlOutput {
    ring_stroke_width: Option<f64>,
    id_prefix: Option<String>,
    pretty_print: Option<bool>,
    standalone: Option<bool>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlPipeline {
    strict: Option<bool>,
}

/// Every key with its default value
pub const DEFAULT_CONFIG: &str = r##"
[border]
width = 10.0
color = "#000000"

[geometry]
safety_margin = 2.0
flatten_tolerance = 0.05
min_area = 1e-6

[output]
ring_stroke_width = 2.0
id_prefix = "svg-outline-"
pretty_print = true
standalone = false

[pipeline]
strict = false
"##;

impl OutlineConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the geometry configuration
    pub fn with_geometry(mut self, config: GeometryConfig) -> Self {
        self.geometry = config;
        self
    }

    /// Set the SVG output configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the default border
    pub fn with_border(mut self, border: BorderSpec) -> Self {
        self.border = border;
        self
    }

    /// Enable or disable strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from TOML string; omitted keys keep their defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(border) = parsed.border {
            if let Some(width) = border.width {
                config.border.width = width;
            }
            if let Some(color) = border.color {
                config.border.color = color;
            }
        }
        if let Some(geometry) = parsed.geometry {
            if let Some(margin) = geometry.safety_margin {
                config.geometry.safety_margin = margin;
            }
            if let Some(tolerance) = geometry.flatten_tolerance {
                config.geometry.flatten_tolerance = tolerance;
            }
            if let Some(min_area) = geometry.min_area {
                config.geometry.min_area = min_area;
            }
        }
        if let Some(output) = parsed.output {
            if let Some(width) = output.ring_stroke_width {
                config.svg.ring_stroke_width = width;
            }
            if let Some(prefix) = output.id_prefix {
                config.svg.id_prefix = prefix;
            }
            if let Some(pretty) = output.pretty_print {
                config.svg.pretty_print = pretty;
            }
            if let Some(standalone) = output.standalone {
                config.svg.standalone = standalone;
            }
        }
        if let Some(pipeline) = parsed.pipeline {
            if let Some(strict) = pipeline.strict {
                config.strict = strict;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that numeric settings are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("border.width", self.border.width),
            ("geometry.safety_margin", self.geometry.safety_margin),
            ("geometry.min_area", self.geometry.min_area),
            ("output.ring_stroke_width", self.svg.ring_stroke_width),
        ];
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("expected a finite number >= 0, got {value}"),
                });
            }
        }
        let tolerance = self.geometry.flatten_tolerance;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "geometry.flatten_tolerance".to_string(),
                reason: format!("expected a finite number > 0, got {tolerance}"),
            });
        }
        Ok(())
    }
}
