//! SVG Outline - surround vector artwork with a clean offset outline
//!
//! This library extracts the paths of an SVG document, unifies them into one
//! silhouette, offsets it outward and emits a new document with the outline
//! ring drawn behind the untouched original. Documents that cannot be
//! outlined (embedded rasters, text only, degenerate geometry) get a rounded
//! border frame instead.
//!
//! # Example
//!
//! ```rust
//! use svg_outline::process;
//!
//! let svg = process(
//!     r#"<svg width="24" height="24"><path d="M0 0 L24 0 L24 24 L0 24 Z"/></svg>"#,
//!     10.0,
//!     "#ff0000",
//! );
//! assert!(svg.contains(r##"stroke="#ff0000""##));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod renderer;
pub mod sanitize;

pub use config::{ConfigError, OutlineConfig};
pub use document::{Document, ViewBox};
pub use error::{BooleanStage, ErrorKind, OutlineError};
pub use geometry::{BorderSpec, GeoEngine, GeometryConfig, GeometryError, ShapeEngine};
pub use pipeline::{FallbackReason, FallbackStats, OutlineContext, ProcessReport};
pub use renderer::SvgConfig;
pub use sanitize::sanitize;

/// Border width used when none is given
pub const DEFAULT_BORDER_WIDTH: f64 = 10.0;

/// Border color used when none is given
pub const DEFAULT_BORDER_COLOR: &str = "#000000";

/// Outline a document, never failing.
///
/// On any surfaced error the sanitized input is returned unchanged (empty
/// for input that is not UTF-8).
///
/// # Example
///
/// ```rust
/// use svg_outline::process;
///
/// assert_eq!(process("not svg", 10.0, "#000"), "not svg");
/// ```
pub fn process(input: impl AsRef<[u8]>, border_width: f64, border_color: &str) -> String {
    let input = input.as_ref();
    match try_process(input, border_width, border_color) {
        Ok(svg) => svg,
        Err(err) => {
            log::warn!("returning input unchanged: {err}");
            sanitize(input)
        }
    }
}

/// Outline a document with default configuration.
///
/// Geometric failures fall back to the border frame; only
/// [`ErrorKind::InvalidInput`] and [`ErrorKind::FallbackFailure`] surface.
///
/// # Example
///
/// ```rust
/// use svg_outline::{try_process, ErrorKind};
///
/// let err = try_process("<html/>", 10.0, "#000").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::InvalidInput);
/// ```
pub fn try_process(
    input: impl AsRef<[u8]>,
    border_width: f64,
    border_color: &str,
) -> Result<String, OutlineError> {
    process_with_config(
        input,
        BorderSpec::new(border_width, border_color),
        OutlineConfig::default(),
    )
}

/// Outline a document with custom configuration
///
/// # Example
///
/// ```rust
/// use svg_outline::{process_with_config, BorderSpec, OutlineConfig, SvgConfig};
///
/// let config = OutlineConfig::new()
///     .with_svg(SvgConfig::default().with_pretty_print(false).with_id_prefix("logo-"));
///
/// let svg = process_with_config(
///     r#"<svg width="10" height="10"><circle cx="5" cy="5" r="5"/></svg>"#,
///     BorderSpec::new(2.0, "navy"),
///     config,
/// )
/// .unwrap();
/// assert!(svg.contains(r#"id="logo-ring""#));
/// ```
pub fn process_with_config(
    input: impl AsRef<[u8]>,
    border: BorderSpec,
    config: OutlineConfig,
) -> Result<String, OutlineError> {
    OutlineContext::new(config).process(input, &border)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"<svg width="24" height="24"><path d="M0 0 L24 0 L24 24 L0 24 Z"/></svg>"#;

    #[test]
    fn test_process_outlines() {
        let svg = process(SQUARE, 10.0, "#ff0000");
        assert!(svg.contains(r#"<g id="svg-outline-ring">"#));
        assert!(svg.contains(r#"<svg id="svg-outline-artwork""#));
        assert!(svg.contains(r#"<path d="M0 0 L24 0 L24 24 L0 24 Z"/>"#));
    }

    #[test]
    fn test_process_returns_input_on_error() {
        assert_eq!(process("<html></html>", 10.0, "#000"), "<html></html>");
        assert_eq!(process([0xffu8], 10.0, "#000"), "");
        assert_eq!(
            process("<p><script>x()</script></p>", 10.0, "#000"),
            "<p></p>"
        );
    }

    #[test]
    fn test_process_rejects_negative_width() {
        assert_eq!(process(SQUARE, -5.0, "#000"), SQUARE);
        let err = try_process(SQUARE, f64::NAN, "#000").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_try_process_falls_back_for_text() {
        let svg = try_process("<svg><text>hi</text></svg>", 3.0, "#000").unwrap();
        assert!(svg.contains(r#"<g id="svg-outline-border">"#));
        assert!(svg.contains(r#"<g id="svg-outline-original"><text>hi</text></g>"#));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_BORDER_WIDTH, 10.0);
        assert_eq!(DEFAULT_BORDER_COLOR, "#000000");
        assert_eq!(BorderSpec::default().width, DEFAULT_BORDER_WIDTH);
    }
}
