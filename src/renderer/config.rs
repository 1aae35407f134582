//! Configuration for SVG output

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Stroke width of the outline ring path
    pub ring_stroke_width: f64,

    /// Prefix for element ids (e.g., "svg-outline-" for "svg-outline-ring")
    pub id_prefix: String,

    /// Whether to format composed output with indentation
    pub pretty_print: bool,

    /// Whether to emit an XML declaration before the root
    pub standalone: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            ring_stroke_width: 2.0,
            id_prefix: "svg-outline-".to_string(),
            pretty_print: true,
            standalone: false,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ring stroke width
    pub fn with_ring_stroke_width(mut self, width: f64) -> Self {
        self.ring_stroke_width = width;
        self
    }

    /// Set the element id prefix
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set whether output carries an XML declaration
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Full id for a generated element (`ring`, `artwork`, `border`, `original`)
    pub fn id(&self, name: &str) -> String {
        format!("{}{}", self.id_prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SvgConfig::default();
        assert_eq!(config.ring_stroke_width, 2.0);
        assert_eq!(config.id_prefix, "svg-outline-");
        assert!(config.pretty_print);
        assert!(!config.standalone);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SvgConfig::new()
            .with_ring_stroke_width(3.5)
            .with_id_prefix("x-")
            .with_pretty_print(false)
            .with_standalone(true);

        assert_eq!(config.ring_stroke_width, 3.5);
        assert_eq!(config.id("ring"), "x-ring");
        assert!(!config.pretty_print);
        assert!(config.standalone);
    }
}
