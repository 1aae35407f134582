//! Configuration for the geometry stages

/// Tolerances and margins used by extraction, offsetting and canvas fitting
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryConfig {
    /// Padding added on every side of the fitted canvas
    pub safety_margin: f64,

    /// Maximum deviation when flattening curves to polygons
    pub flatten_tolerance: f64,

    /// Areas at or below this are treated as empty
    pub min_area: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            safety_margin: 2.0,
            flatten_tolerance: 0.05,
            min_area: 1e-6,
        }
    }
}

impl GeometryConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas safety margin
    pub fn with_safety_margin(mut self, margin: f64) -> Self {
        self.safety_margin = margin;
        self
    }

    /// Set the curve flattening tolerance
    pub fn with_flatten_tolerance(mut self, tolerance: f64) -> Self {
        self.flatten_tolerance = tolerance;
        self
    }

    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area;
        self
    }
}
