//! Error types for the geometry stages

use thiserror::Error;

/// Errors that can occur while offsetting and resolving the outline ring
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// Nothing to offset
    #[error("shape is empty or degenerate")]
    EmptyShape,

    /// Border width is negative, NaN or infinite
    #[error("invalid border width {0}")]
    InvalidWidth(f64),

    /// Buffering produced no area
    #[error("offset by {width} produced no outer boundary")]
    NoOuterBoundary { width: f64 },

    /// Every union step collapsed
    #[error("union of extracted paths produced no shape")]
    DegenerateUnion,

    /// Subtraction left nothing (or only slivers)
    #[error("ring subtraction left area {area}")]
    EmptyRing { area: f64 },
}

impl GeometryError {
    /// Create an offset failure for the given width
    pub fn no_outer_boundary(width: f64) -> Self {
        Self::NoOuterBoundary { width }
    }

    /// Create an empty-ring failure
    pub fn empty_ring(area: f64) -> Self {
        Self::EmptyRing { area }
    }
}
