//! Canvas fitting: enlarge the document just enough to hold the ring

use super::types::Bounds;
use crate::document::ViewBox;

/// The enlarged canvas and the padding added on each side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFit {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
    pub view_box: ViewBox,
}

/// Fit a canvas around `ring` for artwork occupying `(0, 0, width, height)`.
///
/// Each side gets the ring's overflow beyond the original canvas (if any)
/// plus `margin`. The artwork keeps its coordinates; the viewBox origin moves
/// to `(-left, -top)`.
pub fn fit_canvas(ring: &Bounds, width: f64, height: f64, margin: f64) -> CanvasFit {
    let left = (-ring.x).max(0.0) + margin;
    let top = (-ring.y).max(0.0) + margin;
    let right = (ring.right() - width).max(0.0) + margin;
    let bottom = (ring.bottom() - height).max(0.0) + margin;

    let new_width = width + left + right;
    let new_height = height + top + bottom;

    CanvasFit {
        left,
        top,
        right,
        bottom,
        width: new_width,
        height: new_height,
        view_box: ViewBox::new(-left, -top, new_width, new_height),
    }
}
