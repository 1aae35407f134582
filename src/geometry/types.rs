//! Core types for the geometry stages

use geo::{Area, MultiLineString, MultiPolygon, Rect};
use kurbo::{BezPath, PathEl};

use super::error::GeometryError;

/// A 2D point in document user space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box, always derived fresh from the geometry it describes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Bounds::new(rect.min().x, rect.min().y, rect.width(), rect.height())
    }
}

/// Winding rule used to interpret overlapping subpaths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// One extracted vector path in document user space
#[derive(Debug, Clone, PartialEq)]
pub struct PathGeometry {
    pub path: BezPath,
    pub fill_rule: FillRule,
    /// Path has a fill paint; open subpaths close implicitly
    pub filled: bool,
    pub stroked: bool,
}

impl PathGeometry {
    pub fn new(path: BezPath) -> Self {
        Self {
            path,
            fill_rule: FillRule::NonZero,
            filled: true,
            stroked: false,
        }
    }

    pub fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.fill_rule = rule;
        self
    }

    pub fn with_paint(mut self, filled: bool, stroked: bool) -> Self {
        self.filled = filled;
        self.stroked = stroked;
        self
    }

    /// True when no coordinate is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.path.elements().iter().all(|el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => p.is_finite(),
            PathEl::QuadTo(a, b) => a.is_finite() && b.is_finite(),
            PathEl::CurveTo(a, b, c) => a.is_finite() && b.is_finite() && c.is_finite(),
            PathEl::ClosePath => true,
        })
    }
}

/// A silhouette: closed areas plus open polylines treated as one shape
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundShape {
    pub area: MultiPolygon<f64>,
    pub lines: MultiLineString<f64>,
}

impl CompoundShape {
    pub fn new(area: MultiPolygon<f64>, lines: MultiLineString<f64>) -> Self {
        Self { area, lines }
    }

    pub fn is_empty(&self) -> bool {
        self.area.0.is_empty() && self.lines.0.iter().all(|line| line.0.len() < 2)
    }

    /// Total enclosed area
    pub fn area(&self) -> f64 {
        self.area.unsigned_area()
    }

    pub fn has_area(&self, min_area: f64) -> bool {
        self.area() > min_area
    }
}

impl Default for CompoundShape {
    fn default() -> Self {
        Self::new(MultiPolygon::new(vec![]), MultiLineString::new(vec![]))
    }
}

/// Requested outline width and color
#[derive(Debug, Clone, PartialEq)]
pub struct BorderSpec {
    pub width: f64,
    pub color: String,
}

impl BorderSpec {
    pub fn new(width: f64, color: impl Into<String>) -> Self {
        Self {
            width,
            color: color.into(),
        }
    }

    /// Reject negative or non-finite widths
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.width.is_finite() && self.width >= 0.0 {
            Ok(())
        } else {
            Err(GeometryError::InvalidWidth(self.width))
        }
    }
}

impl Default for BorderSpec {
    fn default() -> Self {
        Self::new(crate::DEFAULT_BORDER_WIDTH, crate::DEFAULT_BORDER_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, Polygon};

    fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
        polygon![
            (x: x, y: y),
            (x: x + size, y: y),
            (x: x + size, y: y + size),
            (x: x, y: y + size),
        ]
    }

    #[test]
    fn test_bounds_edges() {
        let b = Bounds::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(b.right(), 110.0);
        assert_eq!(b.bottom(), 70.0);
        assert!(b.is_finite());
        assert!(!Bounds::new(f64::NAN, 0.0, 1.0, 1.0).is_finite());
    }

    #[test]
    fn test_bounds_from_rect() {
        let rect = Rect::new((-2.0, 3.0), (8.0, 7.0));
        assert_eq!(Bounds::from(rect), Bounds::new(-2.0, 3.0, 10.0, 4.0));
    }

    #[test]
    fn test_path_is_finite() {
        let square = PathGeometry::new(BezPath::from_svg("M0 0 L10 0 L10 10 Z").unwrap());
        assert!(square.is_finite());

        let mut bad = BezPath::new();
        bad.move_to((f64::NAN, 0.0));
        bad.line_to((1.0, 1.0));
        assert!(!PathGeometry::new(bad).is_finite());
    }

    #[test]
    fn test_compound_shape_area() {
        let shape = CompoundShape::new(
            MultiPolygon::new(vec![square(0.0, 0.0, 10.0)]),
            MultiLineString::new(vec![]),
        );
        assert_eq!(shape.area(), 100.0);
        assert!(shape.has_area(1e-6));
        assert!(!shape.is_empty());
        assert!(CompoundShape::default().is_empty());
        assert!(!CompoundShape::default().has_area(0.0));
    }

    #[test]
    fn test_border_spec_validate() {
        assert!(BorderSpec::new(0.0, "red").validate().is_ok());
        assert!(BorderSpec::new(10.0, "red").validate().is_ok());
        assert!(BorderSpec::new(-1.0, "red").validate().is_err());
        assert!(BorderSpec::new(f64::NAN, "red").validate().is_err());
        assert_eq!(BorderSpec::default(), BorderSpec::new(10.0, "#000000"));
    }
}
