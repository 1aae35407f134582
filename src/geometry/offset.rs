//! Outward offset of a silhouette

use geo::{Area, MultiPolygon};

use super::engine::ShapeEngine;
use super::error::GeometryError;
use super::types::CompoundShape;

/// Grow `shape` outward by `width` with round joins and caps.
///
/// Fails when the width is negative or non-finite, when the shape is empty,
/// or when the buffered result has no area.
pub fn offset_shape<E: ShapeEngine>(
    engine: &mut E,
    shape: &CompoundShape,
    width: f64,
    min_area: f64,
) -> Result<MultiPolygon<f64>, GeometryError> {
    if !width.is_finite() || width < 0.0 {
        return Err(GeometryError::InvalidWidth(width));
    }
    if shape.is_empty() {
        return Err(GeometryError::EmptyShape);
    }

    let grown = engine.offset(shape, width);
    let area = grown.unsigned_area();
    if !area.is_finite() || area <= min_area {
        return Err(GeometryError::no_outer_boundary(width));
    }
    log::debug!("offset by {width}: {} polygon(s), area {area:.3}", grown.0.len());
    Ok(grown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::engine::GeoEngine;
    use crate::geometry::types::PathGeometry;
    use geo::BoundingRect;
    use kurbo::BezPath;

    fn shape(engine: &mut GeoEngine, d: &str) -> CompoundShape {
        engine.to_shape(&PathGeometry::new(BezPath::from_svg(d).unwrap()))
    }

    #[test]
    fn test_offset_expands_bounds() {
        let mut engine = GeoEngine::default();
        let square = shape(&mut engine, "M0 0 L24 0 L24 24 L0 24 Z");
        let grown = offset_shape(&mut engine, &square, 10.0, 1e-6).unwrap();
        let rect = grown.bounding_rect().unwrap();
        assert!((rect.min().x + 10.0).abs() < 0.05);
        assert!((rect.min().y + 10.0).abs() < 0.05);
        assert!((rect.max().x - 34.0).abs() < 0.05);
        assert!((rect.max().y - 34.0).abs() < 0.05);
    }

    #[test]
    fn test_rounded_corners() {
        let mut engine = GeoEngine::default();
        let square = shape(&mut engine, "M0 0 L24 0 L24 24 L0 24 Z");
        let grown = offset_shape(&mut engine, &square, 10.0, 1e-6).unwrap();
        // Mitred corners would give 44*44; round joins cut four corners
        let mitred = 44.0 * 44.0;
        let rounded = 24.0 * 24.0 + 4.0 * 24.0 * 10.0 + std::f64::consts::PI * 100.0;
        let area = grown.unsigned_area();
        assert!(area < mitred);
        assert!((area - rounded).abs() / rounded < 0.03);
    }

    #[test]
    fn test_rejects_bad_width() {
        let mut engine = GeoEngine::default();
        let square = shape(&mut engine, "M0 0 L1 0 L1 1 Z");
        assert_eq!(
            offset_shape(&mut engine, &square, -1.0, 1e-6),
            Err(GeometryError::InvalidWidth(-1.0))
        );
        assert!(matches!(
            offset_shape(&mut engine, &square, f64::INFINITY, 1e-6),
            Err(GeometryError::InvalidWidth(_))
        ));
    }

    #[test]
    fn test_empty_shape_fails() {
        let mut engine = GeoEngine::default();
        assert_eq!(
            offset_shape(&mut engine, &CompoundShape::default(), 5.0, 1e-6),
            Err(GeometryError::EmptyShape)
        );
    }

    #[test]
    fn test_zero_width_line_has_no_boundary() {
        let mut engine = GeoEngine::default();
        let line = engine.to_shape(
            &PathGeometry::new(BezPath::from_svg("M0 0 L10 0").unwrap()).with_paint(false, true),
        );
        assert_eq!(
            offset_shape(&mut engine, &line, 0.0, 1e-6),
            Err(GeometryError::no_outer_boundary(0.0))
        );
    }
}
