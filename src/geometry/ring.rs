//! Ring resolution: keep only the band between silhouette and offset

use geo::{Area, MultiPolygon};

use super::engine::ShapeEngine;
use super::error::GeometryError;
use super::types::CompoundShape;

/// `offset - original`.
///
/// Line-only artwork has no area to remove, so the offset itself is the
/// ring. An empty or sliver-sized result is an [`GeometryError::EmptyRing`].
pub fn resolve_ring<E: ShapeEngine>(
    engine: &mut E,
    offset: &MultiPolygon<f64>,
    original: &CompoundShape,
    min_area: f64,
) -> Result<MultiPolygon<f64>, GeometryError> {
    let ring = if original.has_area(min_area) {
        engine.subtract(offset, &original.area)
    } else {
        offset.clone()
    };

    let area = ring.unsigned_area();
    if !area.is_finite() || area <= min_area {
        return Err(GeometryError::empty_ring(area));
    }
    log::debug!("ring: {} polygon(s), area {area:.3}", ring.0.len());
    Ok(ring)
}
