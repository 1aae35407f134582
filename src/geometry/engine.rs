//! Boolean and offset operations behind a swappable engine
//!
//! The pipeline only talks to [`ShapeEngine`]. [`GeoEngine`] implements it on
//! top of the `geo` crate: curves are flattened with `kurbo`, closed subpaths
//! become polygons and open ones polylines.

use geo::{Area, BooleanOps, Buffer, Coord, LineString, MultiLineString, MultiPolygon, Polygon};
use kurbo::PathEl;

use super::types::{CompoundShape, FillRule, PathGeometry};

/// Polygon operations needed to build an outline ring
pub trait ShapeEngine {
    /// Convert one path into a shape, honoring its fill rule
    fn to_shape(&mut self, path: &PathGeometry) -> CompoundShape;

    /// Union of two shapes; open polylines are carried along unchanged
    fn union(&mut self, a: &CompoundShape, b: &CompoundShape) -> CompoundShape;

    /// Grow a shape outward by `distance` with round joins and caps
    fn offset(&mut self, shape: &CompoundShape, distance: f64) -> MultiPolygon<f64>;

    /// `a` minus `b`
    fn subtract(&mut self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> MultiPolygon<f64>;

    /// Drop any per-call scratch state
    fn reset(&mut self);
}

/// [`ShapeEngine`] backed by `geo`
#[derive(Debug, Clone)]
pub struct GeoEngine {
    tolerance: f64,
    rings: Vec<Polygon<f64>>,
    polylines: Vec<LineString<f64>>,
}

impl Default for GeoEngine {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl GeoEngine {
    /// Create an engine flattening curves to within `tolerance`
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            rings: Vec::new(),
            polylines: Vec::new(),
        }
    }

    /// Split a path into closed rings and open polylines
    fn flatten_into_scratch(&mut self, path: &PathGeometry) {
        let mut current: Vec<Coord<f64>> = Vec::new();
        let mut subpaths: Vec<(Vec<Coord<f64>>, bool)> = Vec::new();

        kurbo::flatten(path.path.iter(), self.tolerance, |el| match el {
            PathEl::MoveTo(p) => {
                if !current.is_empty() {
                    subpaths.push((std::mem::take(&mut current), false));
                }
                current.push(Coord { x: p.x, y: p.y });
            }
            PathEl::LineTo(p) => {
                let next = Coord { x: p.x, y: p.y };
                if current.last() != Some(&next) {
                    current.push(next);
                }
            }
            PathEl::ClosePath => {
                if !current.is_empty() {
                    let start = current[0];
                    subpaths.push((std::mem::take(&mut current), true));
                    // Drawing may continue from the subpath start without a MoveTo
                    current.push(start);
                }
            }
            _ => {}
        });
        if current.len() > 1 {
            subpaths.push((current, false));
        }

        for (mut coords, closed) in subpaths {
            if coords.len() > 1 && coords.first() == coords.last() {
                coords.pop();
            }
            let as_ring = (closed || path.filled) && coords.len() >= 3;
            if as_ring {
                let ring = Polygon::new(LineString::from(coords), vec![]);
                if ring.unsigned_area() > 0.0 {
                    self.rings.push(ring);
                    continue;
                }
                // Zero-area ring: keep its extent as a line
                let mut line = ring.exterior().clone();
                line.0.dedup();
                self.polylines.push(line);
            } else if coords.len() >= 2 {
                if closed {
                    let start = coords[0];
                    coords.push(start);
                }
                self.polylines.push(LineString::from(coords));
            }
        }
    }
}

impl ShapeEngine for GeoEngine {
    fn to_shape(&mut self, path: &PathGeometry) -> CompoundShape {
        self.reset();
        self.flatten_into_scratch(path);

        let mixed_winding = {
            let mut signs = self.rings.iter().map(|ring| ring.signed_area() > 0.0);
            match signs.next() {
                Some(first) => signs.any(|s| s != first),
                None => false,
            }
        };
        let combine_xor = path.fill_rule == FillRule::EvenOdd || mixed_winding;

        let mut area: Option<MultiPolygon<f64>> = None;
        for ring in self.rings.drain(..) {
            let ring = MultiPolygon::new(vec![ring]);
            area = Some(match area {
                None => ring,
                Some(acc) if combine_xor => acc.xor(&ring),
                Some(acc) => acc.union(&ring),
            });
        }

        CompoundShape::new(
            area.unwrap_or_else(|| MultiPolygon::new(vec![])),
            MultiLineString::new(self.polylines.drain(..).collect()),
        )
    }

    fn union(&mut self, a: &CompoundShape, b: &CompoundShape) -> CompoundShape {
        let area = match (a.area.0.is_empty(), b.area.0.is_empty()) {
            (true, _) => b.area.clone(),
            (_, true) => a.area.clone(),
            _ => a.area.union(&b.area),
        };
        let lines = a.lines.0.iter().chain(b.lines.0.iter()).cloned().collect();
        CompoundShape::new(area, MultiLineString::new(lines))
    }

    fn offset(&mut self, shape: &CompoundShape, distance: f64) -> MultiPolygon<f64> {
        if distance == 0.0 {
            return shape.area.clone();
        }
        let grown_area = if shape.area.0.is_empty() {
            MultiPolygon::new(vec![])
        } else {
            shape.area.buffer(distance)
        };
        if shape.lines.0.is_empty() {
            return grown_area;
        }
        let grown_lines = shape.lines.buffer(distance);
        if grown_area.0.is_empty() {
            grown_lines
        } else {
            grown_area.union(&grown_lines)
        }
    }

    fn subtract(&mut self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        if b.0.is_empty() {
            return a.clone();
        }
        a.difference(b)
    }

    fn reset(&mut self) {
        self.rings.clear();
        self.polylines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::BoundingRect;
    use kurbo::BezPath;

    fn path(d: &str) -> PathGeometry {
        PathGeometry::new(BezPath::from_svg(d).unwrap())
    }

    #[test]
    fn test_square_to_shape() {
        let mut engine = GeoEngine::default();
        let shape = engine.to_shape(&path("M0 0 L10 0 L10 10 L0 10 Z"));
        assert_eq!(shape.area.0.len(), 1);
        assert!((shape.area() - 100.0).abs() < 1e-9);
        assert!(shape.lines.0.is_empty());
    }

    #[test]
    fn test_filled_open_path_closes() {
        let mut engine = GeoEngine::default();
        let shape = engine.to_shape(&path("M0 0 L10 0 L10 10"));
        assert!((shape.area() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_unfilled_open_path_is_polyline() {
        let mut engine = GeoEngine::default();
        let shape = engine.to_shape(&path("M0 0 L10 10").with_paint(false, true));
        assert!(shape.area.0.is_empty());
        assert_eq!(shape.lines.0.len(), 1);
    }

    #[test]
    fn test_even_odd_hole() {
        let mut engine = GeoEngine::default();
        let donut = path("M0 0 L10 0 L10 10 L0 10 Z M3 3 L7 3 L7 7 L3 7 Z")
            .with_fill_rule(FillRule::EvenOdd);
        let shape = engine.to_shape(&donut);
        assert!((shape.area() - 84.0).abs() < 1e-6);
    }

    #[test]
    fn test_non_zero_reverse_wound_hole() {
        let mut engine = GeoEngine::default();
        let shape = engine.to_shape(&path("M0 0 L10 0 L10 10 L0 10 Z M3 3 L3 7 L7 7 L7 3 Z"));
        assert!((shape.area() - 84.0).abs() < 1e-6);
    }

    #[test]
    fn test_non_zero_same_winding_fills() {
        let mut engine = GeoEngine::default();
        let shape = engine.to_shape(&path("M0 0 L10 0 L10 10 L0 10 Z M3 3 L7 3 L7 7 L3 7 Z"));
        assert!((shape.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_square_grows_by_distance() {
        let mut engine = GeoEngine::default();
        let shape = engine.to_shape(&path("M0 0 L10 0 L10 10 L0 10 Z"));
        let grown = engine.offset(&shape, 2.0);
        let rect = grown.bounding_rect().unwrap();
        assert!((rect.min().x + 2.0).abs() < 0.05);
        assert!((rect.max().y - 12.0).abs() < 0.05);
    }

    #[test]
    fn test_offset_line_has_round_caps() {
        let mut engine = GeoEngine::default();
        let shape = engine.to_shape(&path("M0 0 L10 0").with_paint(false, true));
        let grown = engine.offset(&shape, 1.0);
        let rect = grown.bounding_rect().unwrap();
        assert!((rect.min().x + 1.0).abs() < 0.05);
        assert!((rect.max().x - 11.0).abs() < 0.05);
        assert!(grown.unsigned_area() > 20.0);
    }

    #[test]
    fn test_subtract_leaves_band() {
        let mut engine = GeoEngine::default();
        let shape = engine.to_shape(&path("M0 0 L10 0 L10 10 L0 10 Z"));
        let grown = engine.offset(&shape, 1.0);
        let ring = engine.subtract(&grown, &shape.area);
        let band = grown.unsigned_area() - 100.0;
        assert!((ring.unsigned_area() - band).abs() < 1e-3);
    }

    #[test]
    fn test_union_keeps_disjoint_components() {
        let mut engine = GeoEngine::default();
        let a = engine.to_shape(&path("M0 0 L1 0 L1 1 L0 1 Z"));
        let b = engine.to_shape(&path("M5 5 L6 5 L6 6 L5 6 Z"));
        let both = engine.union(&a, &b);
        assert_eq!(both.area.0.len(), 2);
        assert!((both.area() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset_clears_scratch() {
        let mut engine = GeoEngine::default();
        engine.flatten_into_scratch(&path("M0 0 L1 0 L1 1 Z"));
        assert!(!engine.rings.is_empty());
        engine.reset();
        assert!(engine.rings.is_empty());
        assert!(engine.polylines.is_empty());
    }
}
