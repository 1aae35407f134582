//! Ring path rendering
//!
//! Converts polygon geometry into SVG path `d` attribute strings.

use geo::{LineString, MultiPolygon};

use crate::document::format_number;
use crate::geometry::Point;

/// A segment in a rendered path
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(Point),
    /// Straight line to point
    LineTo(Point),
    /// Close path back to start
    Close,
}

/// A polygon outline ready for SVG rendering
#[derive(Debug, Default)]
pub struct RingPath {
    pub segments: Vec<PathSegment>,
}

impl RingPath {
    /// Build from polygons; exteriors and holes each become one closed subpath
    pub fn from_polygons(polygons: &MultiPolygon<f64>) -> Self {
        let mut path = RingPath::default();
        for polygon in &polygons.0 {
            path.push_ring(polygon.exterior());
            for hole in polygon.interiors() {
                path.push_ring(hole);
            }
        }
        path
    }

    fn push_ring(&mut self, ring: &LineString<f64>) {
        let coords = &ring.0;
        // geo rings repeat the first coordinate at the end
        let open = match coords.split_last() {
            Some((last, rest)) if rest.first() == Some(last) => rest,
            _ => coords.as_slice(),
        };
        if open.len() < 3 {
            return;
        }

        let mut points = open.iter().map(|c| Point::new(c.x, c.y));
        if let Some(first) = points.next() {
            self.segments.push(PathSegment::MoveTo(first));
        }
        self.segments.extend(points.map(PathSegment::LineTo));
        self.segments.push(PathSegment::Close);
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Convert to SVG path `d` attribute string
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();

        for seg in &self.segments {
            match seg {
                PathSegment::MoveTo(p) => {
                    if !d.is_empty() {
                        d.push(' ');
                    }
                    d.push_str(&format!("M{} {}", format_number(p.x), format_number(p.y)));
                }
                PathSegment::LineTo(p) => {
                    d.push_str(&format!(" L{} {}", format_number(p.x), format_number(p.y)));
                }
                PathSegment::Close => {
                    d.push_str(" Z");
                }
            }
        }

        d
    }
}
