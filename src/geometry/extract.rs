//! Path extraction
//!
//! usvg normalizes the document for us: basic shapes become paths, `use`
//! instances are expanded, CSS is resolved and every node carries its
//! absolute transform. We walk the resulting node tree and collect the paths,
//! mapped into the pixel space of the document's declared width and height.

use kurbo::{Affine, BezPath};
use usvg::tiny_skia_path::PathSegment;

use super::types::{FillRule, PathGeometry};
use crate::document::Document;

/// Collect every vector path of a document in draw order.
///
/// Never fails: if usvg rejects the document the result is empty and the
/// reason is logged. Raster images and text are skipped.
pub fn extract_paths(doc: &Document<'_>) -> Vec<PathGeometry> {
    let tree = match usvg::Tree::from_str(&doc.normalized_source(), &usvg::Options::default()) {
        Ok(tree) => tree,
        Err(e) => {
            log::debug!("usvg could not build a tree: {e}");
            return Vec::new();
        }
    };

    let size = tree.size();
    let to_document = Affine::scale_non_uniform(
        doc.width / f64::from(size.width()),
        doc.height / f64::from(size.height()),
    );

    let mut paths = Vec::new();
    collect(tree.root(), to_document, &mut paths);
    log::debug!("extracted {} path(s)", paths.len());
    paths
}

fn collect(group: &usvg::Group, to_document: Affine, out: &mut Vec<PathGeometry>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(group) => collect(group, to_document, out),
            usvg::Node::Path(path) => {
                if let Some(geometry) = convert(path, to_document) {
                    out.push(geometry);
                }
            }
            // Images, plus text nodes when usvg's `text` feature is on
            _ => {}
        }
    }
}

fn convert(path: &usvg::Path, to_document: Affine) -> Option<PathGeometry> {
    let mut bez = BezPath::new();
    for segment in path.data().segments() {
        match segment {
            PathSegment::MoveTo(p) => bez.move_to(point(p)),
            PathSegment::LineTo(p) => bez.line_to(point(p)),
            PathSegment::QuadTo(p1, p) => bez.quad_to(point(p1), point(p)),
            PathSegment::CubicTo(p1, p2, p) => bez.curve_to(point(p1), point(p2), point(p)),
            PathSegment::Close => bez.close_path(),
        }
    }
    if bez.elements().len() < 2 {
        return None;
    }

    bez.apply_affine(to_document * affine(path.abs_transform()));

    let fill_rule = match path.fill().map(|fill| fill.rule()) {
        Some(usvg::FillRule::EvenOdd) => FillRule::EvenOdd,
        _ => FillRule::NonZero,
    };
    let geometry = PathGeometry::new(bez)
        .with_fill_rule(fill_rule)
        .with_paint(path.fill().is_some(), path.stroke().is_some());

    if geometry.is_finite() {
        Some(geometry)
    } else {
        log::debug!("skipping path with non-finite coordinates");
        None
    }
}

fn point(p: usvg::tiny_skia_path::Point) -> kurbo::Point {
    kurbo::Point::new(f64::from(p.x), f64::from(p.y))
}

fn affine(t: usvg::Transform) -> Affine {
    Affine::new([
        f64::from(t.sx),
        f64::from(t.ky),
        f64::from(t.kx),
        f64::from(t.sy),
        f64::from(t.tx),
        f64::from(t.ty),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape;

    fn extract(src: &str) -> Vec<PathGeometry> {
        let doc = Document::parse(src).unwrap();
        extract_paths(&doc)
    }

    #[test]
    fn test_single_path() {
        let paths = extract(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24"><path d="M0 0 L24 0 L24 24 L0 24 Z"/></svg>"#,
        );
        assert_eq!(paths.len(), 1);
        let bbox = paths[0].path.bounding_box();
        assert!((bbox.x0 - 0.0).abs() < 1e-4);
        assert!((bbox.x1 - 24.0).abs() < 1e-4);
        assert!(paths[0].filled);
    }

    #[test]
    fn test_basic_shapes_become_paths() {
        let paths = extract(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
                <rect x="10" y="10" width="20" height="20"/>
                <circle cx="50" cy="50" r="10"/>
                <polyline points="0,0 10,10 20,0" fill="none" stroke="black"/>
            </svg>"#,
        );
        assert_eq!(paths.len(), 3);
        assert!(!paths[2].filled);
        assert!(paths[2].stroked);
    }

    #[test]
    fn test_nested_group_transform_applied() {
        let paths = extract(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
                <g transform="translate(10 20)"><g><rect width="5" height="5"/></g></g>
            </svg>"#,
        );
        assert_eq!(paths.len(), 1);
        let bbox = paths[0].path.bounding_box();
        assert!((bbox.x0 - 10.0).abs() < 1e-4);
        assert!((bbox.y0 - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_view_box_mapped_to_document_size() {
        let paths = extract(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="48" viewBox="0 0 24 24"><rect width="24" height="24"/></svg>"#,
        );
        assert_eq!(paths.len(), 1);
        let bbox = paths[0].path.bounding_box();
        assert!((bbox.x1 - 48.0).abs() < 1e-3);
        assert!((bbox.y1 - 48.0).abs() < 1e-3);
    }

    #[test]
    fn test_even_odd_rule_carried() {
        let paths = extract(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><path fill-rule="evenodd" d="M0 0 L10 0 L10 10 Z"/></svg>"#,
        );
        assert_eq!(paths[0].fill_rule, FillRule::EvenOdd);
    }

    #[test]
    fn test_text_only_yields_nothing() {
        let paths = extract(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><text x="0" y="5">hi</text></svg>"#,
        );
        assert!(paths.is_empty());
    }
}
