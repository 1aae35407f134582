//! End-to-end tests for outline generation

use pretty_assertions::assert_eq;
use regex::Regex;

use svg_outline::{
    process, process_with_config, try_process, BorderSpec, Document, ErrorKind, OutlineConfig,
    OutlineContext, SvgConfig,
};

const SQUARE: &str = r#"<svg width="24" height="24"><path d="M0 0 L24 0 L24 24 L0 24 Z"/></svg>"#;

/// Width, height and viewBox of the output root
fn canvas(svg: &str) -> (f64, f64, svg_outline::ViewBox) {
    let doc = Document::parse(svg).expect("output should parse");
    let view_box = doc.view_box.expect("output should have a viewBox");
    (doc.width, doc.height, view_box)
}

/// The `d` attribute of the ring path
fn ring_d(svg: &str) -> String {
    let re = Regex::new(r#"<g id="svg-outline-ring">\s*<path d="([^"]*)""#).unwrap();
    re.captures(svg).expect("ring path present")[1].to_string()
}

#[test]
fn test_square_outline() {
    let svg = process(SQUARE, 10.0, "#ff0000");
    let (width, height, vb) = canvas(&svg);

    assert!(vb.x <= -11.99, "viewBox x = {}", vb.x);
    assert!(vb.y <= -11.99, "viewBox y = {}", vb.y);
    assert!(width >= 47.99 && height >= 47.99);
    assert!((vb.width - width).abs() < 1e-9);

    assert_eq!(svg.matches(r##"stroke="#ff0000""##).count(), 1);
    assert!(svg.contains(r#"<path d="M0 0 L24 0 L24 24 L0 24 Z"/>"#));
    assert!(svg.contains(
        r#"<svg id="svg-outline-artwork" x="0" y="0" width="24" height="24" viewBox="0 0 24 24" fill="currentColor">"#
    ));
}

#[test]
fn test_inner_content_byte_identical() {
    let inner = "\n  <!-- layer 1 -->\n  <path d=\"M0 0 L24 0 L12 24 Z\"   fill='red'/>\n  <g><circle cx=\"12\" cy=\"12\" r=\"3\"/></g>\n";
    let input = format!(r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24">{inner}</svg>"#);
    let svg = process(&input, 4.0, "black");
    assert!(svg.contains(&format!("fill=\"currentColor\">{inner}</svg>")));
}

#[test]
fn test_margin_only_when_ring_fits() {
    let input = r#"<svg width="100" height="100"><rect x="40" y="40" width="20" height="20"/></svg>"#;
    let svg = process(input, 5.0, "black");
    let (width, height, vb) = canvas(&svg);
    assert_eq!(vb.to_string(), "-2 -2 104 104");
    assert_eq!((width, height), (104.0, 104.0));
}

#[test]
fn test_one_side_overflow() {
    let input = r#"<svg width="100" height="100"><rect x="0" y="40" width="20" height="20"/></svg>"#;
    let svg = process(input, 5.0, "black");
    let (_, _, vb) = canvas(&svg);
    assert!((vb.x + 7.0).abs() < 0.01, "left = {}", vb.x);
    assert_eq!(vb.y, -2.0);
    assert!((vb.width - 109.0).abs() < 0.01);
    assert_eq!(vb.height, 104.0);
}

#[test]
fn test_monotonic_growth() {
    let input = r#"<svg width="24" height="24"><circle cx="12" cy="12" r="8"/><rect x="0" y="0" width="6" height="6"/></svg>"#;
    let mut previous = (0.0, 0.0);
    for width in [1.0, 2.0, 5.0, 10.0, 20.0] {
        let (w, h, _) = canvas(&process(input, width, "black"));
        assert!(w >= previous.0 && h >= previous.1, "border {width}: {w}x{h} < {previous:?}");
        previous = (w, h);
    }
}

#[test]
fn test_line_only_artwork() {
    let input = r#"<svg width="24" height="24"><line x1="2" y1="2" x2="22" y2="22" stroke="black"/></svg>"#;
    let mut ctx = OutlineContext::default();
    let svg = ctx.process(input, &BorderSpec::new(4.0, "blue")).unwrap();

    assert_eq!(ctx.last_report().fallback, None);
    let (_, _, vb) = canvas(&svg);
    // Round caps reach 4 units beyond the end points
    assert!(vb.x < -3.0 && vb.x > -5.0, "viewBox x = {}", vb.x);
}

#[test]
fn test_disjoint_shapes_give_separate_rings() {
    let input = r#"<svg width="100" height="20"><rect x="0" y="0" width="20" height="20"/><rect x="80" y="0" width="20" height="20"/></svg>"#;
    let svg = process(input, 2.0, "black");
    let d = ring_d(&svg);
    // Two outer boundaries, each with the artwork cut out
    assert_eq!(d.matches('M').count(), 4);
}

#[test]
fn test_overlapping_shapes_merge() {
    let input = r#"<svg width="40" height="20"><rect x="0" y="0" width="25" height="20"/><rect x="15" y="0" width="25" height="20"/></svg>"#;
    let svg = process(input, 2.0, "black");
    assert_eq!(ring_d(&svg).matches('M').count(), 2);
}

#[test]
fn test_view_box_scaled_artwork() {
    let input = r#"<svg width="48" height="48" viewBox="0 0 24 24"><rect width="24" height="24"/></svg>"#;
    let svg = process(input, 6.0, "black");
    let (width, _, vb) = canvas(&svg);
    assert!((vb.x + 8.0).abs() < 0.01);
    assert!((width - 64.0).abs() < 0.02);
    assert!(svg.contains(r#"width="48" height="48" viewBox="0 0 24 24""#));
}

#[test]
fn test_namespaces_preserved() {
    let input = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd" width="10" height="10"><defs><rect id="r" width="10" height="10"/></defs><use xlink:href="#r"/></svg>"##;
    let svg = process(input, 2.0, "black");
    assert!(svg.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));
    assert!(svg.contains(r#"xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd""#));
    assert!(svg.contains("svg-outline-ring"));
}

#[test]
fn test_compact_output_with_custom_prefix() {
    let config = OutlineConfig::new().with_svg(
        SvgConfig::default()
            .with_pretty_print(false)
            .with_id_prefix("icon-")
            .with_ring_stroke_width(1.5),
    );
    let svg = process_with_config(SQUARE, BorderSpec::new(3.0, "green"), config).unwrap();
    assert!(!svg.contains('\n'));
    assert!(svg.contains(r#"<g id="icon-ring">"#));
    assert!(svg.contains(r#"stroke-width="1.5""#));
}

#[test]
fn test_strict_mode_surfaces_no_geometry() {
    let config = OutlineConfig::new().with_strict(true);
    let err = process_with_config("<svg><text>hi</text></svg>", BorderSpec::default(), config)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoGeometry);
}

#[test]
fn test_invalid_input() {
    let err = try_process("<html><body/></html>", 10.0, "#000").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(err.span().is_some());

    let err = try_process("", 10.0, "#000").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_artwork_view_box_not_rounded() {
    let input = r#"<svg width="24" height="24" viewBox="0 0 24.12345 24"><rect width="24" height="24"/></svg>"#;
    let svg = process(input, 3.0, "black");
    assert!(svg.contains(r#"id="svg-outline-artwork" x="0" y="0" width="24" height="24" viewBox="0 0 24.12345 24""#));
}
