//! Output composition: ring first, original artwork nested on top

use geo::MultiPolygon;

use crate::document::{format_number, Document, RawAttribute, ViewBox, SVG_NAMESPACE, XLINK_NAMESPACE};
use crate::geometry::{BorderSpec, CanvasFit};

use super::path::RingPath;
use super::SvgConfig;

/// Root attributes the nested artwork document sets itself
const NESTED_OVERRIDES: &[&str] = &["id", "width", "height", "viewBox", "x", "y"];

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    namespaces: Vec<(String, String)>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            namespaces: vec![("xmlns".to_string(), SVG_NAMESPACE.to_string())],
            elements: vec![],
            indent: 1,
        }
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Declare a namespace on the output root; repeated names keep the first
    pub fn declare_namespace(&mut self, name: &str, uri: &str) {
        if self.namespaces.iter().all(|(existing, _)| existing != name) {
            self.namespaces.push((name.to_string(), uri.to_string()));
        }
    }

    /// Open a `<g>` with a prefixed id
    pub fn begin_group(&mut self, name: &str) {
        self.elements.push(format!(
            r#"{}<g id="{}">"#,
            self.indent_str(),
            escape_xml(&self.config.id(name))
        ));
        self.indent += 1;
    }

    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Add the outline ring as an unfilled, stroked path
    pub fn add_ring(&mut self, ring: &RingPath, color: &str) {
        self.elements.push(format!(
            r#"{}<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
            self.indent_str(),
            ring.to_svg_d(),
            escape_xml(color),
            format_number(self.config.ring_stroke_width)
        ));
    }

    /// Add the original artwork as a nested `<svg>` at the origin.
    ///
    /// `view_box` and `content` are emitted exactly as given; presentation
    /// attributes of the source root carry over so inherited styling still
    /// applies.
    pub fn add_artwork(
        &mut self,
        name: &str,
        width: f64,
        height: f64,
        view_box: &str,
        attributes: &[RawAttribute],
        content: &str,
    ) {
        let mut tag = format!(
            r#"{}<svg id="{}" x="0" y="0" width="{}" height="{}" viewBox="{}""#,
            self.indent_str(),
            escape_xml(&self.config.id(name)),
            format_number(width),
            format_number(height),
            view_box.replace('"', "&quot;")
        );
        let mut has_fill = false;
        for attr in attributes {
            if attr.name == "xmlns"
                || attr.name.starts_with("xmlns:")
                || NESTED_OVERRIDES.contains(&attr.name.as_str())
            {
                continue;
            }
            has_fill |= attr.name == "fill";
            tag.push_str(&format!(r#" {}="{}""#, attr.name, attr.value.replace('"', "&quot;")));
        }
        if !has_fill {
            tag.push_str(r#" fill="currentColor""#);
        }
        tag.push('>');
        tag.push_str(content);
        tag.push_str("</svg>");
        self.elements.push(tag);
    }

    /// Build the final SVG string
    pub fn build(self, width: f64, height: f64, view_box: ViewBox) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        // XML declaration for standalone
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str("<svg");
        for (name, uri) in &self.namespaces {
            svg.push_str(&format!(r#" {}="{}""#, name, escape_xml(uri)));
        }
        svg.push_str(&format!(
            r#" width="{}" height="{}" viewBox="{}" fill="none">"#,
            format_number(width),
            format_number(height),
            view_box
        ));
        svg.push_str(nl);

        for element in &self.elements {
            svg.push_str(element);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg.push_str(nl);
        svg
    }
}

/// Compose the outlined document: ring group, then the untouched artwork
pub fn compose(
    doc: &Document<'_>,
    ring: &MultiPolygon<f64>,
    fit: &CanvasFit,
    border: &BorderSpec,
    config: &SvgConfig,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());

    if doc.uses_xlink() || doc.declares_namespace(Some("xlink")) {
        builder.declare_namespace("xmlns:xlink", XLINK_NAMESPACE);
    }
    for ns in &doc.namespaces {
        if let Some(prefix) = &ns.prefix {
            builder.declare_namespace(&format!("xmlns:{prefix}"), &ns.uri);
        }
    }

    builder.begin_group("ring");
    builder.add_ring(&RingPath::from_polygons(ring), &border.color);
    builder.end_group();

    // A valid source viewBox is copied verbatim, never re-formatted
    let view_box = match (doc.view_box, doc.attribute("viewBox")) {
        (Some(_), Some(raw)) => raw.to_string(),
        _ => doc.effective_view_box().to_string(),
    };
    builder.add_artwork(
        "artwork",
        doc.width,
        doc.height,
        &view_box,
        doc.attributes(),
        doc.inner_content(),
    );

    builder.build(fit.width, fit.height, fit.view_box)
}

/// Escape text for use in XML attribute values and character data
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
