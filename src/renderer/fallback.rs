//! Rounded-rectangle frame for content that cannot be outlined
//!
//! Raster images, text-only drawings and geometry the offset stages reject
//! all end up here. The source document is kept as written: only the root
//! start tag is rewritten to grow the canvas by the border width on every
//! side, and a stroked rectangle filling exactly that band is inserted before
//! the original content.

use crate::document::{format_number, Document, ViewBox, SVG_NAMESPACE, XLINK_NAMESPACE};
use crate::error::OutlineError;
use crate::geometry::{BorderSpec, Bounds};

use super::svg::escape_xml;
use super::SvgConfig;

/// Geometry of the framed canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub view_box: ViewBox,
    /// Rectangle whose stroke covers the added band
    pub rect: Bounds,
    pub stroke_width: f64,
}

impl Frame {
    /// Compute the frame for a document and border width
    pub fn new(doc: &Document<'_>, border_width: f64) -> Result<Self, OutlineError> {
        let b = border_width;
        let vb = doc.effective_view_box();
        let frame = Frame {
            width: doc.width + 2.0 * b,
            height: doc.height + 2.0 * b,
            view_box: vb.expand(b),
            rect: Bounds::new(vb.x - b / 2.0, vb.y - b / 2.0, vb.width + b, vb.height + b),
            stroke_width: b,
        };

        if frame.width.is_finite()
            && frame.height.is_finite()
            && [frame.view_box.x, frame.view_box.y, frame.view_box.width, frame.view_box.height]
                .iter()
                .all(|n| n.is_finite())
            && frame.rect.is_finite()
            && b.is_finite()
            && b >= 0.0
        {
            Ok(frame)
        } else {
            Err(OutlineError::FallbackFailure(format!(
                "frame for border width {b} is not finite"
            )))
        }
    }
}

/// Wrap the original content in a border frame
pub fn frame_with_border(
    doc: &Document<'_>,
    border: &BorderSpec,
    config: &SvgConfig,
) -> Result<String, OutlineError> {
    let frame = Frame::new(doc, border.width)?;
    let root = doc.root_name();
    // Inserted elements share the root's namespace prefix
    let prefix = root
        .split_once(':')
        .map(|(p, _)| format!("{p}:"))
        .unwrap_or_default();

    let mut out = String::with_capacity(doc.source().len() + 256);
    out.push_str(doc.prolog());
    out.push('<');
    out.push_str(root);

    if prefix.is_empty() && !doc.declares_namespace(None) {
        out.push_str(&format!(r#" xmlns="{SVG_NAMESPACE}""#));
    }
    if doc.uses_xlink() && !doc.declares_namespace(Some("xlink")) {
        out.push_str(&format!(r#" xmlns:xlink="{XLINK_NAMESPACE}""#));
    }

    let view_box = frame.view_box.to_string();
    let mut seen = (false, false, false);
    for attr in doc.attributes() {
        let value = match attr.name.as_str() {
            "width" => {
                seen.0 = true;
                format_number(frame.width)
            }
            "height" => {
                seen.1 = true;
                format_number(frame.height)
            }
            "viewBox" => {
                seen.2 = true;
                view_box.clone()
            }
            _ => attr.value.replace('"', "&quot;"),
        };
        out.push_str(&format!(r#" {}="{}""#, attr.name, value));
    }
    if !seen.0 {
        out.push_str(&format!(r#" width="{}""#, format_number(frame.width)));
    }
    if !seen.1 {
        out.push_str(&format!(r#" height="{}""#, format_number(frame.height)));
    }
    if !seen.2 {
        out.push_str(&format!(r#" viewBox="{view_box}""#));
    }
    out.push('>');

    let b = format_number(frame.stroke_width);
    out.push_str(&format!(
        r#"<{p}g id="{id}"><{p}rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{b}" ry="{b}" fill="none" stroke="{color}" stroke-width="{b}"/></{p}g>"#,
        p = prefix,
        id = escape_xml(&config.id("border")),
        x = format_number(frame.rect.x),
        y = format_number(frame.rect.y),
        w = format_number(frame.rect.width),
        h = format_number(frame.rect.height),
        color = escape_xml(&border.color),
    ));
    out.push_str(&format!(r#"<{prefix}g id="{}">"#, escape_xml(&config.id("original"))));
    out.push_str(doc.inner_content());
    out.push_str(&format!("</{prefix}g></{root}>"));
    out.push_str(doc.epilog());

    log::debug!(
        "framed content: {}x{} -> {}x{}",
        format_number(doc.width),
        format_number(doc.height),
        format_number(frame.width),
        format_number(frame.height)
    );
    Ok(out)
}
