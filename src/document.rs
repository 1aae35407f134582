//! Lightweight SVG document model
//!
//! The outline pipeline never rewrites the source artwork, it only needs to
//! know a handful of facts about it: the root's declared size and viewBox,
//! its namespace declarations, where its inner content starts and ends, and
//! which elements are present. This module reads those facts with a
//! streaming XML reader and keeps byte ranges into the (sanitized) source so
//! the content can be re-embedded verbatim.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::OutlineError;

/// Size used for width/height when the root does not declare one
pub const DEFAULT_DIMENSION: f64 = 24.0;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// The `viewBox` rectangle of a document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Parse a `viewBox` attribute value (`"min-x min-y width height"`).
    ///
    /// Commas and whitespace are both accepted as separators. Returns `None`
    /// unless there are exactly four finite numbers with a positive size.
    pub fn parse(value: &str) -> Option<Self> {
        let numbers: Vec<f64> = value
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>())
            .collect::<Result<_, _>>()
            .ok()?;

        match numbers.as_slice() {
            [x, y, w, h] if numbers.iter().all(|n| n.is_finite()) && *w > 0.0 && *h > 0.0 => {
                Some(Self::new(*x, *y, *w, *h))
            }
            _ => None,
        }
    }

    /// Grow the box by `amount` on every side
    pub fn expand(&self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            format_number(self.x),
            format_number(self.y),
            format_number(self.width),
            format_number(self.height)
        )
    }
}

/// Element kinds the pipeline distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `path` and the basic shapes that normalize to one
    Path,
    /// Containers: `g`, nested `svg`, `a`, `symbol`, `defs`, ...
    Group,
    /// Raster references: `image`, `feImage`
    Image,
    Other,
}

impl ElementKind {
    fn from_local_name(name: &[u8]) -> Self {
        match name {
            b"path" | b"rect" | b"circle" | b"ellipse" | b"line" | b"polyline" | b"polygon" => {
                ElementKind::Path
            }
            b"g" | b"svg" | b"a" | b"switch" | b"symbol" | b"defs" | b"use" | b"clipPath"
            | b"mask" | b"pattern" | b"marker" => ElementKind::Group,
            b"image" | b"feImage" => ElementKind::Image,
            _ => ElementKind::Other,
        }
    }
}

/// One element of the source tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub kind: ElementKind,
    /// `href` or `xlink:href` holds an inline raster (`data:image/...`)
    pub inline_raster: bool,
    pub children: Vec<Element>,
}

impl Element {
    /// Whether this element or any descendant references raster content
    pub fn has_raster(&self) -> bool {
        self.kind == ElementKind::Image
            || self.inline_raster
            || self.children.iter().any(Element::has_raster)
    }
}

/// An attribute of the root element, value kept exactly as written
#[derive(Debug, Clone, PartialEq)]
pub struct RawAttribute {
    pub name: String,
    pub value: String,
}

/// A namespace declared on the root element (`prefix` is `None` for `xmlns`)
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    pub prefix: Option<String>,
    pub uri: String,
}

/// A parsed SVG document borrowing its source text
#[derive(Debug, Clone)]
pub struct Document<'a> {
    source: &'a str,
    root_name: String,
    attributes: Vec<RawAttribute>,
    open_tag: Range<usize>,
    inner: Range<usize>,
    /// `None` for a self-closing root
    close_tag: Option<Range<usize>>,
    uses_xlink: bool,
    /// Rendered width in user units
    pub width: f64,
    /// Rendered height in user units
    pub height: f64,
    /// Declared viewBox, if present and valid
    pub view_box: Option<ViewBox>,
    pub namespaces: Vec<Namespace>,
    /// Root content in document order
    pub content: Vec<Element>,
}

impl<'a> Document<'a> {
    /// Parse SVG source text.
    ///
    /// Fails with [`OutlineError::InvalidInput`] when the text is not
    /// well-formed XML or its root element is not `<svg>`.
    pub fn parse(source: &'a str) -> Result<Self, OutlineError> {
        let mut reader = Reader::from_str(source);

        let mut root: Option<(String, Vec<RawAttribute>, Range<usize>, bool)> = None;
        let mut uses_xlink = false;
        // Children collected per open element; index 0 is the root's content.
        let mut stack: Vec<(Element, Vec<Element>)> = Vec::new();
        let mut content = Vec::new();
        let mut inner_end = None;
        let mut close_tag = None;

        loop {
            let start = reader.buffer_position() as usize;
            let event = reader.read_event().map_err(|e| {
                let pos = reader.error_position() as usize;
                OutlineError::invalid_input_at(format!("malformed XML: {e}"), pos..pos + 1)
            })?;
            let end = reader.buffer_position() as usize;

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let self_closing = matches!(event, Event::Empty(_));
                    uses_xlink |= has_xlink_attribute(e);

                    if root.is_none() {
                        if e.local_name().as_ref() != b"svg" {
                            return Err(OutlineError::invalid_input_at(
                                format!("root element is <{}>, expected <svg>", decode(e.name().as_ref())),
                                start..end,
                            ));
                        }
                        let attributes = raw_attributes(e);
                        root = Some((decode(e.name().as_ref()), attributes, start..end, self_closing));
                        if self_closing {
                            inner_end = Some(end);
                            break;
                        }
                        continue;
                    }

                    let element = element_from(e);
                    if self_closing {
                        push_child(&mut stack, &mut content, element);
                    } else {
                        stack.push((element, Vec::new()));
                    }
                }
                Event::End(_) => {
                    if root.is_none() {
                        continue;
                    }
                    match stack.pop() {
                        Some((mut element, children)) => {
                            element.children = children;
                            push_child(&mut stack, &mut content, element);
                        }
                        None => {
                            inner_end = Some(start);
                            close_tag = Some(start..end);
                            break;
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        let Some((root_name, attributes, open_tag, self_closing)) = root else {
            return Err(OutlineError::invalid_input("no <svg> root element found"));
        };
        let Some(inner_end) = inner_end else {
            return Err(OutlineError::invalid_input_at(
                "unclosed <svg> root element",
                open_tag.clone(),
            ));
        };
        let inner = if self_closing {
            open_tag.end..open_tag.end
        } else {
            open_tag.end..inner_end
        };

        let view_box = find_attribute(&attributes, "viewBox").and_then(ViewBox::parse);
        let width = find_attribute(&attributes, "width")
            .and_then(parse_length)
            .or_else(|| percent_fallback(&attributes, "width", view_box.map(|vb| vb.width)))
            .unwrap_or(DEFAULT_DIMENSION);
        let height = find_attribute(&attributes, "height")
            .and_then(parse_length)
            .or_else(|| percent_fallback(&attributes, "height", view_box.map(|vb| vb.height)))
            .unwrap_or(DEFAULT_DIMENSION);

        let namespaces = attributes
            .iter()
            .filter_map(|attr| {
                if attr.name == "xmlns" {
                    Some(Namespace {
                        prefix: None,
                        uri: attr.value.clone(),
                    })
                } else {
                    attr.name.strip_prefix("xmlns:").map(|prefix| Namespace {
                        prefix: Some(prefix.to_string()),
                        uri: attr.value.clone(),
                    })
                }
            })
            .collect();

        Ok(Document {
            source,
            root_name,
            attributes,
            open_tag,
            inner,
            close_tag,
            uses_xlink,
            width,
            height,
            view_box,
            namespaces,
            content,
        })
    }

    /// The full source text this document was parsed from
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Source text ready for a namespace-aware SVG parser.
    ///
    /// Hand-written icons often omit `xmlns` or size attributes. The missing
    /// SVG and XLink declarations are added to the root start tag, as are
    /// `width`/`height` carrying the resolved dimensions.
    pub fn normalized_source(&self) -> Cow<'a, str> {
        let mut missing = String::new();
        if !self.root_name.contains(':') && !self.declares_namespace(None) {
            missing.push_str(&format!(" xmlns=\"{SVG_NAMESPACE}\""));
        }
        if self.uses_xlink && !self.declares_namespace(Some("xlink")) {
            missing.push_str(&format!(" xmlns:xlink=\"{XLINK_NAMESPACE}\""));
        }
        if self.attribute("width").is_none() {
            missing.push_str(&format!(" width=\"{}\"", format_number(self.width)));
        }
        if self.attribute("height").is_none() {
            missing.push_str(&format!(" height=\"{}\"", format_number(self.height)));
        }
        if missing.is_empty() {
            return Cow::Borrowed(self.source);
        }

        let insert_at = self.open_tag.start + 1 + self.root_name.len();
        let mut text = String::with_capacity(self.source.len() + missing.len());
        text.push_str(&self.source[..insert_at]);
        text.push_str(&missing);
        text.push_str(&self.source[insert_at..]);
        Cow::Owned(text)
    }

    /// Qualified name of the root element as written (`svg`, `svg:svg`)
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Root attributes in source order
    pub fn attributes(&self) -> &[RawAttribute] {
        &self.attributes
    }

    /// Raw value of a root attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        find_attribute(&self.attributes, name)
    }

    /// Text before the root start tag (XML declaration, doctype, comments)
    pub fn prolog(&self) -> &'a str {
        &self.source[..self.open_tag.start]
    }

    /// Everything between the root start and end tags, byte-for-byte
    pub fn inner_content(&self) -> &'a str {
        &self.source[self.inner.clone()]
    }

    /// Text after the root end tag
    pub fn epilog(&self) -> &'a str {
        match &self.close_tag {
            Some(close) => &self.source[close.end..],
            None => &self.source[self.open_tag.end..],
        }
    }

    /// The declared viewBox, or `0 0 width height`
    pub fn effective_view_box(&self) -> ViewBox {
        self.view_box
            .unwrap_or_else(|| ViewBox::new(0.0, 0.0, self.width, self.height))
    }

    /// Whether any element uses an `xlink:`-prefixed attribute
    pub fn uses_xlink(&self) -> bool {
        self.uses_xlink
    }

    /// Whether the URI bound to `prefix` (or the default namespace) is declared
    pub fn declares_namespace(&self, prefix: Option<&str>) -> bool {
        self.namespaces
            .iter()
            .any(|ns| ns.prefix.as_deref() == prefix)
    }

    /// Whether the content embeds or links raster images
    pub fn has_embedded_raster(&self) -> bool {
        self.content.iter().any(Element::has_raster)
    }

    /// Number of elements that reference raster content
    pub fn raster_count(&self) -> usize {
        fn count(elements: &[Element]) -> usize {
            elements
                .iter()
                .map(|e| {
                    usize::from(e.kind == ElementKind::Image || e.inline_raster)
                        + count(&e.children)
                })
                .sum()
        }
        count(&self.content)
    }
}

fn push_child(stack: &mut [(Element, Vec<Element>)], content: &mut Vec<Element>, element: Element) {
    match stack.last_mut() {
        Some((_, children)) => children.push(element),
        None => content.push(element),
    }
}

fn element_from(e: &BytesStart<'_>) -> Element {
    let inline_raster = e.attributes().with_checks(false).flatten().any(|attr| {
        let key = attr.key.as_ref();
        (key == b"href" || key == b"xlink:href")
            && attr
                .value
                .trim_ascii_start()
                .get(..10)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"data:image"))
    });

    Element {
        name: decode(e.name().as_ref()),
        kind: ElementKind::from_local_name(e.local_name().as_ref()),
        inline_raster,
        children: Vec::new(),
    }
}

fn has_xlink_attribute(e: &BytesStart<'_>) -> bool {
    e.attributes()
        .with_checks(false)
        .flatten()
        .any(|attr| attr.key.as_ref().starts_with(b"xlink:"))
}

fn raw_attributes(e: &BytesStart<'_>) -> Vec<RawAttribute> {
    e.attributes()
        .with_checks(false)
        .flatten()
        .map(|attr| RawAttribute {
            name: decode(attr.key.as_ref()),
            value: decode(&attr.value),
        })
        .collect()
}

fn find_attribute<'b>(attributes: &'b [RawAttribute], name: &str) -> Option<&'b str> {
    attributes
        .iter()
        .find(|a| a.name == name)
        .map(|a| a.value.as_str())
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Percentage lengths resolve to the viewBox size when one is declared
fn percent_fallback(attributes: &[RawAttribute], name: &str, view_box_size: Option<f64>) -> Option<f64> {
    let value = find_attribute(attributes, name)?;
    if value.trim_end().ends_with('%') {
        view_box_size
    } else {
        None
    }
}

/// Parse an SVG length into user units.
///
/// Absolute units are converted at 96 DPI; `em`/`ex` assume a 16px font.
/// Percentages and unparsable values return `None`.
pub fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .unwrap_or(value.len());
    // Keep an exponent marker only when digits follow it ("1e2" vs "2em")
    let (number, unit) = match value[..split].rfind(['e', 'E']) {
        Some(idx) if !value[idx + 1..split].chars().any(|c| c.is_ascii_digit()) => {
            (&value[..idx], &value[idx..])
        }
        _ => (&value[..split], &value[split..]),
    };

    let number: f64 = number.parse().ok()?;
    let scale = match unit.trim() {
        "" | "px" => 1.0,
        "pt" => 4.0 / 3.0,
        "pc" => 16.0,
        "in" => 96.0,
        "cm" => 96.0 / 2.54,
        "mm" => 96.0 / 25.4,
        "em" => 16.0,
        "ex" => 8.0,
        _ => return None,
    };

    let length = number * scale;
    (length.is_finite() && length > 0.0).then_some(length)
}

/// Format a number for SVG output: at most three decimals, no trailing zeros
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{:.3}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}
