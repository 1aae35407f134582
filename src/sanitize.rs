//! Script stripping for untrusted SVG text
//!
//! Runs on every input before parsing and again on every output before it is
//! handed to a caller. Removal repeats until nothing matches, so nested or
//! split tags like `<scr<script></script>ipt>` cannot reassemble into a live
//! script element.

use std::sync::OnceLock;

use regex::Regex;

/// Complete script elements, optionally namespace-prefixed (`<svg:script>`)
fn script_element() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(?:[a-z_][a-z0-9_.\-]*:)?script\b.*?</(?:[a-z_][a-z0-9_.\-]*:)?script\s*>")
            .expect("script element pattern is valid")
    })
}

/// Any remaining tag whose name starts with `script` (`<script1>`, `<scripts/>`)
fn script_open_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<(?:[a-z_][a-z0-9_.\-]*:)?script[^>]*>?")
            .expect("script tag pattern is valid")
    })
}

/// Remove every script element from SVG source text.
///
/// Input that is not valid UTF-8 yields an empty string. The result never
/// contains `<script` (in any letter case) and sanitizing it again is a no-op.
///
/// # Example
///
/// ```rust
/// use svg_outline::sanitize;
///
/// let clean = sanitize(r#"<svg><script>alert(1)</script><path d="M0 0"/></svg>"#);
/// assert_eq!(clean, r#"<svg><path d="M0 0"/></svg>"#);
/// ```
pub fn sanitize(input: impl AsRef<[u8]>) -> String {
    match std::str::from_utf8(input.as_ref()) {
        Ok(text) => strip_scripts(text),
        Err(_) => String::new(),
    }
}

fn strip_scripts(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let without_elements = script_element().replace_all(&current, "");
        let stripped = script_open_tag().replace_all(&without_elements, "");
        if stripped.len() == current.len() {
            return current;
        }
        current = stripped.into_owned();
    }
}
