//! SVG output for outlined and framed documents
//!
//! The compositor places the outline ring behind the original artwork; the
//! fallback frames content that could not be outlined.

pub mod config;
pub mod fallback;
pub mod path;
pub mod svg;

pub use config::SvgConfig;
pub use fallback::{frame_with_border, Frame};
pub use path::RingPath;
pub use svg::{compose, escape_xml, SvgBuilder};
