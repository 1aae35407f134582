//! Geometry stages for outline generation
//!
//! Extraction turns the document into paths, unification merges them into
//! one silhouette, the offset grows it outward, ring resolution removes the
//! silhouette from the offset and canvas fitting sizes the output around the
//! result. Boolean and buffer operations go through [`ShapeEngine`].

pub mod canvas;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod offset;
pub mod ring;
pub mod types;
pub mod unify;

pub use canvas::{fit_canvas, CanvasFit};
pub use config::GeometryConfig;
pub use engine::{GeoEngine, ShapeEngine};
pub use error::GeometryError;
pub use extract::extract_paths;
pub use offset::offset_shape;
pub use ring::resolve_ring;
pub use types::*;
pub use unify::{unify, Unified};
