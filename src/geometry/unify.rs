//! Shape unification: fold every extracted path into one silhouette

use super::engine::ShapeEngine;
use super::error::GeometryError;
use super::types::{CompoundShape, PathGeometry};

/// Result of unifying a set of paths
#[derive(Debug, Clone)]
pub struct Unified {
    pub shape: CompoundShape,
    /// Union steps dropped because an operand or result was degenerate
    pub skipped: usize,
}

/// Union all paths left to right.
///
/// A single path is converted without any boolean operation. Degenerate
/// operands (non-finite, or neither area nor open extent) and unions that
/// collapse to nothing are skipped and counted rather than aborting. Only
/// when no path contributes anything does this fail.
pub fn unify<E: ShapeEngine>(
    engine: &mut E,
    paths: &[PathGeometry],
    min_area: f64,
) -> Result<Unified, GeometryError> {
    let mut acc: Option<CompoundShape> = None;
    let mut skipped = 0;

    for (index, path) in paths.iter().enumerate() {
        if !path.is_finite() {
            log::debug!("union step {index}: skipping path with non-finite coordinates");
            skipped += 1;
            continue;
        }
        let shape = engine.to_shape(path);
        if is_degenerate(&shape, min_area) {
            log::debug!("union step {index}: skipping degenerate path");
            skipped += 1;
            continue;
        }

        acc = Some(match acc {
            None => shape,
            Some(current) => {
                let merged = engine.union(&current, &shape);
                if is_degenerate(&merged, min_area) {
                    log::debug!("union step {index}: result collapsed, keeping previous shape");
                    skipped += 1;
                    current
                } else {
                    merged
                }
            }
        });
    }

    match acc {
        Some(shape) => Ok(Unified { shape, skipped }),
        None => Err(GeometryError::DegenerateUnion),
    }
}

fn is_degenerate(shape: &CompoundShape, min_area: f64) -> bool {
    !shape.has_area(min_area) && shape.lines.0.iter().all(|line| line.0.len() < 2)
}
