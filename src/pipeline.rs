//! The outline pipeline
//!
//! [`OutlineContext`] owns the shape engine and runs one document at a time:
//! sanitize, parse, detect rasters, extract, unify, offset, resolve the ring,
//! fit the canvas and compose. Geometric failures are redirected to the
//! border frame unless the configuration is strict. Each call starts from a
//! cleared workspace; only the cumulative counters outlive it.

use std::fmt;

use geo::BoundingRect;

use crate::config::OutlineConfig;
use crate::document::{format_number, Document};
use crate::error::{BooleanStage, ErrorKind, OutlineError};
use crate::geometry::{
    extract_paths, fit_canvas, offset_shape, resolve_ring, unify, BorderSpec, Bounds, CanvasFit,
    GeoEngine, PathGeometry, ShapeEngine,
};
use crate::renderer::{compose, frame_with_border};
use crate::sanitize::sanitize;

/// Why a document was framed instead of outlined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackReason {
    EmbeddedRaster,
    NoGeometry,
    OffsetFailure,
    BooleanOpFailure,
}

impl FallbackReason {
    /// The fallback a recoverable error redirects to, if any
    pub fn for_error(err: &OutlineError) -> Option<Self> {
        match err.kind() {
            ErrorKind::NoGeometry => Some(Self::NoGeometry),
            ErrorKind::OffsetFailure => Some(Self::OffsetFailure),
            ErrorKind::BooleanOpFailure => Some(Self::BooleanOpFailure),
            ErrorKind::InvalidInput | ErrorKind::FallbackFailure => None,
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::EmbeddedRaster => "embedded raster content",
            Self::NoGeometry => "no extractable paths",
            Self::OffsetFailure => "offset failed",
            Self::BooleanOpFailure => "boolean operation failed",
        };
        f.write_str(text)
    }
}

/// What happened during the most recent call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessReport {
    pub paths_extracted: usize,
    pub union_steps_skipped: usize,
    pub fallback: Option<FallbackReason>,
    /// Fitted canvas when the document was outlined
    pub canvas: Option<CanvasFit>,
}

/// Counters accumulated across calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackStats {
    pub documents: usize,
    pub outlined: usize,
    pub embedded_raster: usize,
    pub no_geometry: usize,
    pub offset_failure: usize,
    pub boolean_op_failure: usize,
    pub union_steps_skipped: usize,
}

impl FallbackStats {
    fn record(&mut self, reason: FallbackReason) {
        match reason {
            FallbackReason::EmbeddedRaster => self.embedded_raster += 1,
            FallbackReason::NoGeometry => self.no_geometry += 1,
            FallbackReason::OffsetFailure => self.offset_failure += 1,
            FallbackReason::BooleanOpFailure => self.boolean_op_failure += 1,
        }
    }

    /// Total number of framed documents
    pub fn fallbacks(&self) -> usize {
        self.embedded_raster + self.no_geometry + self.offset_failure + self.boolean_op_failure
    }
}

/// Processing context holding the shape engine and configuration
pub struct OutlineContext<E: ShapeEngine = GeoEngine> {
    engine: E,
    config: OutlineConfig,
    report: ProcessReport,
    stats: FallbackStats,
}

impl OutlineContext<GeoEngine> {
    /// Create a context with the `geo`-backed engine
    pub fn new(config: OutlineConfig) -> Self {
        let engine = GeoEngine::new(config.geometry.flatten_tolerance);
        Self::with_engine(engine, config)
    }
}

impl Default for OutlineContext<GeoEngine> {
    fn default() -> Self {
        Self::new(OutlineConfig::default())
    }
}

impl<E: ShapeEngine> OutlineContext<E> {
    /// Create a context around a custom engine
    pub fn with_engine(engine: E, config: OutlineConfig) -> Self {
        Self {
            engine,
            config,
            report: ProcessReport::default(),
            stats: FallbackStats::default(),
        }
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Report of the most recent call
    pub fn last_report(&self) -> &ProcessReport {
        &self.report
    }

    /// Counters since the context was created
    pub fn stats(&self) -> &FallbackStats {
        &self.stats
    }

    /// Process with the configured default border
    pub fn process_default(&mut self, input: impl AsRef<[u8]>) -> Result<String, OutlineError> {
        let border = self.config.border.clone();
        self.process(input, &border)
    }

    /// Outline one document.
    ///
    /// Returns the outlined document, or the border frame when the content
    /// cannot be outlined. Surfaces `InvalidInput` and `FallbackFailure`;
    /// in strict mode geometric failures surface too.
    pub fn process(
        &mut self,
        input: impl AsRef<[u8]>,
        border: &BorderSpec,
    ) -> Result<String, OutlineError> {
        self.report = ProcessReport::default();
        self.engine.reset();
        self.stats.documents += 1;

        border.validate()?;
        let text = std::str::from_utf8(input.as_ref())
            .map_err(|e| OutlineError::invalid_input(format!("input is not valid UTF-8: {e}")))?;
        let clean = sanitize(text);
        let doc = Document::parse(&clean)?;
        log::debug!(
            "document {}x{}, viewBox {}",
            format_number(doc.width),
            format_number(doc.height),
            doc.effective_view_box()
        );

        if doc.has_embedded_raster() {
            log::debug!("{} raster reference(s) found", doc.raster_count());
            return self.fall_back(&doc, border, FallbackReason::EmbeddedRaster);
        }

        let paths = extract_paths(&doc);
        self.report.paths_extracted = paths.len();

        match self.outline(&doc, &paths, border) {
            Ok(svg) => {
                self.stats.outlined += 1;
                Ok(sanitize(svg))
            }
            Err(err) => match FallbackReason::for_error(&err) {
                Some(reason) if !self.config.strict => {
                    log::debug!("outline failed: {err}");
                    self.fall_back(&doc, border, reason)
                }
                _ => Err(err),
            },
        }
    }

    fn outline(
        &mut self,
        doc: &Document<'_>,
        paths: &[PathGeometry],
        border: &BorderSpec,
    ) -> Result<String, OutlineError> {
        if paths.is_empty() {
            return Err(OutlineError::NoGeometry);
        }
        let geometry = &self.config.geometry;

        let unified = unify(&mut self.engine, paths, geometry.min_area)?;
        self.report.union_steps_skipped = unified.skipped;
        self.stats.union_steps_skipped += unified.skipped;

        let grown = offset_shape(&mut self.engine, &unified.shape, border.width, geometry.min_area)?;
        let ring = resolve_ring(&mut self.engine, &grown, &unified.shape, geometry.min_area)?;

        let bounds = ring
            .bounding_rect()
            .map(Bounds::from)
            .filter(Bounds::is_finite)
            .ok_or_else(|| OutlineError::BooleanOpFailure {
                stage: BooleanStage::Subtraction,
                reason: "ring has no finite bounds".to_string(),
            })?;

        let fit = fit_canvas(&bounds, doc.width, doc.height, geometry.safety_margin);
        log::debug!(
            "canvas {}x{} -> {}x{}, viewBox {}",
            format_number(doc.width),
            format_number(doc.height),
            format_number(fit.width),
            format_number(fit.height),
            fit.view_box
        );
        self.report.canvas = Some(fit);

        Ok(compose(doc, &ring, &fit, border, &self.config.svg))
    }

    fn fall_back(
        &mut self,
        doc: &Document<'_>,
        border: &BorderSpec,
        reason: FallbackReason,
    ) -> Result<String, OutlineError> {
        log::warn!("falling back to border frame: {reason}");
        self.report.fallback = Some(reason);
        self.report.canvas = None;
        self.stats.record(reason);
        frame_with_border(doc, border, &self.config.svg).map(sanitize)
    }
}
