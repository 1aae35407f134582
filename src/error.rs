//! Error types surfaced at the crate boundary

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::config::ConfigError;
use crate::geometry::GeometryError;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Which boolean operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanStage {
    Union,
    Subtraction,
}

impl std::fmt::Display for BooleanStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BooleanStage::Union => write!(f, "union"),
            BooleanStage::Subtraction => write!(f, "subtraction"),
        }
    }
}

/// Coarse classification of an [`OutlineError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NoGeometry,
    OffsetFailure,
    BooleanOpFailure,
    FallbackFailure,
}

#[derive(Error, Debug)]
pub enum OutlineError {
    /// Input is not a usable SVG document
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String, span: Option<Span> },

    /// No vector paths and no raster content to frame
    #[error("no extractable geometry")]
    NoGeometry,

    /// The offset produced no outer boundary
    #[error("no outer path producible: {0}")]
    OffsetFailure(String),

    #[error("boolean {stage} failed: {reason}")]
    BooleanOpFailure { stage: BooleanStage, reason: String },

    /// The rectangular frame could not be built
    #[error("fallback failed: {0}")]
    FallbackFailure(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl OutlineError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
            span: None,
        }
    }

    /// Invalid input pointing at a byte range of the source
    pub fn invalid_input_at(reason: impl Into<String>, span: Span) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
            span: Some(span),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } | Self::Config(_) => ErrorKind::InvalidInput,
            Self::NoGeometry => ErrorKind::NoGeometry,
            Self::OffsetFailure(_) => ErrorKind::OffsetFailure,
            Self::BooleanOpFailure { .. } => ErrorKind::BooleanOpFailure,
            Self::FallbackFailure(_) => ErrorKind::FallbackFailure,
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::InvalidInput { span, .. } => span.as_ref(),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return format!("error: {}\n", self);
        };
        // The reader may point one past the end on truncated input
        let end = span.end.min(source.len());
        let start = span.start.min(end.saturating_sub(1));

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, start..end))
                    .with_message(self.label())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("error: {}\n", self),
        }
    }

    fn label(&self) -> String {
        match self {
            Self::InvalidInput { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

impl From<GeometryError> for OutlineError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::EmptyShape | GeometryError::NoOuterBoundary { .. } => {
                OutlineError::OffsetFailure(err.to_string())
            }
            GeometryError::InvalidWidth(width) => {
                OutlineError::invalid_input(format!("border width must be finite and >= 0, got {width}"))
            }
            GeometryError::EmptyRing { .. } => OutlineError::BooleanOpFailure {
                stage: BooleanStage::Subtraction,
                reason: err.to_string(),
            },
            GeometryError::DegenerateUnion => OutlineError::BooleanOpFailure {
                stage: BooleanStage::Union,
                reason: err.to_string(),
            },
        }
    }
}
