//! Error types for performance analytics.

use perform_math::MathError;
use perform_primitives::ParseError;
use perform_series::SeriesError;
use perform_traits::SourceError;
use polars::prelude::PolarsError;

/// Errors that can occur while computing metrics.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// The metric needs at least one benchmark.
    #[error("no benchmark series has been added")]
    NoBenchmark,

    /// A label that was never registered.
    #[error("unknown {kind} label: {label}")]
    UnknownLabel {
        /// Which registry was searched.
        kind: &'static str,
        /// The label asked for.
        label: String,
    },

    /// A companion series shares no observations with the subject.
    #[error("series {0} has no observations inside the subject's date range")]
    NoOverlap(String),

    /// Series construction or resampling error.
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// Numerical error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Invalid method, frequency or label argument.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Frame construction error.
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),

    /// Risk-free source error.
    #[error("risk-free source error: {0}")]
    Source(#[from] SourceError),
}

impl AnalyticsError {
    /// Whether this error reports an unrecognized method name.
    #[must_use]
    pub const fn is_unknown_method(&self) -> bool {
        match self {
            Self::Parse(err) => err.is_unknown_method(),
            Self::Series(err) => err.is_unknown_method(),
            _ => false,
        }
    }

    /// Whether this error reports a label argument of the wrong kind.
    #[must_use]
    pub const fn is_wrong_argument_type(&self) -> bool {
        matches!(self, Self::Parse(ParseError::WrongArgumentType { .. }))
    }
}
