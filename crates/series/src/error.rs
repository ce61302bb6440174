//! Error types for series construction and resampling.

use perform_primitives::{Frequency, ParseError, Timestamp};

/// Errors that can occur while building or transforming a series.
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    /// Input does not have the shape of a single-value table.
    #[error("input is not tabular: {0}")]
    NotTabular(String),

    /// No temporal column and neither a `datetime` nor a `date` column.
    #[error("no datetime index: expected a temporal column or a 'date'/'datetime' column")]
    MissingIndex,

    /// A date value could not be parsed.
    #[error("invalid date in column '{column}': {value:?}")]
    InvalidDate {
        /// Column being converted.
        column: String,
        /// Offending value.
        value: String,
    },

    /// The same timestamp appears more than once.
    #[error("duplicate timestamp: {0}")]
    DuplicateTimestamp(Timestamp),

    /// Index and values differ in length.
    #[error("length mismatch: {index} timestamps, {values} values")]
    LengthMismatch {
        /// Number of timestamps.
        index: usize,
        /// Number of values.
        values: usize,
    },

    /// Sampling frequency cannot be determined.
    #[error("ambiguous frequency: {0}")]
    AmbiguousFrequency(String),

    /// Resampling target is finer than the native frequency.
    #[error("cannot resample {native} data to finer frequency {target}")]
    FrequencyTooFine {
        /// Requested frequency.
        target: Frequency,
        /// Native frequency of the series.
        native: Frequency,
    },

    /// Unrecognized method or frequency name.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl SeriesError {
    /// Returns whether this error rejects a method name.
    #[must_use]
    pub const fn is_unknown_method(&self) -> bool {
        matches!(self, Self::Parse(ParseError::UnknownMethod { .. }))
    }
}
