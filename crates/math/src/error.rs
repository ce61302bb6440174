//! Error types for mathematical operations.

/// Errors that can occur during mathematical operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    /// Empty data.
    #[error("empty data provided")]
    EmptyData,

    /// Not enough observations for the requested statistic.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Paired inputs differ in length.
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the left input.
        left: usize,
        /// Length of the right input.
        right: usize,
    },

    /// Elapsed span is zero or negative.
    #[error("non-positive time span: {0} days")]
    NonPositiveSpan(f64),
}
