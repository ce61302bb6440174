//! Risk-free rate source trait definitions.

use perform_primitives::{Frequency, Timestamp};
use perform_series::{SeriesError, TimeSeries};

/// Errors that can occur while fetching a risk-free series.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Source has no data for the requested range.
    #[error("no data between {start} and {end}")]
    NoData {
        /// Requested start.
        start: Timestamp,
        /// Requested end.
        end: Timestamp,
    },

    /// Source returned data that is not a valid series.
    #[error("invalid series from source: {0}")]
    Series(#[from] SeriesError),

    /// Source-specific failure.
    #[error("source error: {0}")]
    Other(String),
}

/// Supplier of per-period risk-free returns.
///
/// Returned values are decimal returns per period of `freq`, already
/// de-annualized, so that they can be subtracted from asset returns of the
/// same frequency.
pub trait RiskFreeSource: Send + Sync {
    /// Label under which the returned series is registered.
    fn name(&self) -> &str;

    /// Risk-free returns covering `[start, end]` at `freq`.
    ///
    /// # Errors
    /// Returns `SourceError` if the source cannot supply the range.
    fn fetch(
        &self,
        start: Timestamp,
        end: Timestamp,
        freq: Frequency,
    ) -> Result<TimeSeries, SourceError>;
}
