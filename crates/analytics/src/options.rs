//! Per-metric configuration.

use perform_primitives::{
    CompoundMethod, CorrelationMethod, Frequency, Label, ParseError, VolatilityMethod,
};
use polars::prelude::AnyValue;

/// Frequency used for correlation and Sharpe when none is given.
pub const DEFAULT_PAIRWISE_FREQ: Frequency = Frequency::Monthly;

/// Configuration for [`get_total_return`](crate::ReturnSeries::get_total_return).
#[derive(Debug, Clone)]
pub struct TotalReturnOptions {
    /// Compounding method.
    pub method: CompoundMethod,
    /// Add one row per benchmark.
    pub include_benchmarks: bool,
    /// Add metadata columns.
    pub meta: bool,
}

impl Default for TotalReturnOptions {
    fn default() -> Self {
        Self { method: CompoundMethod::Geometric, include_benchmarks: true, meta: false }
    }
}

/// Configuration for [`get_annualized_return`](crate::ReturnSeries::get_annualized_return).
#[derive(Debug, Clone)]
pub struct AnnualizedReturnOptions {
    /// Compounding method, used both for the total and its annualization.
    pub method: CompoundMethod,
    /// Add one row per benchmark.
    pub include_benchmarks: bool,
    /// Add metadata columns.
    pub meta: bool,
    /// Observations per year. Derived from the sample span when `None`.
    pub periods_per_year: Option<f64>,
}

impl Default for AnnualizedReturnOptions {
    fn default() -> Self {
        Self {
            method: CompoundMethod::Geometric,
            include_benchmarks: true,
            meta: false,
            periods_per_year: None,
        }
    }
}

/// Configuration for
/// [`get_annualized_volatility`](crate::ReturnSeries::get_annualized_volatility).
#[derive(Debug, Clone)]
pub struct VolatilityOptions {
    /// Resample to this frequency first. `None` keeps the native cadence.
    pub freq: Option<Frequency>,
    /// Sample (ddof 1) or population (ddof 0) standard deviation.
    pub method: VolatilityMethod,
    /// Add one row per benchmark.
    pub include_benchmarks: bool,
    /// Add metadata columns.
    pub meta: bool,
    /// Observations per year. Taken from `freq` when set, otherwise derived
    /// from the sample span.
    pub periods_per_year: Option<f64>,
}

impl Default for VolatilityOptions {
    fn default() -> Self {
        Self {
            freq: None,
            method: VolatilityMethod::Sample,
            include_benchmarks: true,
            meta: false,
            periods_per_year: None,
        }
    }
}

impl VolatilityOptions {
    /// Set the method from its name.
    ///
    /// # Errors
    /// Returns `ParseError::UnknownMethod` unless `name` is `sample` or
    /// `population`.
    pub fn with_method_name(mut self, name: &str) -> Result<Self, ParseError> {
        self.method = name.parse()?;
        Ok(self)
    }
}

/// Configuration for [`get_correlation`](crate::ReturnSeries::get_correlation).
#[derive(Debug, Clone)]
pub struct CorrelationOptions {
    /// Restrict to a single benchmark. All benchmarks when `None`.
    pub benchmark: Option<Label>,
    /// Common frequency both sides are resampled to.
    pub freq: Frequency,
    /// Correlation coefficient.
    pub method: CorrelationMethod,
    /// Add metadata columns.
    pub meta: bool,
}

impl Default for CorrelationOptions {
    fn default() -> Self {
        Self {
            benchmark: None,
            freq: DEFAULT_PAIRWISE_FREQ,
            method: CorrelationMethod::Pearson,
            meta: false,
        }
    }
}

impl CorrelationOptions {
    /// Select the benchmark from a frame cell.
    ///
    /// # Errors
    /// Returns `ParseError::WrongArgumentType` if the cell is not a string.
    pub fn with_benchmark_value(mut self, value: &AnyValue<'_>) -> Result<Self, ParseError> {
        self.benchmark = Some(Label::try_from(value)?);
        Ok(self)
    }
}

/// Configuration for [`get_sharpe`](crate::ReturnSeries::get_sharpe).
#[derive(Debug, Clone)]
pub struct SharpeOptions {
    /// Frequency of the excess returns.
    pub freq: Frequency,
    /// Risk-free series to subtract. The first registered one when `None`,
    /// or a zero rate if none is registered.
    pub risk_free: Option<Label>,
    /// Add one row per benchmark.
    pub include_benchmarks: bool,
    /// Add metadata columns.
    pub meta: bool,
}

impl Default for SharpeOptions {
    fn default() -> Self {
        Self { freq: DEFAULT_PAIRWISE_FREQ, risk_free: None, include_benchmarks: true, meta: false }
    }
}

impl SharpeOptions {
    /// Select the risk-free series from a frame cell.
    ///
    /// # Errors
    /// Returns `ParseError::WrongArgumentType` if the cell is not a string.
    pub fn with_risk_free_value(mut self, value: &AnyValue<'_>) -> Result<Self, ParseError> {
        self.risk_free = Some(Label::try_from(value)?);
        Ok(self)
    }
}
