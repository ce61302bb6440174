//! The return series aggregate.

use indexmap::IndexMap;
use perform_math::{
    MathError, annualize_return, annualize_volatility, compound, compound_geometric, correlation,
    cumseries, samples_per_year, std_dev,
};
use perform_primitives::{CompoundMethod, Frequency, Label, Timestamp};
use perform_series::{TimeSeries, period_end};
use perform_traits::RiskFreeSource;
use polars::prelude::DataFrame;
use tracing::{debug, info};

use crate::{
    AnalyticsError, AnnualizedReturnOptions, ConstantRate, CorrelationOptions, MetricMeta,
    MetricResult, SharpeOptions, TotalReturnOptions, VolatilityOptions,
};

/// A subject return series with labelled benchmark and risk-free companions.
///
/// Companions are kept in insertion order, which fixes the row order of
/// every [`MetricResult`]. Adding a companion under an existing label
/// replaces it in place.
#[derive(Debug, Clone)]
pub struct ReturnSeries {
    series: TimeSeries,
    benchmarks: IndexMap<Label, TimeSeries>,
    risk_free: IndexMap<Label, TimeSeries>,
}

/// A series taking part in a metric, clipped to the subject's range.
struct Member {
    name: String,
    series: TimeSeries,
    skipped: usize,
}

impl Member {
    fn meta(&self, method: impl ToString, freq: Option<Frequency>) -> MetricMeta {
        MetricMeta {
            method: method.to_string(),
            freq,
            start: self.series.start(),
            end: self.series.end(),
            total: self.series.len(),
            skipped: self.skipped,
        }
    }
}

impl ReturnSeries {
    /// Wrap a subject series with no companions.
    #[must_use]
    pub fn new(series: TimeSeries) -> Self {
        Self { series, benchmarks: IndexMap::new(), risk_free: IndexMap::new() }
    }

    /// Normalize a frame into the subject series.
    ///
    /// # Errors
    /// Returns `AnalyticsError::Series` if the frame cannot be normalized.
    pub fn from_frame(df: &DataFrame) -> Result<Self, AnalyticsError> {
        Ok(Self::new(TimeSeries::from_frame(df)?))
    }

    /// Subject series.
    #[must_use]
    pub const fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Subject name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.series.name()
    }

    /// Registered benchmarks in insertion order.
    #[must_use]
    pub const fn benchmarks(&self) -> &IndexMap<Label, TimeSeries> {
        &self.benchmarks
    }

    /// Registered risk-free series in insertion order.
    #[must_use]
    pub const fn risk_free(&self) -> &IndexMap<Label, TimeSeries> {
        &self.risk_free
    }

    /// Register a benchmark under `label`, or under the series name.
    pub fn add_benchmark(&mut self, series: TimeSeries, label: Option<Label>) {
        insert(&mut self.benchmarks, "benchmark", series, label);
    }

    /// Normalize a frame and register it as a benchmark.
    ///
    /// # Errors
    /// Returns `AnalyticsError::Series` if the frame cannot be normalized.
    pub fn add_benchmark_frame(
        &mut self,
        df: &DataFrame,
        label: Option<Label>,
    ) -> Result<(), AnalyticsError> {
        self.add_benchmark(TimeSeries::from_frame(df)?, label);
        Ok(())
    }

    /// Register a risk-free series under `label`, or under the series name.
    pub fn add_risk_free(&mut self, series: TimeSeries, label: Option<Label>) {
        insert(&mut self.risk_free, "risk-free", series, label);
    }

    /// Normalize a frame and register it as a risk-free series.
    ///
    /// # Errors
    /// Returns `AnalyticsError::Series` if the frame cannot be normalized.
    pub fn add_risk_free_frame(
        &mut self,
        df: &DataFrame,
        label: Option<Label>,
    ) -> Result<(), AnalyticsError> {
        self.add_risk_free(TimeSeries::from_frame(df)?, label);
        Ok(())
    }

    /// Fetch a risk-free series covering the subject at `freq` and register
    /// it under the source's name.
    ///
    /// # Errors
    /// Returns `AnalyticsError` if the subject is empty or the source fails.
    pub fn add_risk_free_source(
        &mut self,
        source: &dyn RiskFreeSource,
        freq: Frequency,
    ) -> Result<(), AnalyticsError> {
        let (start, end) = self.range()?;
        let series = source.fetch(start, end, freq)?;
        info!(source = source.name(), observations = series.len(), "fetched risk-free series");
        self.add_risk_free(series, Some(Label::new(source.name())));
        Ok(())
    }

    /// Compounded return of the subject and, optionally, each benchmark.
    ///
    /// # Errors
    /// Returns `AnalyticsError` if the subject is empty or a benchmark does
    /// not overlap it.
    pub fn get_total_return(
        &self,
        opts: &TotalReturnOptions,
    ) -> Result<MetricResult, AnalyticsError> {
        let compound_fn = compound(opts.method);
        let mut result = MetricResult::new(MetricResult::TOTAL_RETURN, opts.meta);

        for member in self.members(opts.include_benchmarks)? {
            let value = compound_fn(member.series.values());
            let meta = member.meta(opts.method, member.series.native_freq().ok());
            result.push(member.name, value, meta);
        }
        Ok(result)
    }

    /// Total return converted to an annual rate.
    ///
    /// Periods per year default to `count / (span_days / 365.25)`, so the
    /// geometric rate is `(1 + total)^(365.25 / span_days) - 1`.
    ///
    /// # Errors
    /// Returns `AnalyticsError::Math` if a series spans no time and no
    /// periods-per-year override is given.
    pub fn get_annualized_return(
        &self,
        opts: &AnnualizedReturnOptions,
    ) -> Result<MetricResult, AnalyticsError> {
        let compound_fn = compound(opts.method);
        let mut result = MetricResult::new(MetricResult::ANNUALIZED_RETURN, opts.meta);

        for member in self.members(opts.include_benchmarks)? {
            let values = member.series.values();
            let ppy = match opts.periods_per_year {
                Some(ppy) => ppy,
                None => samples_per_year(values.len(), member.series.span_days())?,
            };
            let value = annualize_return(compound_fn(values), opts.method, values.len(), ppy)?;
            let meta = member.meta(opts.method, member.series.native_freq().ok());
            result.push(member.name, value, meta);
        }
        Ok(result)
    }

    /// Annualized standard deviation of returns.
    ///
    /// With `freq` set, each series is first compounded (geometrically) into
    /// `freq` periods and scaled by `freq`'s periods per year. Otherwise the
    /// native frequency's periods per year are used, falling back to the
    /// sample-derived rate when the native frequency cannot be inferred.
    ///
    /// # Errors
    /// Returns `AnalyticsError` if `freq` is finer than a series' native
    /// frequency or too few observations remain.
    pub fn get_annualized_volatility(
        &self,
        opts: &VolatilityOptions,
    ) -> Result<MetricResult, AnalyticsError> {
        let mut result = MetricResult::new(MetricResult::ANNUALIZED_VOLATILITY, opts.meta);

        for member in self.members(opts.include_benchmarks)? {
            let (series, freq) = match opts.freq {
                Some(freq) => {
                    (member.series.to_freq(freq, CompoundMethod::Geometric)?, Some(freq))
                }
                None => (member.series.clone(), member.series.native_freq().ok()),
            };

            let ppy = match (opts.periods_per_year, freq) {
                (Some(ppy), _) => ppy,
                (None, Some(freq)) => freq.periods_per_year(),
                (None, None) => samples_per_year(series.len(), series.span_days())?,
            };

            let per_period = std_dev(series.values(), opts.method.ddof())?;
            let member = Member { series, ..member };
            let meta = member.meta(opts.method, freq);
            result.push(member.name, annualize_volatility(per_period, ppy), meta);
        }
        Ok(result)
    }

    /// Correlation of the subject against each benchmark, or the one named.
    ///
    /// Both sides are compounded into `freq` periods and inner-joined on
    /// period labels; `skipped` counts periods present on one side only.
    ///
    /// # Errors
    /// * `NoBenchmark` if no benchmark is registered.
    /// * `UnknownLabel` if the named benchmark is not registered.
    pub fn get_correlation(
        &self,
        opts: &CorrelationOptions,
    ) -> Result<MetricResult, AnalyticsError> {
        if self.benchmarks.is_empty() {
            return Err(AnalyticsError::NoBenchmark);
        }

        let selected: Vec<(&Label, &TimeSeries)> = match &opts.benchmark {
            Some(label) => vec![lookup(&self.benchmarks, "benchmark", label)?],
            None => self.benchmarks.iter().collect(),
        };

        let subject = self.series.to_freq(opts.freq, CompoundMethod::Geometric)?;
        let mut result = MetricResult::new(MetricResult::CORRELATION, opts.meta);

        for (label, benchmark) in selected {
            let benchmark = benchmark.to_freq(opts.freq, CompoundMethod::Geometric)?;
            let aligned = subject.align(&benchmark);
            debug!(
                benchmark = %label,
                used = aligned.len(),
                skipped = aligned.skipped,
                "aligned benchmark"
            );

            let value = correlation(opts.method, &aligned.left, &aligned.right)?;
            let meta = MetricMeta {
                method: opts.method.to_string(),
                freq: Some(opts.freq),
                start: aligned.index.first().copied(),
                end: aligned.index.last().copied(),
                total: aligned.len(),
                skipped: aligned.skipped,
            };
            result.push(label.as_str(), value, meta);
        }
        Ok(result)
    }

    /// Annualized Sharpe ratio of excess returns over a risk-free series.
    ///
    /// Excess returns are the per-period difference between a series and
    /// the risk-free series, both compounded into `freq` periods. The ratio
    /// is the geometric annualized excess return over the annualized sample
    /// volatility of excess returns, both scaled by `freq`'s periods per
    /// year. A zero rate is used when no risk-free series is registered.
    ///
    /// Returns NaN for a series whose excess returns are constant, such as
    /// one identical to the risk-free series.
    ///
    /// # Errors
    /// * `UnknownLabel` if the named risk-free series is not registered.
    /// * `Math` if fewer than two excess returns remain.
    pub fn get_sharpe(&self, opts: &SharpeOptions) -> Result<MetricResult, AnalyticsError> {
        let (start, end) = self.range()?;
        let risk_free = match &opts.risk_free {
            Some(label) => Some(lookup(&self.risk_free, "risk-free", label)?),
            None => self.risk_free.first(),
        };
        let risk_free = match risk_free {
            Some((_, series)) => series
                .to_freq(opts.freq, CompoundMethod::Geometric)?
                .between(period_end(opts.freq, start), period_end(opts.freq, end)),
            None => ConstantRate::zero().fetch(start, end, opts.freq)?,
        };

        let ppy = opts.freq.periods_per_year();
        let mut result = MetricResult::new(MetricResult::SHARPE_RATIO, opts.meta);

        for member in self.members(opts.include_benchmarks)? {
            let series = member.series.to_freq(opts.freq, CompoundMethod::Geometric)?;
            let aligned = series.align(&risk_free);
            let excess: Vec<f64> =
                aligned.left.iter().zip(&aligned.right).map(|(r, rf)| r - rf).collect();
            if excess.is_empty() {
                return Err(AnalyticsError::NoOverlap(risk_free.name().to_string()));
            }

            let annual_return = annualize_return(
                compound_geometric(&excess),
                CompoundMethod::Geometric,
                excess.len(),
                ppy,
            )?;
            let annual_vol = annualize_volatility(std_dev(&excess, 1)?, ppy);

            let meta = MetricMeta {
                method: CompoundMethod::Geometric.to_string(),
                freq: Some(opts.freq),
                start: aligned.index.first().copied(),
                end: aligned.index.last().copied(),
                total: aligned.len(),
                skipped: aligned.skipped,
            };
            let ratio = if annual_vol > 0.0 { annual_return / annual_vol } else { f64::NAN };
            result.push(member.name, ratio, meta);
        }
        Ok(result)
    }

    /// Running compounded return of the subject.
    ///
    /// # Errors
    /// Returns `AnalyticsError::Series` if the series cannot be rebuilt.
    pub fn cumulative(&self, method: CompoundMethod) -> Result<TimeSeries, AnalyticsError> {
        let values: Vec<f64> = cumseries(method, self.series.values()).collect();
        Ok(self.series.with_values(values)?)
    }

    /// Subject compounded into weeks ending Sunday.
    ///
    /// # Errors
    /// Returns `AnalyticsError::Series` if the subject is coarser than weekly.
    pub fn to_week(&self, method: CompoundMethod) -> Result<TimeSeries, AnalyticsError> {
        Ok(self.series.to_week(method)?)
    }

    /// Subject compounded into months.
    ///
    /// # Errors
    /// Returns `AnalyticsError::Series` if the subject is coarser than monthly.
    pub fn to_month(&self, method: CompoundMethod) -> Result<TimeSeries, AnalyticsError> {
        Ok(self.series.to_month(method)?)
    }

    /// Subject compounded into quarters.
    ///
    /// # Errors
    /// Returns `AnalyticsError::Series` if the subject is coarser than quarterly.
    pub fn to_quarter(&self, method: CompoundMethod) -> Result<TimeSeries, AnalyticsError> {
        Ok(self.series.to_quarter(method)?)
    }

    /// Subject compounded into years.
    ///
    /// # Errors
    /// Returns `AnalyticsError::Series` if the native frequency is unknown.
    pub fn to_year(&self, method: CompoundMethod) -> Result<TimeSeries, AnalyticsError> {
        Ok(self.series.to_year(method)?)
    }

    /// First and last subject timestamps.
    fn range(&self) -> Result<(Timestamp, Timestamp), AnalyticsError> {
        match (self.series.start(), self.series.end()) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(MathError::EmptyData.into()),
        }
    }

    /// Subject followed by benchmarks clipped to the subject's range.
    fn members(&self, include_benchmarks: bool) -> Result<Vec<Member>, AnalyticsError> {
        let (start, end) = self.range()?;
        let mut members =
            vec![Member { name: self.name().to_string(), series: self.series.clone(), skipped: 0 }];

        if include_benchmarks {
            for (label, benchmark) in &self.benchmarks {
                let clipped = benchmark.between(start, end);
                if clipped.is_empty() {
                    return Err(AnalyticsError::NoOverlap(label.to_string()));
                }
                let skipped = benchmark.len() - clipped.len();
                members.push(Member { name: label.to_string(), series: clipped, skipped });
            }
        }
        Ok(members)
    }
}

fn insert(
    registry: &mut IndexMap<Label, TimeSeries>,
    kind: &'static str,
    series: TimeSeries,
    label: Option<Label>,
) {
    let label = label.unwrap_or_else(|| Label::new(series.name()));
    if registry.insert(label.clone(), series).is_some() {
        debug!(kind, %label, "replaced series");
    }
}

fn lookup<'a>(
    registry: &'a IndexMap<Label, TimeSeries>,
    kind: &'static str,
    label: &Label,
) -> Result<(&'a Label, &'a TimeSeries), AnalyticsError> {
    registry
        .get_key_value(label)
        .ok_or_else(|| AnalyticsError::UnknownLabel { kind, label: label.to_string() })
}
