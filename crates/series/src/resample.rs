//! Resampling to coarser frequencies.

use perform_math::compound;
use perform_primitives::{CompoundMethod, Frequency};
use tracing::debug;

use crate::{SeriesError, TimeSeries, period_end};

/// Compound a return series into `freq` periods.
///
/// Observations are grouped by the calendar period that contains them
/// (see [`period_end`]) and each group is compounded with `method`.
/// Periods without observations are omitted rather than filled.
///
/// Series whose cadence cannot be inferred are checked against the lower
/// bound from [`TimeSeries::resolution`].
///
/// # Errors
/// Returns `FrequencyTooFine` if `freq` is finer than the series'
/// resolution.
pub fn to_freq(
    series: &TimeSeries,
    freq: Frequency,
    method: CompoundMethod,
) -> Result<TimeSeries, SeriesError> {
    let native = series.resolution();
    if freq < native {
        return Err(SeriesError::FrequencyTooFine { target: freq, native });
    }

    let compound_fn = compound(method);
    let mut index = Vec::new();
    let mut values = Vec::new();
    let mut bucket: Vec<f64> = Vec::new();
    let mut current = None;

    for (ts, value) in series.index().iter().zip(series.values()) {
        let label = period_end(freq, *ts);
        if current.is_some_and(|c| c != label) {
            values.push(compound_fn(&bucket));
            bucket.clear();
        }
        if current != Some(label) {
            index.push(label);
            current = Some(label);
        }
        bucket.push(*value);
    }
    if !bucket.is_empty() {
        values.push(compound_fn(&bucket));
    }

    debug!(
        series = series.name(),
        from = %native,
        to = %freq,
        %method,
        input = series.len(),
        output = values.len(),
        "resampled series"
    );

    Ok(TimeSeries::from_sorted_parts(series.name().to_string(), index, values, Some(freq)))
}

impl TimeSeries {
    /// Compound into `freq` periods. See [`to_freq`].
    ///
    /// # Errors
    /// Returns `SeriesError` if `freq` is finer than the native frequency.
    pub fn to_freq(&self, freq: Frequency, method: CompoundMethod) -> Result<Self, SeriesError> {
        to_freq(self, freq, method)
    }

    /// Like [`TimeSeries::to_freq`], taking names as given by a caller.
    ///
    /// The method is validated before the frequency.
    ///
    /// # Errors
    /// Returns `SeriesError::Parse` for an unknown method or frequency name.
    pub fn to_freq_named(&self, freq: &str, method: &str) -> Result<Self, SeriesError> {
        let method: CompoundMethod = method.parse()?;
        let freq: Frequency = freq.parse()?;
        to_freq(self, freq, method)
    }

    /// Weekly returns (weeks ending Sunday).
    ///
    /// # Errors
    /// Returns `SeriesError` if the series is coarser than weekly.
    pub fn to_week(&self, method: CompoundMethod) -> Result<Self, SeriesError> {
        to_freq(self, Frequency::Weekly, method)
    }

    /// Monthly returns.
    ///
    /// # Errors
    /// Returns `SeriesError` if the series is coarser than monthly.
    pub fn to_month(&self, method: CompoundMethod) -> Result<Self, SeriesError> {
        to_freq(self, Frequency::Monthly, method)
    }

    /// Quarterly returns.
    ///
    /// # Errors
    /// Returns `SeriesError` if the series is coarser than quarterly.
    pub fn to_quarter(&self, method: CompoundMethod) -> Result<Self, SeriesError> {
        to_freq(self, Frequency::Quarterly, method)
    }

    /// Annual returns.
    ///
    /// # Errors
    /// Returns `SeriesError` if the series is coarser than annual.
    pub fn to_year(&self, method: CompoundMethod) -> Result<Self, SeriesError> {
        to_freq(self, Frequency::Annual, method)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
    use perform_math::compound_geometric;
    use perform_primitives::Timestamp;
    use rstest::rstest;

    use super::*;

    fn ts(y: i32, m: u32, d: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_time(NaiveTime::MIN)
    }

    /// Business-day returns from 2020-01-01 cycling through a fixed pattern.
    fn business_series(n: usize) -> TimeSeries {
        let pattern = [0.01, -0.005, 0.003, 0.02, -0.012, 0.007, -0.001];
        let index: Vec<Timestamp> = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .iter_days()
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .take(n)
            .map(|d| d.and_time(NaiveTime::MIN))
            .collect();
        let values = (0..n).map(|i| pattern[i % pattern.len()]).collect();
        TimeSeries::new("asset", index, values).unwrap()
    }

    #[test]
    fn weekly_buckets_end_on_sunday() {
        let series = business_series(10);
        let weekly = series.to_week(CompoundMethod::Arithmetic).unwrap();

        // Wed 1st - Fri 3rd, Mon 6th - Fri 10th, Mon 13th - Tue 14th
        assert_eq!(weekly.index(), &[ts(2020, 1, 5), ts(2020, 1, 12), ts(2020, 1, 19)]);
        assert_relative_eq!(weekly.values()[0], 0.01 - 0.005 + 0.003, epsilon = 1e-12);
        assert_eq!(weekly.stated_freq(), Some(Frequency::Weekly));
        assert_eq!(weekly.name(), "asset");
    }

    #[rstest]
    #[case(Frequency::Weekly)]
    #[case(Frequency::Monthly)]
    #[case(Frequency::Quarterly)]
    #[case(Frequency::Annual)]
    fn geometric_resampling_preserves_total(#[case] freq: Frequency) {
        let series = business_series(300);
        let resampled = series.to_freq(freq, CompoundMethod::Geometric).unwrap();
        assert_relative_eq!(
            compound_geometric(resampled.values()),
            compound_geometric(series.values()),
            epsilon = 1e-12
        );
    }

    #[test]
    fn arithmetic_resampling_preserves_sum() {
        let series = business_series(120);
        let monthly = series.to_month(CompoundMethod::Arithmetic).unwrap();
        let total: f64 = monthly.values().iter().sum();
        let expected: f64 = series.values().iter().sum();
        assert_relative_eq!(total, expected, epsilon = 1e-12);
    }

    #[test]
    fn empty_periods_are_omitted() {
        let series = TimeSeries::new(
            "r",
            vec![ts(2020, 1, 31), ts(2020, 2, 29), ts(2020, 5, 31), ts(2020, 6, 30)],
            vec![0.01, 0.02, 0.03, 0.04],
        )
        .unwrap()
        .with_freq(Frequency::Monthly);

        let quarterly = series.to_quarter(CompoundMethod::Geometric).unwrap();
        assert_eq!(quarterly.index(), &[ts(2020, 3, 31), ts(2020, 6, 30)]);
        assert_relative_eq!(quarterly.values()[0], 1.01 * 1.02 - 1.0, epsilon = 1e-12);
        assert_relative_eq!(quarterly.values()[1], 1.03 * 1.04 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn same_frequency_is_identity() {
        let series = business_series(30);
        let resampled = series.to_freq(Frequency::BusinessDay, CompoundMethod::Geometric).unwrap();
        assert_eq!(resampled.index(), series.index());
        for (a, b) in resampled.values().iter().zip(series.values()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-15);
        }
    }

    #[test]
    fn finer_target_fails() {
        let series = business_series(30);
        let err = series.to_freq(Frequency::Hourly, CompoundMethod::Geometric).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::FrequencyTooFine {
                target: Frequency::Hourly,
                native: Frequency::BusinessDay
            }
        ));

        let monthly = series.to_month(CompoundMethod::Geometric).unwrap();
        assert!(matches!(
            monthly.to_week(CompoundMethod::Geometric),
            Err(SeriesError::FrequencyTooFine { .. })
        ));
    }

    #[test]
    fn unknown_method_name_fails() {
        let series = business_series(30);
        let err = series.to_freq_named("M", "contnuuous").unwrap_err();
        assert!(err.is_unknown_method());

        let err = series.to_freq_named("fortnight", "geometric").unwrap_err();
        assert!(!err.is_unknown_method());
        assert!(matches!(err, SeriesError::Parse(_)));
    }

    #[test]
    fn named_resampling() {
        let series = business_series(60);
        let by_name = series.to_freq_named("M", "continuous").unwrap();
        let by_enum = series.to_freq(Frequency::Monthly, CompoundMethod::Continuous).unwrap();
        assert_eq!(by_name, by_enum);
    }

    #[test]
    fn irregular_daily_series_resamples() {
        // January 2020 with Wednesday the 15th missing, weekends included
        let index: Vec<Timestamp> =
            (1..=31).filter(|d| *d != 15).map(|d| ts(2020, 1, d)).collect();
        let values = vec![0.001; index.len()];
        let series = TimeSeries::new("r", index, values).unwrap();
        assert!(series.native_freq().is_err());
        assert_eq!(series.resolution(), Frequency::BusinessDay);

        let monthly = series.to_month(CompoundMethod::Geometric).unwrap();
        assert_eq!(monthly.index(), &[ts(2020, 1, 31)]);
        assert_relative_eq!(monthly.values()[0], 1.001_f64.powi(30) - 1.0, epsilon = 1e-12);
        assert!(series.to_freq(Frequency::Daily, CompoundMethod::Geometric).is_ok());
        assert!(matches!(
            series.to_freq(Frequency::Hourly, CompoundMethod::Geometric),
            Err(SeriesError::FrequencyTooFine {
                target: Frequency::Hourly,
                native: Frequency::BusinessDay
            })
        ));
    }

    #[test]
    fn monthly_series_with_missing_month() {
        let series = TimeSeries::new(
            "r",
            vec![
                ts(2020, 1, 31),
                ts(2020, 2, 29),
                ts(2020, 3, 31),
                ts(2020, 5, 31),
                ts(2020, 6, 30),
            ],
            vec![0.01, 0.02, 0.03, 0.04, 0.05],
        )
        .unwrap();
        assert!(series.native_freq().is_err());

        let quarterly = series.to_quarter(CompoundMethod::Geometric).unwrap();
        assert_eq!(quarterly.index(), &[ts(2020, 3, 31), ts(2020, 6, 30)]);
        assert_relative_eq!(quarterly.values()[1], 1.04 * 1.05 - 1.0, epsilon = 1e-12);
        assert_eq!(series.to_month(CompoundMethod::Geometric).unwrap().len(), 5);
        assert!(matches!(
            series.to_week(CompoundMethod::Geometric),
            Err(SeriesError::FrequencyTooFine { native: Frequency::Monthly, .. })
        ));
    }

    #[test]
    fn mixed_cadences_resample_at_their_finest_gap() {
        let series = TimeSeries::new(
            "r",
            vec![ts(2020, 1, 1), ts(2020, 1, 2), ts(2020, 6, 1), ts(2020, 7, 1)],
            vec![0.01, 0.02, 0.03, 0.04],
        )
        .unwrap();
        let monthly = series.to_month(CompoundMethod::Arithmetic).unwrap();
        assert_eq!(monthly.index(), &[ts(2020, 1, 31), ts(2020, 6, 30), ts(2020, 7, 31)]);
        assert_relative_eq!(monthly.values()[0], 0.03, epsilon = 1e-12);
    }
}
