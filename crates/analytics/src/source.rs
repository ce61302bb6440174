//! Constant-rate risk-free source.

use chrono::{NaiveTime, TimeDelta};
use perform_primitives::{Frequency, Timestamp};
use perform_series::{TimeSeries, period_end};
use perform_traits::{RiskFreeSource, SourceError};

/// Risk-free series paying a fixed annual rate in every period.
///
/// The per-period rate is the geometric de-annualization
/// `(1 + annual_rate)^(1 / periods_per_year) - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantRate {
    name: String,
    annual_rate: f64,
}

impl ConstantRate {
    /// Create a source paying `annual_rate` per year.
    #[must_use]
    pub fn new(name: impl Into<String>, annual_rate: f64) -> Self {
        Self { name: name.into(), annual_rate }
    }

    /// The zero-rate source used when no risk-free series is registered.
    #[must_use]
    pub fn zero() -> Self {
        Self::new("zero", 0.0)
    }

    /// Annual rate.
    #[must_use]
    pub const fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    /// Rate earned in one period of `freq`.
    #[must_use]
    pub fn period_rate(&self, freq: Frequency) -> f64 {
        (1.0 + self.annual_rate).powf(1.0 / freq.periods_per_year()) - 1.0
    }
}

impl RiskFreeSource for ConstantRate {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(
        &self,
        start: Timestamp,
        end: Timestamp,
        freq: Frequency,
    ) -> Result<TimeSeries, SourceError> {
        let index = period_labels(start, end, freq);
        if index.is_empty() {
            return Err(SourceError::NoData { start, end });
        }
        let values = vec![self.period_rate(freq); index.len()];
        Ok(TimeSeries::new(self.name.clone(), index, values)?.with_freq(freq))
    }
}

/// Labels of every `freq` period touching `[start, end]`.
fn period_labels(start: Timestamp, end: Timestamp, freq: Frequency) -> Vec<Timestamp> {
    if end < start {
        return Vec::new();
    }

    let mut labels: Vec<Timestamp> = Vec::new();
    if freq.is_intraday() {
        let step =
            if freq == Frequency::Minute { TimeDelta::minutes(1) } else { TimeDelta::hours(1) };
        let mut cursor = period_end(freq, start);
        while cursor <= end {
            labels.push(cursor);
            cursor += step;
        }
        return labels;
    }

    for day in start.date().iter_days().take_while(|d| *d <= end.date()) {
        let label = period_end(freq, day.and_time(NaiveTime::MIN));
        if labels.last() != Some(&label) {
            labels.push(label);
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    use super::*;

    fn ts(y: i32, m: u32, d: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn zero_rate_is_zero_everywhere() {
        let series = ConstantRate::zero()
            .fetch(ts(2020, 1, 15), ts(2020, 6, 10), Frequency::Monthly)
            .unwrap();
        assert_eq!(series.len(), 6);
        assert_eq!(series.index()[0], ts(2020, 1, 31));
        assert_eq!(series.index()[5], ts(2020, 6, 30));
        assert!(series.values().iter().all(|v| *v == 0.0));
        assert_eq!(series.stated_freq(), Some(Frequency::Monthly));
    }

    #[test]
    fn period_rate_compounds_to_annual() {
        let source = ConstantRate::new("cash", 0.05);
        let monthly = source.period_rate(Frequency::Monthly);
        assert_relative_eq!((1.0 + monthly).powi(12) - 1.0, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn business_days_skip_weekends() {
        // Friday through Tuesday
        let series = ConstantRate::zero()
            .fetch(ts(2020, 1, 3), ts(2020, 1, 7), Frequency::BusinessDay)
            .unwrap();
        assert_eq!(series.index(), &[ts(2020, 1, 3), ts(2020, 1, 6), ts(2020, 1, 7)]);
    }

    #[test]
    fn inverted_range_has_no_data() {
        let err = ConstantRate::zero().fetch(ts(2020, 2, 1), ts(2020, 1, 1), Frequency::Daily);
        assert!(matches!(err, Err(SourceError::NoData { .. })));
    }
}
