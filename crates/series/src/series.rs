//! The canonical time-indexed series.

use perform_primitives::{Frequency, Timestamp};
use polars::prelude::*;

use crate::{SeriesError, freq_floor, infer_freq, normalize};

/// A single column of values indexed by unique, ascending timestamps.
///
/// Instances are immutable: every transformation returns a new series.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    name: String,
    index: Vec<Timestamp>,
    values: Vec<f64>,
    freq: Option<Frequency>,
}

/// Two series restricted to their shared timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct Aligned {
    /// Shared timestamps, ascending.
    pub index: Vec<Timestamp>,
    /// Values of the left series at the shared timestamps.
    pub left: Vec<f64>,
    /// Values of the right series at the shared timestamps.
    pub right: Vec<f64>,
    /// Observations present in only one of the two series.
    pub skipped: usize,
}

impl Aligned {
    /// Number of shared observations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if no observations are shared.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl TimeSeries {
    /// Create a series from parallel timestamps and values.
    ///
    /// Pairs are sorted by timestamp.
    ///
    /// # Errors
    /// Returns `SeriesError` if lengths differ or a timestamp repeats.
    pub fn new(
        name: impl Into<String>,
        index: Vec<Timestamp>,
        values: Vec<f64>,
    ) -> Result<Self, SeriesError> {
        if index.len() != values.len() {
            return Err(SeriesError::LengthMismatch { index: index.len(), values: values.len() });
        }

        let mut pairs: Vec<(Timestamp, f64)> = index.into_iter().zip(values).collect();
        pairs.sort_by_key(|(ts, _)| *ts);

        if let Some(dup) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(SeriesError::DuplicateTimestamp(dup[0].0));
        }

        let (index, values) = pairs.into_iter().unzip();
        Ok(Self { name: name.into(), index, values, freq: None })
    }

    /// Normalize a polars frame into a series.
    ///
    /// See [`normalize`] for the column resolution rules.
    ///
    /// # Errors
    /// Returns `SeriesError` if the frame cannot be normalized.
    pub fn from_frame(df: &DataFrame) -> Result<Self, SeriesError> {
        normalize(df)
    }

    /// Build from parts already known to be sorted and unique.
    pub(crate) fn from_sorted_parts(
        name: String,
        index: Vec<Timestamp>,
        values: Vec<f64>,
        freq: Option<Frequency>,
    ) -> Self {
        debug_assert_eq!(index.len(), values.len());
        debug_assert!(index.windows(2).all(|w| w[0] < w[1]));
        Self { name, index, values, freq }
    }

    /// State the native frequency instead of inferring it.
    #[must_use]
    pub fn with_freq(mut self, freq: Frequency) -> Self {
        self.freq = Some(freq);
        self
    }

    /// Same index and stated frequency carrying new values.
    ///
    /// # Errors
    /// Returns `SeriesError::LengthMismatch` if `values` differs in length.
    pub fn with_values(&self, values: Vec<f64>) -> Result<Self, SeriesError> {
        if values.len() != self.len() {
            return Err(SeriesError::LengthMismatch { index: self.len(), values: values.len() });
        }
        Ok(Self { name: self.name.clone(), index: self.index.clone(), values, freq: self.freq })
    }

    /// Rename the series.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Series name, usually the value column it was read from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Timestamps, ascending.
    #[must_use]
    pub fn index(&self) -> &[Timestamp] {
        &self.index
    }

    /// Values in timestamp order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First timestamp.
    #[must_use]
    pub fn start(&self) -> Option<Timestamp> {
        self.index.first().copied()
    }

    /// Last timestamp.
    #[must_use]
    pub fn end(&self) -> Option<Timestamp> {
        self.index.last().copied()
    }

    /// Elapsed calendar days between first and last observation.
    #[must_use]
    pub fn span_days(&self) -> f64 {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => (end - start).num_seconds() as f64 / 86_400.0,
            _ => 0.0,
        }
    }

    /// Explicitly stated frequency, if any.
    #[must_use]
    pub const fn stated_freq(&self) -> Option<Frequency> {
        self.freq
    }

    /// Stated frequency, or the inferred one when none was stated.
    ///
    /// # Errors
    /// Returns `SeriesError::AmbiguousFrequency` if inference fails.
    pub fn native_freq(&self) -> Result<Frequency, SeriesError> {
        match self.freq {
            Some(freq) => Ok(freq),
            None => infer_freq(&self.index),
        }
    }

    /// Native frequency, or a lower bound on it when it cannot be inferred.
    ///
    /// Series with missing periods or irregular gaps fall back to
    /// [`freq_floor`] of their index.
    #[must_use]
    pub fn resolution(&self) -> Frequency {
        self.native_freq().unwrap_or_else(|_| freq_floor(&self.index))
    }

    /// Observations within `[start, end]`, inclusive.
    #[must_use]
    pub fn between(&self, start: Timestamp, end: Timestamp) -> Self {
        let lo = self.index.partition_point(|ts| *ts < start);
        let hi = self.index.partition_point(|ts| *ts <= end).max(lo);
        Self::from_sorted_parts(
            self.name.clone(),
            self.index[lo..hi].to_vec(),
            self.values[lo..hi].to_vec(),
            self.freq,
        )
    }

    /// Inner join on timestamps.
    #[must_use]
    pub fn align(&self, other: &Self) -> Aligned {
        let mut index = Vec::new();
        let mut left = Vec::new();
        let mut right = Vec::new();

        let (mut i, mut j) = (0, 0);
        while i < self.len() && j < other.len() {
            match self.index[i].cmp(&other.index[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    index.push(self.index[i]);
                    left.push(self.values[i]);
                    right.push(other.values[j]);
                    i += 1;
                    j += 1;
                }
            }
        }

        let skipped = self.len() + other.len() - 2 * index.len();
        Aligned { index, left, right, skipped }
    }

    /// Convert to a frame with a `datetime` column and a value column.
    ///
    /// # Errors
    /// Returns `PolarsError` if the frame cannot be built.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Column::new("datetime".into(), self.index.clone()),
            Column::new(self.name.as_str().into(), self.values.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn ts(y: i32, m: u32, d: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn new_sorts_pairs() {
        let series = TimeSeries::new(
            "r",
            vec![ts(2020, 1, 3), ts(2020, 1, 1), ts(2020, 1, 2)],
            vec![3.0, 1.0, 2.0],
        )
        .unwrap();

        assert_eq!(series.index(), &[ts(2020, 1, 1), ts(2020, 1, 2), ts(2020, 1, 3)]);
        assert_eq!(series.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(series.start(), Some(ts(2020, 1, 1)));
        assert_eq!(series.end(), Some(ts(2020, 1, 3)));
        assert_eq!(series.span_days(), 2.0);
    }

    #[test]
    fn new_rejects_duplicates() {
        let err = TimeSeries::new("r", vec![ts(2020, 1, 1), ts(2020, 1, 1)], vec![1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, SeriesError::DuplicateTimestamp(_)));
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let err = TimeSeries::new("r", vec![ts(2020, 1, 1)], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, SeriesError::LengthMismatch { index: 1, values: 2 }));
    }

    #[test]
    fn with_values_keeps_index() {
        let series = TimeSeries::new("r", vec![ts(2020, 1, 1), ts(2020, 1, 2)], vec![1.0, 2.0])
            .unwrap()
            .with_freq(Frequency::Daily);

        let doubled = series.with_values(vec![2.0, 4.0]).unwrap();
        assert_eq!(doubled.index(), series.index());
        assert_eq!(doubled.stated_freq(), Some(Frequency::Daily));
        assert!(series.with_values(vec![1.0]).is_err());
    }

    #[test]
    fn between_is_inclusive() {
        let series = TimeSeries::new(
            "r",
            (1..=5).map(|d| ts(2020, 1, d)).collect(),
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
        )
        .unwrap();

        let clipped = series.between(ts(2020, 1, 2), ts(2020, 1, 4));
        assert_eq!(clipped.values(), &[2.0, 3.0, 4.0]);

        let empty = series.between(ts(2021, 1, 1), ts(2021, 2, 1));
        assert!(empty.is_empty());
    }

    #[test]
    fn align_inner_join() {
        let a = TimeSeries::new(
            "a",
            vec![ts(2020, 1, 1), ts(2020, 1, 2), ts(2020, 1, 3)],
            vec![1.0, 2.0, 3.0],
        )
        .unwrap();
        let b = TimeSeries::new(
            "b",
            vec![ts(2020, 1, 2), ts(2020, 1, 3), ts(2020, 1, 4), ts(2020, 1, 5)],
            vec![20.0, 30.0, 40.0, 50.0],
        )
        .unwrap();

        let aligned = a.align(&b);
        assert_eq!(aligned.len(), 2);
        assert_eq!(aligned.left, vec![2.0, 3.0]);
        assert_eq!(aligned.right, vec![20.0, 30.0]);
        assert_eq!(aligned.skipped, 3);
    }

    #[test]
    fn frame_round_trip() {
        let series = TimeSeries::new(
            "returns",
            vec![ts(2020, 1, 1), ts(2020, 1, 2), ts(2020, 1, 3)],
            vec![0.0, -0.1, 0.3],
        )
        .unwrap();

        let df = series.to_frame().unwrap();
        assert_eq!(df.width(), 2);
        assert_eq!(TimeSeries::from_frame(&df).unwrap(), series);
    }
}
