//! Metric output tables.

use perform_primitives::{Frequency, Timestamp};
use polars::prelude::*;

/// Provenance of a single metric value.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricMeta {
    /// Method name used to compute the value.
    pub method: String,
    /// Frequency the value was computed at, if resampled or inferred.
    pub freq: Option<Frequency>,
    /// First observation used.
    pub start: Option<Timestamp>,
    /// Last observation used.
    pub end: Option<Timestamp>,
    /// Observations used.
    pub total: usize,
    /// Observations left out (outside the subject range or unaligned).
    pub skipped: usize,
}

/// One row of a [`MetricResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    /// Series name: the subject's name or a benchmark label.
    pub name: String,
    /// Metric value.
    pub value: f64,
    /// Present when metadata was requested.
    pub meta: Option<MetricMeta>,
}

/// Table of one metric over the subject and its companions.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricResult {
    field: &'static str,
    rows: Vec<MetricRow>,
    meta: bool,
}

impl MetricResult {
    /// Total return field name.
    pub const TOTAL_RETURN: &'static str = "total_return";
    /// Annualized return field name.
    pub const ANNUALIZED_RETURN: &'static str = "annualized_return";
    /// Annualized volatility field name.
    pub const ANNUALIZED_VOLATILITY: &'static str = "annualized_volatility";
    /// Correlation field name.
    pub const CORRELATION: &'static str = "correlation";
    /// Sharpe ratio field name.
    pub const SHARPE_RATIO: &'static str = "sharpe_ratio";

    pub(crate) const fn new(field: &'static str, meta: bool) -> Self {
        Self { field, rows: Vec::new(), meta }
    }

    /// Append a row. Metadata is dropped unless the table carries it.
    pub(crate) fn push(&mut self, name: impl Into<String>, value: f64, meta: MetricMeta) {
        let meta = self.meta.then_some(meta);
        self.rows.push(MetricRow { name: name.into(), value, meta });
    }

    /// Metric name shared by every row.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Whether metadata columns are present.
    #[must_use]
    pub const fn has_meta(&self) -> bool {
        self.meta
    }

    /// Rows in output order: subject first, then companions in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value for the row called `name`.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<f64> {
        self.rows.iter().find(|row| row.name == name).map(|row| row.value)
    }

    /// Convert to a frame with `name`, `field` and `value` columns.
    ///
    /// With metadata, `method`, `freq`, `start`, `end`, `total` and `skipped`
    /// follow.
    ///
    /// # Errors
    /// Returns `PolarsError` if the frame cannot be built.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let names: Vec<&str> = self.rows.iter().map(|r| r.name.as_str()).collect();
        let fields = vec![self.field; self.rows.len()];
        let values: Vec<f64> = self.rows.iter().map(|r| r.value).collect();

        let mut columns = vec![
            Column::new("name".into(), names),
            Column::new("field".into(), fields),
            Column::new("value".into(), values),
        ];

        if self.meta {
            let metas: Vec<Option<&MetricMeta>> =
                self.rows.iter().map(|r| r.meta.as_ref()).collect();

            let method: Vec<Option<&str>> =
                metas.iter().map(|m| m.map(|m| m.method.as_str())).collect();
            let freq: Vec<Option<String>> =
                metas.iter().map(|m| m.and_then(|m| m.freq).map(|f| f.to_string())).collect();
            let start: Vec<Option<Timestamp>> =
                metas.iter().map(|m| m.and_then(|m| m.start)).collect();
            let end: Vec<Option<Timestamp>> = metas.iter().map(|m| m.and_then(|m| m.end)).collect();
            let total: Vec<Option<u64>> =
                metas.iter().map(|m| m.map(|m| m.total as u64)).collect();
            let skipped: Vec<Option<u64>> =
                metas.iter().map(|m| m.map(|m| m.skipped as u64)).collect();

            columns.extend([
                Column::new("method".into(), method),
                Column::new("freq".into(), freq),
                Column::new("start".into(), start),
                Column::new("end".into(), end),
                Column::new("total".into(), total),
                Column::new("skipped".into(), skipped),
            ]);
        }

        DataFrame::new(columns)
    }
}
