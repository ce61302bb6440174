//! Calendar return table.

use chrono::Datelike;
use perform_primitives::CompoundMethod;
use perform_series::TimeSeries;
use polars::prelude::*;

use crate::{AnalyticsError, ReturnSeries};

/// Month column names, January first.
pub const MONTHS: [&str; 12] =
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// Returns by year and month.
///
/// One row per year with data, columns `Year`, `Jan` to `Dec` and `Total`.
/// Months without observations are null. `Total` compounds the whole year
/// directly rather than from the monthly figures, so it is exact for every
/// method.
///
/// # Errors
/// Returns `AnalyticsError::Series` if the series is coarser than monthly.
pub fn calendar_returns(
    series: &TimeSeries,
    method: CompoundMethod,
) -> Result<DataFrame, AnalyticsError> {
    let monthly = series.to_month(method)?;
    let yearly = series.to_year(method)?;

    let years: Vec<i32> = yearly.index().iter().map(|ts| ts.year()).collect();
    let mut months: Vec<Vec<Option<f64>>> = vec![vec![None; years.len()]; MONTHS.len()];

    for (ts, value) in monthly.index().iter().zip(monthly.values()) {
        if let Ok(row) = years.binary_search(&ts.year()) {
            months[ts.month0() as usize][row] = Some(*value);
        }
    }

    let mut columns = Vec::with_capacity(MONTHS.len() + 2);
    columns.push(Column::new("Year".into(), years));
    for (name, values) in MONTHS.iter().zip(months) {
        columns.push(Column::new((*name).into(), values));
    }
    columns.push(Column::new("Total".into(), yearly.values().to_vec()));

    Ok(DataFrame::new(columns)?)
}

impl ReturnSeries {
    /// Calendar return table of the subject. See [`calendar_returns`].
    ///
    /// # Errors
    /// Returns `AnalyticsError::Series` if the subject is coarser than monthly.
    pub fn calendar_returns(&self, method: CompoundMethod) -> Result<DataFrame, AnalyticsError> {
        calendar_returns(self.series(), method)
    }
}
