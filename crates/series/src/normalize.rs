//! Normalization of tabular input into a [`TimeSeries`].

use chrono::DateTime;
use perform_primitives::Timestamp;
use polars::prelude::*;
use tracing::{info, warn};

use crate::{SeriesError, TimeSeries, parse_timestamp};

/// Named columns tried, in order, when no column is already temporal.
const DATE_COLUMNS: [&str; 2] = ["datetime", "date"];

/// Normalize a frame into a single-column time series.
///
/// The index column is resolved by the first rule that applies:
///
/// 1. the first column whose dtype is already `Date` or `Datetime`;
/// 2. a column named exactly `datetime`, parsed permissively;
/// 3. a column named exactly `date`, parsed permissively.
///
/// If `datetime` exists but fails to parse, `date` is tried before giving
/// up. The value column is the first remaining numeric column; any further
/// columns are ignored. Rows with a null value are dropped.
///
/// # Errors
/// * `NotTabular` if the frame has no columns or no numeric value column.
/// * `MissingIndex` if no index column can be found.
/// * `InvalidDate` if a date value cannot be parsed.
/// * `DuplicateTimestamp` if the index is not unique.
pub fn normalize(df: &DataFrame) -> Result<TimeSeries, SeriesError> {
    if df.width() == 0 {
        return Err(SeriesError::NotTabular("frame has no columns".to_string()));
    }

    if let Some(column) = df.get_columns().iter().find(|c| is_temporal(c.dtype())) {
        info!(column = %column.name(), "using temporal column as index");
        return build(df, column);
    }

    let present: Vec<&Column> =
        DATE_COLUMNS.iter().filter_map(|name| df.column(name).ok()).collect();

    let mut last_err = SeriesError::MissingIndex;
    for column in present {
        info!(column = %column.name(), "using column as index");
        match build(df, column) {
            Ok(series) => return Ok(series),
            Err(err @ SeriesError::InvalidDate { .. }) => {
                warn!(column = %column.name(), error = %err, "cannot convert column to index");
                last_err = err;
            }
            Err(err) => return Err(err),
        }
    }

    Err(last_err)
}

fn build(df: &DataFrame, index_col: &Column) -> Result<TimeSeries, SeriesError> {
    let value_col = df
        .get_columns()
        .iter()
        .filter(|c| c.name() != index_col.name())
        .find(|c| is_numeric(c.dtype()))
        .ok_or_else(|| SeriesError::NotTabular("no numeric value column".to_string()))?;

    let index = to_timestamps(index_col)?;
    let values = value_col.cast(&DataType::Float64)?;

    let mut kept_index = Vec::with_capacity(index.len());
    let mut kept_values = Vec::with_capacity(index.len());
    for (ts, value) in index.into_iter().zip(values.f64()?) {
        if let Some(value) = value {
            kept_index.push(ts);
            kept_values.push(value);
        }
    }

    let dropped = df.height() - kept_values.len();
    if dropped > 0 {
        warn!(column = %value_col.name(), dropped, "dropped rows with null values");
    }

    TimeSeries::new(value_col.name().to_string(), kept_index, kept_values)
}

fn to_timestamps(column: &Column) -> Result<Vec<Timestamp>, SeriesError> {
    let name = column.name().to_string();
    let invalid = |value: String| SeriesError::InvalidDate { column: name.clone(), value };

    match column.dtype() {
        DataType::Date => {
            let days = column.cast(&DataType::Int32)?;
            days.i32()?
                .into_iter()
                .map(|d| {
                    d.and_then(|d| DateTime::from_timestamp(i64::from(d) * 86_400, 0))
                        .map(|dt| dt.naive_utc())
                        .ok_or_else(|| invalid(format!("{d:?}")))
                })
                .collect()
        }
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            let raw = column.cast(&DataType::Int64)?;
            raw.i64()?
                .into_iter()
                .map(|v| {
                    v.and_then(|v| match unit {
                        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(v)),
                        TimeUnit::Microseconds => DateTime::from_timestamp_micros(v),
                        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(v),
                    })
                    .map(|dt| dt.naive_utc())
                    .ok_or_else(|| invalid(format!("{v:?}")))
                })
                .collect()
        }
        _ => {
            // Integers such as 20200101 are parsed through their text form.
            let text = column.cast(&DataType::String)?;
            text.str()?
                .into_iter()
                .map(|s| match s {
                    Some(s) => parse_timestamp(s).ok_or_else(|| invalid(s.to_string())),
                    None => Err(invalid("null".to_string())),
                })
                .collect()
        }
    }
}

const fn is_temporal(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Date | DataType::Datetime(_, _))
}

const fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn ts(y: i32, m: u32, d: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn expected() -> Vec<Timestamp> {
        vec![ts(2020, 1, 1), ts(2020, 1, 2), ts(2020, 1, 3)]
    }

    #[test]
    fn no_columns_is_not_tabular() {
        let err = normalize(&DataFrame::empty()).unwrap_err();
        assert!(matches!(err, SeriesError::NotTabular(_)));
    }

    #[test]
    fn no_date_columns() {
        let df = df! {
            "col1" => &[1, 2],
            "col2" => &[3, 4],
        }
        .unwrap();

        assert!(matches!(normalize(&df).unwrap_err(), SeriesError::MissingIndex));
    }

    #[test]
    fn uses_datetime_column() {
        let df = df! {
            "datetime" => &["2020-01-01", "2020-01-02", "2020-01-03"],
            "returns" => &[0.0, -0.1, 0.3],
        }
        .unwrap();

        let series = normalize(&df).unwrap();
        assert_eq!(series.index(), expected().as_slice());
        assert_eq!(series.values(), &[0.0, -0.1, 0.3]);
        assert_eq!(series.name(), "returns");
    }

    #[test]
    fn uses_date_column() {
        let df = df! {
            "date" => &["2020-01-01", "2020-01-02", "2020-01-03"],
            "returns" => &[0.0, -0.1, 0.3],
        }
        .unwrap();

        let series = normalize(&df).unwrap();
        assert_eq!(series.index(), expected().as_slice());
    }

    #[test]
    fn bad_datetime_without_date_fails() {
        let df = df! {
            "datetime" => &["20200101", "20200102", "20200103a"],
            "returns" => &[0.0, -0.1, 0.3],
        }
        .unwrap();

        let err = normalize(&df).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidDate { ref value, .. } if value == "20200103a"));
    }

    #[test]
    fn bad_datetime_falls_back_to_date() {
        let df = df! {
            "datetime" => &["x", "y", "z"],
            "date" => &["2020-01-01", "2020-01-02", "2020-01-03"],
            "returns" => &[0.0, -0.1, 0.3],
        }
        .unwrap();

        let series = normalize(&df).unwrap();
        assert_eq!(series.index(), expected().as_slice());
    }

    #[test]
    fn datetime_preferred_over_date() {
        let df = df! {
            "date" => &["2021-06-01", "2021-06-02", "2021-06-03"],
            "datetime" => &["2020-01-01", "2020-01-02", "2020-01-03"],
            "returns" => &[0.0, -0.1, 0.3],
        }
        .unwrap();

        let series = normalize(&df).unwrap();
        assert_eq!(series.index(), expected().as_slice());
    }

    #[test]
    fn accepts_temporal_column() {
        let dates = [
            NaiveDate::from_ymd_opt(2020, 1, 3).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
        ];
        let df = df! {
            "when" => &dates,
            "returns" => &[0.3, 0.0, -0.1],
            "volume" => &[1.0, 2.0, 3.0],
        }
        .unwrap();

        let series = normalize(&df).unwrap();
        assert_eq!(series.index(), expected().as_slice());
        assert_eq!(series.values(), &[0.0, -0.1, 0.3]);
        assert_eq!(series.name(), "returns");
    }

    #[test]
    fn integer_dates_are_parsed() {
        let df = df! {
            "date" => &[20200101_i64, 20200102, 20200103],
            "returns" => &[0.0, -0.1, 0.3],
        }
        .unwrap();

        let series = normalize(&df).unwrap();
        assert_eq!(series.index(), expected().as_slice());
    }

    #[test]
    fn missing_value_column() {
        let df = df! {
            "date" => &["2020-01-01", "2020-01-02"],
            "label" => &["a", "b"],
        }
        .unwrap();

        assert!(matches!(normalize(&df).unwrap_err(), SeriesError::NotTabular(_)));
    }

    #[test]
    fn null_values_dropped() {
        let df = df! {
            "date" => &["2020-01-01", "2020-01-02", "2020-01-03"],
            "returns" => &[Some(0.0), None, Some(0.3)],
        }
        .unwrap();

        let series = normalize(&df).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.values(), &[0.0, 0.3]);
    }

    #[test]
    fn duplicate_dates_rejected() {
        let df = df! {
            "date" => &["2020-01-01", "2020-01-01"],
            "returns" => &[0.0, 0.1],
        }
        .unwrap();

        assert!(matches!(normalize(&df).unwrap_err(), SeriesError::DuplicateTimestamp(_)));
    }
}
