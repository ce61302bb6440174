//! CSV loading.

use std::path::Path;

use polars::prelude::*;
use tracing::debug;

/// Rows used to infer column types.
const INFER_SCHEMA_ROWS: usize = 100;

/// Read a CSV file with a header row into a frame.
///
/// Column types are inferred; date columns stay strings and are parsed
/// when the frame is normalized into a series.
///
/// # Errors
/// Returns `PolarsError` if the file cannot be opened or parsed.
pub fn read_csv(path: impl AsRef<Path>) -> PolarsResult<DataFrame> {
    let path = path.as_ref();
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "read csv");
    Ok(df)
}
