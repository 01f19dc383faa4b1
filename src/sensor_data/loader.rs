//! Normalizes raw logger CSV exports into a [`SensorTable`].
//!
//! Logger firmware revisions disagree on timestamp formats and love to wedge
//! text like `"ERR"` into numeric cells, so everything is read as text first
//! and coerced afterwards: timestamps that fail to parse drop the whole row,
//! numeric cells that fail to parse become null and keep the row.

use crate::sensor_data::error::DataLoadError;
use crate::sensor_data::table::SensorTable;
use crate::types::parameter::{expected_columns, COL_DATE_TIME, COL_ID_LOGGER};
use chrono::{DateTime, NaiveDateTime};
use log::{info, warn};
use polars::prelude::*;
use serde::Serialize;
use std::io::Cursor;
use std::path::Path;

/// What a load produced, for the header line of a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    /// Rows surviving normalization.
    pub rows: usize,
    /// Columns in the table, fixed schema plus any extras the file carried.
    pub columns: usize,
    /// Rows discarded because their timestamp would not parse.
    pub dropped_rows: usize,
    /// First and last timestamp of the sorted table, if any rows survived.
    pub time_range: Option<(NaiveDateTime, NaiveDateTime)>,
}

/// Loads and normalizes a sensor CSV from an in-memory buffer, the shape an
/// upload widget hands over.
pub fn load_sensor_data(bytes: &[u8]) -> Result<(SensorTable, LoadReport), DataLoadError> {
    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(DataLoadError::CsvParse)?;
    normalize(raw)
}

/// Loads and normalizes a sensor CSV from disk.
pub fn load_sensor_data_path(path: &Path) -> Result<(SensorTable, LoadReport), DataLoadError> {
    info!("Loading sensor data from {:?}", path);
    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| DataLoadError::FileRead(path.to_path_buf(), e))?
        .finish()
        .map_err(DataLoadError::CsvParse)?;
    normalize(raw)
}

fn normalize(raw: DataFrame) -> Result<(SensorTable, LoadReport), DataLoadError> {
    for column in expected_columns() {
        if raw.column(&column).is_err() {
            return Err(DataLoadError::MissingColumn(column));
        }
    }

    let raw_rows = raw.height();
    let numeric_casts: Vec<Expr> = raw
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .filter(|name| *name != COL_ID_LOGGER && *name != COL_DATE_TIME)
        .map(|name| col(name).cast(DataType::Float64))
        .collect();

    let frame = raw
        .lazy()
        .with_column(col(COL_DATE_TIME).str().to_datetime(
            Some(TimeUnit::Milliseconds),
            None,
            StrptimeOptions {
                strict: false,
                ..Default::default()
            },
            lit("raise"),
        ))
        .filter(col(COL_DATE_TIME).is_not_null())
        .with_columns(numeric_casts)
        .sort([COL_DATE_TIME], SortMultipleOptions::default())
        .collect()
        .map_err(DataLoadError::Normalize)?;

    let report = LoadReport {
        rows: frame.height(),
        columns: frame.width(),
        dropped_rows: raw_rows - frame.height(),
        time_range: frame_time_range(&frame).map_err(DataLoadError::Normalize)?,
    };

    if report.dropped_rows > 0 {
        warn!(
            "Dropped {} of {} rows with unparseable timestamps",
            report.dropped_rows, raw_rows
        );
    }
    info!(
        "Normalized sensor data: {} rows, {} columns",
        report.rows, report.columns
    );

    Ok((SensorTable::new(frame), report))
}

/// First and last timestamp of a frame already sorted by `date_time`.
fn frame_time_range(
    frame: &DataFrame,
) -> Result<Option<(NaiveDateTime, NaiveDateTime)>, PolarsError> {
    if frame.height() == 0 {
        return Ok(None);
    }
    let timestamps = frame.column(COL_DATE_TIME)?.datetime()?;
    let first = timestamps.get(0).and_then(ms_to_naive);
    let last = timestamps.get(frame.height() - 1).and_then(ms_to_naive);
    Ok(first.zip(last))
}

pub(crate) fn ms_to_naive(ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc())
}
