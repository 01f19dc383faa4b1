//! CSV downloads offered by the dashboards. Each export pairs the file body
//! with a timestamped filename so callers can hand it straight to a download
//! widget.

use crate::error::IkroError;
use crate::sensor_data::latest::LatestReading;
use crate::sensor_data::table::SensorTable;
use crate::sites::table::SiteTable;
use chrono::Local;
use polars::prelude::*;
use serde::Serialize;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A ready-to-serve download.
#[derive(Debug, Clone, Serialize)]
pub struct CsvExport {
    pub filename: String,
    pub contents: String,
}

/// The full normalized sensor table, timestamps formatted so the file loads
/// back through [`SensorTable::from_csv_bytes`] unchanged.
pub fn sensor_table_csv(table: &SensorTable) -> Result<CsvExport, IkroError> {
    Ok(CsvExport {
        filename: format!(
            "microclimate_data_{}.csv",
            Local::now().format("%Y%m%d_%H%M")
        ),
        contents: frame_to_csv(table.frame.clone())?,
    })
}

/// The nine-row statistics summary of the latest reading.
pub fn summary_csv(latest: &LatestReading) -> Result<CsvExport, IkroError> {
    let rows = latest.summary_rows();
    let heights: Vec<String> = rows.iter().map(|row| row.height.to_string()).collect();
    let parameters: Vec<&str> = rows.iter().map(|row| row.parameter.code()).collect();
    let current: Vec<Option<f64>> = rows.iter().map(|row| row.current).collect();
    let average: Vec<Option<f64>> = rows.iter().map(|row| row.average).collect();
    let min: Vec<Option<f64>> = rows.iter().map(|row| row.min).collect();
    let max: Vec<Option<f64>> = rows.iter().map(|row| row.max).collect();

    let frame = df! {
        "Height" => heights,
        "Parameter" => parameters,
        "Current" => current,
        "Average" => average,
        "Min" => min,
        "Max" => max,
    }
    .map_err(IkroError::CsvWrite)?;

    Ok(CsvExport {
        filename: format!(
            "microclimate_summary_{}.csv",
            Local::now().format("%Y%m%d_%H%M")
        ),
        contents: frame_to_csv(frame)?,
    })
}

/// Every column of the site registry, usually called on a search result.
pub fn site_table_csv(table: &SiteTable) -> Result<CsvExport, IkroError> {
    Ok(CsvExport {
        filename: format!("microclimate_sites_{}.csv", Local::now().format("%Y%m%d")),
        contents: frame_to_csv(table.frame.clone())?,
    })
}

fn frame_to_csv(mut frame: DataFrame) -> Result<String, IkroError> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .with_datetime_format(Some(DATETIME_FORMAT.to_string()))
        .finish(&mut frame)
        .map_err(IkroError::CsvWrite)?;
    Ok(String::from_utf8(buffer)?)
}
