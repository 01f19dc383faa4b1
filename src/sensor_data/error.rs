use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// A sensor CSV export could not be loaded or normalized.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Failed to read sensor CSV file '{0}'")]
    FileRead(PathBuf, #[source] PolarsError),

    #[error("Failed to parse sensor CSV data")]
    CsvParse(#[source] PolarsError),

    #[error("Required column '{0}' not found in sensor data")]
    MissingColumn(String),

    #[error("Failed to normalize sensor data")]
    Normalize(#[source] PolarsError),
}

/// An operation needed a column the sensor table does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Required column '{column}' not found in sensor data")]
pub struct MissingColumnError {
    pub column: String,
}

impl MissingColumnError {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

/// An operation needed at least one reading but the table is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No sensor readings available")]
pub struct NoDataError;

/// Failure while querying or deriving from a sensor table.
#[derive(Debug, Error)]
pub enum SensorDataError {
    #[error(transparent)]
    MissingColumn(#[from] MissingColumnError),

    #[error(transparent)]
    NoData(#[from] NoDataError),

    #[error("Failed processing sensor frame: {0}")]
    Frame(#[from] PolarsError),

    #[error("Unexpected sensor frame state: {0}")]
    Unexpected(String),
}
