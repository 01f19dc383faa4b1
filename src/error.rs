use crate::charts::error::ChartError;
use crate::sensor_data::error::{DataLoadError, SensorDataError};
use crate::sites::error::MetadataLoadError;
use crate::types::cardinal::DirectionOutOfRange;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Top-level error for the crate, wrapping the per-concern errors.
#[derive(Debug, Error)]
pub enum IkroError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    #[error(transparent)]
    SensorData(#[from] SensorDataError),

    #[error(transparent)]
    MetadataLoad(#[from] MetadataLoadError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Direction(#[from] DirectionOutOfRange),

    #[error("Failed to serialize CSV export")]
    CsvWrite(#[source] PolarsError),

    #[error("CSV export is not valid UTF-8")]
    CsvUtf8(#[from] std::string::FromUtf8Error),
}
