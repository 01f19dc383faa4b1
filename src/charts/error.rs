use crate::sensor_data::error::SensorDataError;
use crate::sites::error::MetadataLoadError;
use thiserror::Error;

/// Errors raised while assembling a chart. Charts never fail on their own,
/// they only surface problems with the underlying tables.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error(transparent)]
    SensorData(#[from] SensorDataError),

    #[error(transparent)]
    SiteData(#[from] MetadataLoadError),
}
