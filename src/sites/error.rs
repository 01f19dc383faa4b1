use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or querying the site-metadata table.
#[derive(Debug, Error)]
pub enum MetadataLoadError {
    #[error("Failed to read site metadata from {0}")]
    FileRead(PathBuf, #[source] PolarsError),

    #[error("Failed to parse site metadata CSV")]
    CsvParse(#[source] PolarsError),

    #[error("Site metadata is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Failed to evaluate site metadata")]
    Frame(#[from] PolarsError),

    #[error("Unexpected site metadata: {0}")]
    Unexpected(String),
}
