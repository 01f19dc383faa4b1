//! The `SensorTable` wrapper around a normalized logger frame.

use crate::sensor_data::error::{DataLoadError, MissingColumnError, SensorDataError};
use crate::sensor_data::latest::LatestReading;
use crate::sensor_data::loader::{self, ms_to_naive, LoadReport};
use crate::types::height::Height;
use crate::types::parameter::{
    measurement_column, Parameter, Statistic, COL_DATE_TIME,
};
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::path::Path;

/// A normalized table of logger readings.
///
/// Rows are sorted ascending by `date_time`, the timestamp column has no
/// nulls, and every measurement column is `Float64`. Construct one through
/// [`SensorTable::from_csv_bytes`] or [`SensorTable::from_csv_path`]; the
/// accessors below assume the normalized shape.
#[derive(Debug, Clone)]
pub struct SensorTable {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
}

impl SensorTable {
    /// Wraps an already-normalized frame.
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Normalizes a CSV export held in memory. See [`loader::load_sensor_data`].
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<(Self, LoadReport), DataLoadError> {
        loader::load_sensor_data(bytes)
    }

    /// Normalizes a CSV export read from disk.
    pub fn from_csv_path(path: &Path) -> Result<(Self, LoadReport), DataLoadError> {
        loader::load_sensor_data_path(path)
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// The derived view of the most recent row.
    pub fn latest(&self) -> Result<LatestReading, SensorDataError> {
        LatestReading::from_table(self)
    }

    /// All timestamps in row order.
    pub fn timestamps(&self) -> Result<Vec<NaiveDateTime>, SensorDataError> {
        let column = self.require_column(COL_DATE_TIME)?;
        let timestamps = column.datetime().map_err(SensorDataError::Frame)?;
        Ok(timestamps.into_iter().flatten().filter_map(ms_to_naive).collect())
    }

    /// One numeric column in row order, nulls preserved.
    pub fn numeric_series(&self, column: &str) -> Result<Vec<Option<f64>>, SensorDataError> {
        let column = self.require_column(column)?;
        let values = column.f64().map_err(SensorDataError::Frame)?;
        Ok(values.into_iter().collect())
    }

    /// The series for one measurement column, addressed through the schema.
    pub fn measurement_series(
        &self,
        parameter: Parameter,
        height: Height,
        statistic: Statistic,
    ) -> Result<Vec<Option<f64>>, SensorDataError> {
        self.numeric_series(&measurement_column(parameter, height, statistic))
    }

    /// First and last timestamp of the table.
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        if self.is_empty() {
            return None;
        }
        let timestamps = self.frame.column(COL_DATE_TIME).ok()?.datetime().ok()?;
        let first = timestamps.get(0).and_then(ms_to_naive)?;
        let last = timestamps.get(self.len() - 1).and_then(ms_to_naive)?;
        Some((first, last))
    }

    /// The last `rows` rows of the at-a-glance preview columns: timestamp
    /// plus current temperature, current humidity and average wind speed per
    /// height.
    pub fn recent(&self, rows: usize) -> Result<DataFrame, SensorDataError> {
        let mut columns = vec![COL_DATE_TIME.to_string()];
        for height in Height::ALL {
            columns.push(measurement_column(Parameter::Temperature, height, Statistic::Now));
            columns.push(measurement_column(Parameter::Humidity, height, Statistic::Now));
            columns.push(measurement_column(Parameter::WindSpeed, height, Statistic::Avg));
        }
        for column in &columns {
            self.require_column(column)?;
        }
        let preview = self
            .frame
            .select(columns)
            .map_err(SensorDataError::Frame)?;
        Ok(preview.tail(Some(rows)))
    }

    pub(crate) fn require_column(&self, name: &str) -> Result<&Column, MissingColumnError> {
        self.frame
            .column(name)
            .map_err(|_| MissingColumnError::new(name))
    }
}
