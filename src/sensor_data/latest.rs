//! Derived view of the most recent reading, the source for dashboard header
//! metrics, vertical profiles and the summary export.

use crate::sensor_data::error::{MissingColumnError, NoDataError, SensorDataError};
use crate::sensor_data::loader::ms_to_naive;
use crate::sensor_data::table::SensorTable;
use crate::types::cardinal::{CardinalDirection, DirectionOutOfRange};
use crate::types::height::Height;
use crate::types::parameter::{
    measurement_column, wind_run_column, Parameter, Statistic, COL_DATE_TIME, COL_ID_LOGGER,
};
use chrono::NaiveDateTime;
use polars::prelude::*;
use serde::Serialize;

/// The four window statistics of one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatSummary {
    pub now: Option<f64>,
    pub avg: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl StatSummary {
    pub fn get(&self, statistic: Statistic) -> Option<f64> {
        match statistic {
            Statistic::Now => self.now,
            Statistic::Avg => self.avg,
            Statistic::Min => self.min,
            Statistic::Max => self.max,
        }
    }

    /// How far the instantaneous value sits from the window average.
    pub fn delta_from_avg(&self) -> Option<f64> {
        Some(self.now? - self.avg?)
    }
}

/// Everything measured at one height in the latest row.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HeightReadings {
    pub height: Height,
    pub temperature: StatSummary,
    pub humidity: StatSummary,
    pub wind_speed: StatSummary,
    pub wind_direction: StatSummary,
    /// Accumulated wind run for the height, from the `sum_ws*` column.
    pub wind_run: Option<f64>,
}

impl HeightReadings {
    pub fn parameter(&self, parameter: Parameter) -> StatSummary {
        match parameter {
            Parameter::Temperature => self.temperature,
            Parameter::Humidity => self.humidity,
            Parameter::WindSpeed => self.wind_speed,
            Parameter::WindDirection => self.wind_direction,
        }
    }

    /// Compass sector of the current wind direction. `Ok(None)` when the vane
    /// reported nothing this window; an angle outside `[0, 360)` is an error,
    /// not a wrap-around.
    pub fn cardinal(&self) -> Result<Option<CardinalDirection>, DirectionOutOfRange> {
        self.wind_direction
            .now
            .map(CardinalDirection::from_degrees)
            .transpose()
    }
}

/// One row of the flattened summary table: a (height, parameter) pair with
/// its four statistics.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SummaryRow {
    pub height: Height,
    pub parameter: Parameter,
    pub current: Option<f64>,
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// The most recent reading of a [`SensorTable`], fully typed.
#[derive(Debug, Clone, Serialize)]
pub struct LatestReading {
    pub timestamp: NaiveDateTime,
    pub logger_id: Option<String>,
    pub heights: [HeightReadings; 3],
}

impl LatestReading {
    pub(crate) fn from_table(table: &SensorTable) -> Result<Self, SensorDataError> {
        let frame = &table.frame;
        if frame.height() == 0 {
            return Err(NoDataError.into());
        }
        let idx = frame.height() - 1;

        let timestamp_ms = get_column(frame, COL_DATE_TIME)?
            .datetime()
            .map_err(SensorDataError::Frame)?
            .get(idx)
            .ok_or_else(|| {
                SensorDataError::Unexpected("null timestamp in normalized table".to_string())
            })?;
        let timestamp = ms_to_naive(timestamp_ms).ok_or_else(|| {
            SensorDataError::Unexpected("timestamp outside representable range".to_string())
        })?;

        let logger_id = get_column(frame, COL_ID_LOGGER)?
            .str()
            .map_err(SensorDataError::Frame)?
            .get(idx)
            .map(String::from);

        let mut heights = Vec::with_capacity(Height::ALL.len());
        for height in Height::ALL {
            heights.push(HeightReadings {
                height,
                temperature: stat_summary(frame, Parameter::Temperature, height, idx)?,
                humidity: stat_summary(frame, Parameter::Humidity, height, idx)?,
                wind_speed: stat_summary(frame, Parameter::WindSpeed, height, idx)?,
                wind_direction: stat_summary(frame, Parameter::WindDirection, height, idx)?,
                wind_run: get_opt_float(frame, &wind_run_column(height), idx)?,
            });
        }
        let heights: [HeightReadings; 3] = match heights.try_into() {
            Ok(heights) => heights,
            Err(_) => {
                return Err(SensorDataError::Unexpected(
                    "expected readings for exactly three heights".to_string(),
                ))
            }
        };

        Ok(Self {
            timestamp,
            logger_id,
            heights,
        })
    }

    pub fn height(&self, height: Height) -> &HeightReadings {
        &self.heights[height.index()]
    }

    pub fn stats(&self, parameter: Parameter, height: Height) -> StatSummary {
        self.height(height).parameter(parameter)
    }

    /// Compass sector of the current wind direction at a height.
    pub fn cardinal(
        &self,
        height: Height,
    ) -> Result<Option<CardinalDirection>, DirectionOutOfRange> {
        self.height(height).cardinal()
    }

    pub fn wind_run(&self, height: Height) -> Option<f64> {
        self.height(height).wind_run
    }

    /// The nine summary rows: temperature, humidity and wind speed for each
    /// height, heights outermost.
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let mut rows = Vec::with_capacity(9);
        for height in Height::ALL {
            for parameter in [
                Parameter::Temperature,
                Parameter::Humidity,
                Parameter::WindSpeed,
            ] {
                let stats = self.stats(parameter, height);
                rows.push(SummaryRow {
                    height,
                    parameter,
                    current: stats.now,
                    average: stats.avg,
                    min: stats.min,
                    max: stats.max,
                });
            }
        }
        rows
    }
}

fn get_column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Column, SensorDataError> {
    frame
        .column(name)
        .map_err(|_| MissingColumnError::new(name).into())
}

fn get_opt_float(frame: &DataFrame, name: &str, idx: usize) -> Result<Option<f64>, SensorDataError> {
    Ok(get_column(frame, name)?
        .f64()
        .map_err(SensorDataError::Frame)?
        .get(idx))
}

fn stat_summary(
    frame: &DataFrame,
    parameter: Parameter,
    height: Height,
    idx: usize,
) -> Result<StatSummary, SensorDataError> {
    Ok(StatSummary {
        now: get_opt_float(frame, &measurement_column(parameter, height, Statistic::Now), idx)?,
        avg: get_opt_float(frame, &measurement_column(parameter, height, Statistic::Avg), idx)?,
        min: get_opt_float(frame, &measurement_column(parameter, height, Statistic::Min), idx)?,
        max: get_opt_float(frame, &measurement_column(parameter, height, Statistic::Max), idx)?,
    })
}
