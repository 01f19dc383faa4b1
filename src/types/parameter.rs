//! The enumerated column schema of logger CSV exports.
//!
//! A logger row carries, for every height and meteorological parameter, the
//! four statistics of the 10-minute aggregation window, plus a wind-run sum
//! per height. Column names are always derived through [`measurement_column`]
//! and [`wind_run_column`] rather than assembled ad hoc, so a typo'd column
//! cannot slip past the compiler.

use crate::types::height::Height;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp column, parsed to a millisecond datetime during normalization.
pub const COL_DATE_TIME: &str = "date_time";
/// Logger identifier column, the only column kept as text.
pub const COL_ID_LOGGER: &str = "id_logger";

/// A measured meteorological parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    #[serde(rename = "tt")]
    Temperature,
    #[serde(rename = "rh")]
    Humidity,
    #[serde(rename = "ws")]
    WindSpeed,
    #[serde(rename = "wd")]
    WindDirection,
}

impl Parameter {
    pub const ALL: [Parameter; 4] = [
        Parameter::Temperature,
        Parameter::Humidity,
        Parameter::WindSpeed,
        Parameter::WindDirection,
    ];

    /// The two-letter code used in column names.
    pub fn code(self) -> &'static str {
        match self {
            Parameter::Temperature => "tt",
            Parameter::Humidity => "rh",
            Parameter::WindSpeed => "ws",
            Parameter::WindDirection => "wd",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Parameter::Temperature => "Temperature",
            Parameter::Humidity => "Humidity",
            Parameter::WindSpeed => "Wind Speed",
            Parameter::WindDirection => "Wind Direction",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Parameter::Temperature => "°C",
            Parameter::Humidity => "%",
            Parameter::WindSpeed => "m/s",
            Parameter::WindDirection => "°",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Statistic of the aggregation window a measurement column reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    Now,
    Avg,
    Min,
    Max,
}

impl Statistic {
    pub const ALL: [Statistic; 4] = [
        Statistic::Now,
        Statistic::Avg,
        Statistic::Min,
        Statistic::Max,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            Statistic::Now => "now",
            Statistic::Avg => "avg",
            Statistic::Min => "min",
            Statistic::Max => "max",
        }
    }
}

/// Column name for a measurement, e.g. `tt4_avg` or `wd10_now`.
pub fn measurement_column(parameter: Parameter, height: Height, statistic: Statistic) -> String {
    format!(
        "{}{}_{}",
        parameter.code(),
        height.column_infix(),
        statistic.suffix()
    )
}

/// Column name for the accumulated wind run at a height, e.g. `sum_ws7`.
pub fn wind_run_column(height: Height) -> String {
    format!("sum_ws{}", height.column_infix())
}

/// Every column a logger CSV export must contain, in canonical order.
pub fn expected_columns() -> Vec<String> {
    let mut columns = vec![COL_ID_LOGGER.to_string(), COL_DATE_TIME.to_string()];
    for height in Height::ALL {
        for parameter in Parameter::ALL {
            for statistic in Statistic::ALL {
                columns.push(measurement_column(parameter, height, statistic));
            }
        }
        columns.push(wind_run_column(height));
    }
    columns
}
