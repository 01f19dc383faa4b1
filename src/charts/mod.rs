//! Plotly chart builders for both dashboards.

pub mod error;
pub mod network;
pub mod profile;
pub mod style;
pub mod time_series;
