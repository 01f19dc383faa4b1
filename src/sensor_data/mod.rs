//! Loading and reading of logger CSV exports.

pub mod error;
pub mod latest;
pub mod loader;
pub mod table;
