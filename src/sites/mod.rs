//! The site registry: metadata ingestion, queries and aggregates.

pub mod error;
pub mod loader;
pub mod stats;
pub mod table;
