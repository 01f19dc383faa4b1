//! Map model for the spatial dashboard.

pub mod markers;
