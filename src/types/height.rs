use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurement height of a sensor boom on the tower.
///
/// Every site carries instruments at 4, 7 and 10 meters; all measurement
/// columns are suffixed with one of these heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Height {
    #[serde(rename = "4m")]
    M4,
    #[serde(rename = "7m")]
    M7,
    #[serde(rename = "10m")]
    M10,
}

impl Height {
    /// All heights, ordered bottom to top.
    pub const ALL: [Height; 3] = [Height::M4, Height::M7, Height::M10];

    pub fn meters(self) -> u8 {
        match self {
            Height::M4 => 4,
            Height::M7 => 7,
            Height::M10 => 10,
        }
    }

    /// Position of this height in [`Height::ALL`].
    pub fn index(self) -> usize {
        match self {
            Height::M4 => 0,
            Height::M7 => 1,
            Height::M10 => 2,
        }
    }

    /// The digits used inside column names, e.g. `"10"` in `tt10_avg`.
    pub fn column_infix(self) -> &'static str {
        match self {
            Height::M4 => "4",
            Height::M7 => "7",
            Height::M10 => "10",
        }
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.meters())
    }
}
