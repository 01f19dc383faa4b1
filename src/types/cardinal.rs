use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A wind direction angle fell outside `[0, 360)` degrees.
///
/// Angles are never wrapped; 360 and above, negatives and NaN are all
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("wind direction {0}° is outside the valid range [0, 360)")]
pub struct DirectionOutOfRange(pub f64);

/// Eight-point compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardinalDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CardinalDirection {
    /// Clockwise from north, each covering a 45° sector.
    pub const ALL: [CardinalDirection; 8] = [
        CardinalDirection::N,
        CardinalDirection::NE,
        CardinalDirection::E,
        CardinalDirection::SE,
        CardinalDirection::S,
        CardinalDirection::SW,
        CardinalDirection::W,
        CardinalDirection::NW,
    ];

    /// Maps an angle in `[0, 360)` to its compass sector. Sector boundaries
    /// sit halfway between the cardinal angles, so 337.5° up to 22.5° is N,
    /// 22.5° up to 67.5° is NE, and so on.
    pub fn from_degrees(degrees: f64) -> Result<Self, DirectionOutOfRange> {
        if !(0.0..360.0).contains(&degrees) {
            return Err(DirectionOutOfRange(degrees));
        }
        let sector = (((degrees + 22.5) / 45.0).floor() as usize) % 8;
        Ok(Self::ALL[sector])
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            CardinalDirection::N => "N",
            CardinalDirection::NE => "NE",
            CardinalDirection::E => "E",
            CardinalDirection::SE => "SE",
            CardinalDirection::S => "S",
            CardinalDirection::SW => "SW",
            CardinalDirection::W => "W",
            CardinalDirection::NW => "NW",
        }
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
