//! Shared palette. Each measurement height keeps one color across every
//! chart so the heights stay recognizable.

use crate::types::height::Height;
use plotly::common::color::{Rgb, Rgba};

pub fn height_color(height: Height) -> Rgb {
    match height {
        Height::M4 => Rgb::new(255, 127, 14),
        Height::M7 => Rgb::new(44, 160, 44),
        Height::M10 => Rgb::new(214, 39, 40),
    }
}

/// Translucent variant of [`height_color`] for min/max bands.
pub fn height_band_color(height: Height) -> Rgba {
    match height {
        Height::M4 => Rgba::new(255, 127, 14, 0.2),
        Height::M7 => Rgba::new(44, 160, 44, 0.2),
        Height::M10 => Rgba::new(214, 39, 40, 0.2),
    }
}
