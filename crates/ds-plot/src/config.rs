//! Plot appearance settings

use serde::{Deserialize, Serialize};

use crate::PlotError;

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GOLD: Rgb = Rgb(255, 215, 0);
    pub const DARK_BLUE: Rgb = Rgb(0, 0, 139);
}

/// Layout and styling for normal curve plots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Distance between sampled x positions
    pub step: f64,

    /// Half-width of the plotting window in standard deviations
    pub extent_sd: f64,

    /// Multiplier applied to the peak density for the y-axis maximum
    pub headroom: f64,

    pub curve_color: Rgb,
    pub curve_width: u32,

    /// Fill for the area between the bounds
    pub region_color: Rgb,

    /// Fill for the area left of the lower bound
    pub left_region_color: Rgb,

    pub width: u32,
    pub height: u32,
    pub title_font_size: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            extent_sd: 3.5,
            headroom: 1.25,
            curve_color: Rgb::BLACK,
            curve_width: 1,
            region_color: Rgb::GOLD,
            left_region_color: Rgb::DARK_BLUE,
            width: 800,
            height: 500,
            title_font_size: 16,
        }
    }
}

impl PlotConfig {
    pub fn validate(&self) -> Result<(), PlotError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(PlotError::Config(format!("step must be positive, got {}", self.step)));
        }
        if !(self.extent_sd.is_finite() && self.extent_sd > 0.0) {
            return Err(PlotError::Config(format!("extent_sd must be positive, got {}", self.extent_sd)));
        }
        if !(self.headroom.is_finite() && self.headroom > 0.0) {
            return Err(PlotError::Config(format!("headroom must be positive, got {}", self.headroom)));
        }
        if self.width == 0 || self.height == 0 {
            return Err(PlotError::Config("canvas size must be non-zero".to_string()));
        }
        Ok(())
    }
}
