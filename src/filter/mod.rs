//! Color transformer - turns classified colors into fixture values
//!
//! Processing order is fixed: RGBW decomposition, saturation, brightness.

mod brightness;
mod saturation;

pub use brightness::apply_brightness;
use brightness::BrightnessFilter;
pub use saturation::{SaturationPolicy, apply_saturation};
use saturation::SaturationFilter;

use crate::color::{Rgb, Rgbw, WhitePolicy, rgb_to_rgbw};
use crate::config::LightConfig;

/// Tunables of the color transformer
#[derive(Debug, Clone, Copy)]
pub struct ColorTransformerConfig {
    pub white: WhitePolicy,
    pub saturation: SaturationPolicy,
    pub saturation_factor: f32,
    pub brightness_factor: f32,
}

impl From<&LightConfig> for ColorTransformerConfig {
    fn from(config: &LightConfig) -> Self {
        Self {
            white: config.white_policy,
            saturation: config.saturation_policy,
            saturation_factor: config.saturation_factor,
            brightness_factor: config.brightness_factor,
        }
    }
}

/// Converts an RGB color and its occupancy percentage into fixture RGBW
#[derive(Debug, Clone, Copy)]
pub struct ColorTransformer {
    white: WhitePolicy,
    saturation: SaturationFilter,
    brightness: BrightnessFilter,
}

impl ColorTransformer {
    pub const fn new(config: &ColorTransformerConfig) -> Self {
        Self {
            white: config.white,
            saturation: SaturationFilter::new(config.saturation_factor, config.saturation),
            brightness: BrightnessFilter::new(config.brightness_factor),
        }
    }

    /// Produce the fixture color for `rgb` covering `percentage` of its column
    pub fn transform(&self, rgb: Rgb, percentage: f32) -> Rgbw {
        let rgbw = rgb_to_rgbw(rgb, self.white);
        let rgbw = self.saturation.apply(rgbw);
        self.brightness.apply(rgbw, percentage)
    }
}
