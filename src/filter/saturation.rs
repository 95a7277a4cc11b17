//! Saturation adjustment strategies

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgbw, hsl_to_rgb, rgb_to_hsl};

/// How saturation is scaled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaturationPolicy {
    /// Multiply HSL saturation, clamped to `0.0..=1.0`.
    #[default]
    Hsl,
    /// Push channels away from their mean: `avg + (c - avg) * factor`.
    ///
    /// Factors above 1.0 can drive channels out of range; results are clamped.
    Mean,
}

/// Scale the saturation of the color part, leaving white untouched.
pub fn apply_saturation(rgbw: Rgbw, saturation_factor: f32, policy: SaturationPolicy) -> Rgbw {
    let rgb = match policy {
        SaturationPolicy::Hsl => {
            let mut hsl = rgb_to_hsl(rgbw.rgb());
            hsl.saturation = (hsl.saturation * saturation_factor).clamp(0.0, 1.0);
            hsl_to_rgb(hsl)
        }
        SaturationPolicy::Mean => mean_saturation(rgbw.rgb(), saturation_factor),
    };
    Rgbw {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
        w: rgbw.w,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mean_saturation(rgb: Rgb, factor: f32) -> Rgb {
    let avg = (f32::from(rgb.r) + f32::from(rgb.g) + f32::from(rgb.b)) / 3.0;
    let adjust = |c: u8| {
        let value = libm::roundf(avg + (f32::from(c) - avg) * factor);
        value.clamp(0.0, 255.0) as u8
    };
    Rgb::new(adjust(rgb.r), adjust(rgb.g), adjust(rgb.b))
}

/// Saturation stage of the color transformer
#[derive(Debug, Clone, Copy)]
pub(crate) struct SaturationFilter {
    factor: f32,
    policy: SaturationPolicy,
}

impl SaturationFilter {
    pub(crate) const fn new(factor: f32, policy: SaturationPolicy) -> Self {
        Self { factor, policy }
    }

    pub(crate) fn apply(self, rgbw: Rgbw) -> Rgbw {
        apply_saturation(rgbw, self.factor, self.policy)
    }
}
