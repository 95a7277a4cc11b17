//! Occupancy-weighted brightness scaling

use crate::color::Rgbw;

/// Scale every channel by `(percentage / 100) * brightness_factor`.
///
/// Channels are rounded and clamped to `0..=255`, so factors above 1.0 saturate
/// instead of wrapping.
pub fn apply_brightness(rgbw: Rgbw, percentage: f32, brightness_factor: f32) -> Rgbw {
    let factor = (percentage / 100.0) * brightness_factor;
    Rgbw {
        r: scale_channel(rgbw.r, factor),
        g: scale_channel(rgbw.g, factor),
        b: scale_channel(rgbw.b, factor),
        w: scale_channel(rgbw.w, factor),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_channel(channel: u8, factor: f32) -> u8 {
    let scaled = libm::roundf(f32::from(channel) * factor);
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}

/// Brightness stage of the color transformer
#[derive(Debug, Clone, Copy)]
pub(crate) struct BrightnessFilter {
    factor: f32,
}

impl BrightnessFilter {
    pub(crate) const fn new(factor: f32) -> Self {
        Self { factor }
    }

    pub(crate) fn apply(self, rgbw: Rgbw, percentage: f32) -> Rgbw {
        apply_brightness(rgbw, percentage, self.factor)
    }
}
