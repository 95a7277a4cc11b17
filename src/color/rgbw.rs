use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Four-channel fixture color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Color part without the white channel
    pub const fn rgb(self) -> Rgb {
        Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }

    /// DMX channel order of a fixture record
    pub const fn to_channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.w]
    }
}

/// How the white channel is derived from an RGB color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhitePolicy {
    /// White takes over the common part: `(r - w, g - w, b - w, w)`.
    ///
    /// Keeps total luminance unchanged on fixtures with an independent white emitter.
    #[default]
    Subtractive,
    /// White is added on top of unchanged color channels: `(r, g, b, w)`.
    Additive,
}

/// Decompose an RGB color into RGBW with `w = min(r, g, b)`.
pub fn rgb_to_rgbw(rgb: Rgb, policy: WhitePolicy) -> Rgbw {
    let w = rgb.r.min(rgb.g).min(rgb.b);
    match policy {
        WhitePolicy::Subtractive => Rgbw::new(rgb.r - w, rgb.g - w, rgb.b - w, w),
        WhitePolicy::Additive => Rgbw::new(rgb.r, rgb.g, rgb.b, w),
    }
}
