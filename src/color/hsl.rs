//! Floating point HSL conversion used by the saturation filter.

use crate::color::Rgb;

/// HSL color with every component in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

/// Convert an 8-bit RGB color to HSL.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f32::from(rgb.r) / 255.0;
    let g = f32::from(rgb.g) / 255.0;
    let b = f32::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;

    if rgb.r == rgb.g && rgb.g == rgb.b {
        // Achromatic
        return Hsl {
            hue: 0.0,
            saturation: 0.0,
            lightness,
        };
    }

    let delta = max - min;
    let saturation = if lightness > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let hue = if rgb.r >= rgb.g && rgb.r >= rgb.b {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if rgb.g >= rgb.b {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsl {
        hue: hue / 6.0,
        saturation,
        lightness,
    }
}

/// Convert HSL back to 8-bit RGB, rounding each channel.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    if hsl.saturation <= 0.0 {
        let v = unit_to_u8(hsl.lightness);
        return Rgb::new(v, v, v);
    }

    let l = hsl.lightness;
    let s = hsl.saturation;
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        unit_to_u8(hue_to_channel(p, q, hsl.hue + 1.0 / 3.0)),
        unit_to_u8(hue_to_channel(p, q, hsl.hue)),
        unit_to_u8(hue_to_channel(p, q, hsl.hue - 1.0 / 3.0)),
    )
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_u8(value: f32) -> u8 {
    libm::roundf(value * 255.0).clamp(0.0, 255.0) as u8
}
