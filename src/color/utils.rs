use smart_leds::hsv::hsv2rgb;

use crate::color::{Hsv, Rgb};

/// Squared euclidean distance between two colors in RGB space
#[inline]
pub fn distance_sq(a: Rgb, b: Rgb) -> u32 {
    let dr = i32::from(a.r) - i32::from(b.r);
    let dg = i32::from(a.g) - i32::from(b.g);
    let db = i32::from(a.b) - i32::from(b.b);
    dr.unsigned_abs().pow(2) + dg.unsigned_abs().pow(2) + db.unsigned_abs().pow(2)
}

/// Rotate the hue of a color around the 0-255 hue circle.
///
/// Gray colors are returned unchanged.
pub fn rotate_hue(rgb: Rgb, shift: u8) -> Rgb {
    if shift == 0 || (rgb.r == rgb.g && rgb.g == rgb.b) {
        return rgb;
    }
    let mut hsv = rgb2hsv(rgb);
    hsv.hue = hsv.hue.wrapping_add(shift);
    hsv2rgb(hsv)
}

/// Convert RGB to HSV (all channels are 0-255).
///
/// Hue is represented on a 0-255 circle, matching `smart_leds::hsv::Hsv`.
#[allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn rgb2hsv(rgb: Rgb) -> Hsv {
    let r = rgb.r;
    let g = rgb.g;
    let b = rgb.b;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let sat = if max == 0 {
        0
    } else {
        ((u16::from(delta) * 255) / u16::from(max)) as u8
    };

    // 0, 85, 171 offsets for the R/G/B sectors
    let hue = if delta == 0 {
        0
    } else {
        let (offset, a, b) = if max == r {
            (0i16, g, b)
        } else if max == g {
            (85i16, b, r)
        } else {
            (171i16, r, g)
        };
        let h = offset + (43i16 * (i16::from(a) - i16::from(b))) / i16::from(delta);
        h.rem_euclid(256) as u8
    };

    Hsv { hue, sat, val: max }
}
