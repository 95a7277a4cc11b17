mod hsl;
mod rgbw;
mod utils;

pub use hsl::{Hsl, hsl_to_rgb, rgb_to_hsl};
pub use rgbw::{Rgbw, WhitePolicy, rgb_to_rgbw};
use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{distance_sq, rgb2hsv, rotate_hue};

pub type Rgb = RGB8;
pub type Hsv = HSV;
