//! RGBA8 pixel grids: the base image, the stretched image and framebuffers

use alloc::vec;
use alloc::vec::Vec;

use smart_leds::hsv::hsv2rgb;

use crate::color::{Hsv, Rgb};
use crate::error::{Error, Result};

pub const BYTES_PER_PIXEL: usize = 4;

/// Row-major RGBA8 pixel grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

/// Fixed image the profile stretches, loaded once at startup
pub type BaseImage = Frame;

impl Frame {
    /// Transparent black frame
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * BYTES_PER_PIXEL],
        }
    }

    /// Wrap raw RGBA8 bytes
    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        if pixels.len() != width * height * BYTES_PER_PIXEL {
            return Err(Error::InvalidInput("pixel buffer does not match dimensions"));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Opaque frame of a single color
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        let pixels = [color.r, color.g, color.b, 255].repeat(width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Opaque horizontal gradient, identical on every row
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn gradient(width: usize, height: usize, from: Hsv, to: Hsv) -> Self {
        let lerp = |a: u8, b: u8, x: usize| {
            if width < 2 {
                return a;
            }
            let delta = i32::from(b) - i32::from(a);
            (i32::from(a) + delta * x as i32 / (width as i32 - 1)) as u8
        };
        let row: Vec<u8> = (0..width)
            .flat_map(|x| {
                let rgb = hsv2rgb(Hsv {
                    hue: lerp(from.hue, to.hue, x),
                    sat: lerp(from.sat, to.sat, x),
                    val: lerp(from.val, to.val, x),
                });
                [rgb.r, rgb.g, rgb.b, 255]
            })
            .collect();
        Self {
            width,
            height,
            pixels: row.repeat(height),
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    const fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * BYTES_PER_PIXEL
    }

    /// RGBA value at `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Color part of the pixel at `(x, y)`
    pub fn rgb(&self, x: usize, y: usize) -> Rgb {
        let [r, g, b, _] = self.pixel(x, y);
        Rgb::new(r, g, b)
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.pixels[i..i + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    /// Reset every pixel to transparent black
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }
}
