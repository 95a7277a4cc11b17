//! Display backend seam
//!
//! The renderer only needs three capabilities from a display backend: take a
//! pixel buffer as a texture, apply the animated color effect, and read the
//! composited framebuffer back. [`CpuCompositor`] implements them in software.

use crate::color::{Rgb, rotate_hue};
use crate::frame::Frame;

/// Parameters of the color effect applied while compositing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EffectParams {
    /// Hue rotation as a fraction of the color wheel, `0.0..1.0`
    pub hue_shift: f32,
}

impl EffectParams {
    /// Hue rotation for the time elapsed since start.
    ///
    /// One full turn of the color wheel takes twelve minutes.
    pub fn from_elapsed_ms(elapsed_ms: u64) -> Self {
        let minutes = elapsed_ms as f32 / 60_000.0;
        Self {
            hue_shift: libm::fmodf(minutes / 12.0, 1.0),
        }
    }

    /// Hue rotation on the 0-255 hue circle
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn hue_steps(self) -> u8 {
        (libm::roundf(self.hue_shift * 256.0) as u32 % 256) as u8
    }
}

/// Abstract display backend
///
/// Implement this trait to composite on other targets (GPU, preview window).
pub trait Rasterizer {
    /// Use `frame` as the source texture of the next composite
    fn upload(&mut self, frame: &Frame);

    /// Composite the uploaded texture with the given effect
    fn apply_effect(&mut self, params: EffectParams);

    /// Composited framebuffer, row 0 first
    fn readback(&self) -> &Frame;
}

/// Software compositor
///
/// The framebuffer is the uploaded image turned a quarter: its width is the
/// image height and its row `x` holds image column `x`. Framebuffer columns
/// therefore follow image rows, and framebuffer rows 0 and `height - 1` are the
/// first and last pixels of every image row.
#[derive(Debug, Clone)]
pub struct CpuCompositor {
    texture: Frame,
    framebuffer: Frame,
}

impl CpuCompositor {
    pub fn new() -> Self {
        Self {
            texture: Frame::new(0, 0),
            framebuffer: Frame::new(0, 0),
        }
    }
}

impl Default for CpuCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for CpuCompositor {
    fn upload(&mut self, frame: &Frame) {
        if self.texture.width() == frame.width() && self.texture.height() == frame.height() {
            self.texture.pixels_mut().copy_from_slice(frame.pixels());
        } else {
            self.texture = frame.clone();
        }
    }

    fn apply_effect(&mut self, params: EffectParams) {
        let (width, height) = (self.texture.height(), self.texture.width());
        if self.framebuffer.width() != width || self.framebuffer.height() != height {
            self.framebuffer = Frame::new(width, height);
        }

        let shift = params.hue_steps();
        for row in 0..self.texture.height() {
            for col in 0..self.texture.width() {
                let [r, g, b, a] = self.texture.pixel(col, row);
                let rgb = rotate_hue(Rgb::new(r, g, b), shift);
                self.framebuffer.set_pixel(row, col, [rgb.r, rgb.g, rgb.b, a]);
            }
        }
    }

    fn readback(&self) -> &Frame {
        &self.framebuffer
    }
}
