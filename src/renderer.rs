//! Profile-to-color renderer
//!
//! Stretches every row band of the base image to the width its profile value
//! asks for, composites the result through a [`Rasterizer`], and classifies
//! each framebuffer column into two representative colors.

use alloc::vec::Vec;

use log::trace;

use crate::color::{Rgb, distance_sq};
use crate::error::{Error, Result};
use crate::frame::{BYTES_PER_PIXEL, BaseImage, Frame};
use crate::rasterizer::{EffectParams, Rasterizer};
use crate::signal::round2;

/// Classification of one logical position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRecord {
    /// Framebuffer column sampled for this position
    pub column: usize,
    /// Color at the first framebuffer row
    pub extreme_a: Rgb,
    /// Color at the last framebuffer row
    pub extreme_b: Rgb,
    /// Share of the column closer to `extreme_a`, `0.0..=100.0`
    pub percentage_a: f32,
    /// Share of the column closer to `extreme_b`; always `100 - percentage_a`
    pub percentage_b: f32,
}

/// Normalized width factor of a profile value.
///
/// Zero, negative and NaN values cannot be stretched.
pub fn band_scale(value: f32, max_value: f32, index: usize) -> Result<f32> {
    let scale = value / max_value;
    if scale > 0.0 && scale.is_finite() {
        Ok(scale)
    } else {
        Err(Error::DegenerateProfile { index })
    }
}

/// Renders profiles into column records
pub struct ProfileRenderer<R: Rasterizer> {
    rasterizer: R,
    max_value: f32,
    stretched: Frame,
    records: Vec<ColumnRecord>,
}

impl<R: Rasterizer> ProfileRenderer<R> {
    pub fn new(rasterizer: R, max_value: f32) -> Self {
        Self {
            rasterizer,
            max_value,
            stretched: Frame::new(0, 0),
            records: Vec::new(),
        }
    }

    pub fn set_max_value(&mut self, max_value: f32) {
        self.max_value = max_value;
    }

    /// Stretched image produced by the last [`ProfileRenderer::stretch`]
    pub fn stretched(&self) -> &Frame {
        &self.stretched
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Column records of the last render
    pub fn records(&self) -> &[ColumnRecord] {
        &self.records
    }

    /// Render one frame and classify it into one record per profile value
    pub fn render(
        &mut self,
        profile: &[f32],
        base: &BaseImage,
        effect: EffectParams,
    ) -> &[ColumnRecord] {
        self.stretch(profile, base);
        self.rasterizer.upload(&self.stretched);
        self.rasterizer.apply_effect(effect);
        classify_columns(self.rasterizer.readback(), profile.len(), &mut self.records);
        &self.records
    }

    /// Build the stretched image.
    ///
    /// Profile index `y` owns rows `[y * H / R, (y + 1) * H / R)`. Each of those
    /// rows keeps `floor(W * value)` pixels sampled from the base image at
    /// `floor(x / value)`; the remainder of the row stays transparent black.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn stretch(&mut self, profile: &[f32], base: &BaseImage) {
        let (width, height) = (base.width(), base.height());
        if self.stretched.width() != width || self.stretched.height() != height {
            self.stretched = Frame::new(width, height);
        }
        let bands = profile.len();
        if bands == 0 || width == 0 {
            self.stretched.clear();
            return;
        }

        let row_bytes = width * BYTES_PER_PIXEL;
        for (y, value) in profile.iter().enumerate() {
            let (row_width, scale) = match band_scale(*value, self.max_value, y) {
                Ok(scale) => {
                    let row_width = (libm::floorf(width as f32 * scale) as usize).min(width);
                    (row_width, scale)
                }
                Err(err) => {
                    trace!("{err}, leaving band empty");
                    (0, 1.0)
                }
            };

            let start_row = y * height / bands;
            let end_row = (y + 1) * height / bands;
            for row in start_row..end_row {
                let src = &base.pixels()[row * row_bytes..(row + 1) * row_bytes];
                let dst = &mut self.stretched.pixels_mut()[row * row_bytes..(row + 1) * row_bytes];
                for x in 0..row_width {
                    let src_x = (libm::floorf(x as f32 / scale) as usize).min(width - 1);
                    let s = src_x * BYTES_PER_PIXEL;
                    let d = x * BYTES_PER_PIXEL;
                    dst[d..d + BYTES_PER_PIXEL].copy_from_slice(&src[s..s + BYTES_PER_PIXEL]);
                }
                dst[row_width * BYTES_PER_PIXEL..].fill(0);
            }
        }
    }
}

/// Classify `resolution` equally spaced framebuffer columns.
///
/// Every pixel of a column votes for the closer of the column's first and last
/// pixel (euclidean RGB distance); ties go to the last pixel.
pub fn classify_columns(framebuffer: &Frame, resolution: usize, out: &mut Vec<ColumnRecord>) {
    out.clear();
    let (width, height) = (framebuffer.width(), framebuffer.height());
    if width == 0 || height == 0 {
        return;
    }

    for position in 0..resolution {
        let column = (position * width / resolution).min(width - 1);
        let extreme_a = framebuffer.rgb(column, 0);
        let extreme_b = framebuffer.rgb(column, height - 1);

        let closer_to_a = (0..height)
            .filter(|row| {
                let pixel = framebuffer.rgb(column, *row);
                distance_sq(pixel, extreme_a) < distance_sq(pixel, extreme_b)
            })
            .count();

        let percentage_a = round2(closer_to_a as f32 / height as f32 * 100.0);
        out.push(ColumnRecord {
            column,
            extreme_a,
            extreme_b,
            percentage_a,
            percentage_b: round2(100.0 - percentage_a),
        });
    }
}
