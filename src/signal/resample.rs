use alloc::vec::Vec;

use crate::error::{Error, Result};

/// Resize `data` to `resolution` values with linear interpolation.
///
/// Output index `i` samples the source at `i * (len - 1) / (resolution - 1)`,
/// so the first and last values are always preserved.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn resample(data: &[f32], resolution: usize) -> Result<Vec<f32>> {
    if data.len() < 2 {
        return Err(Error::InvalidInput("sample needs at least two values"));
    }
    if resolution < 2 {
        return Err(Error::InvalidInput("resolution must be at least 2"));
    }

    let last = data.len() - 1;
    let span = (resolution - 1) as f32;

    let resampled = (0..resolution)
        .map(|i| {
            let pos = (i * last) as f32 / span;
            let low = (libm::floorf(pos) as usize).min(last);
            let high = (libm::ceilf(pos) as usize).min(last);
            let weight = pos - low as f32;
            data[low] + (data[high] - data[low]) * weight
        })
        .collect();

    Ok(resampled)
}
