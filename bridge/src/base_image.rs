//! Base image loading

use std::path::Path;

use anyhow::Context;
use image::imageops::FilterType;
use log::info;
use myrtio_stage_light::{BaseImage, Frame, Hsv, LightConfig};

/// Load `path` scaled to the configured size, or build the built-in gradient
pub(crate) fn load_base_image(path: Option<&Path>, config: &LightConfig) -> anyhow::Result<BaseImage> {
    let (width, height) = (config.image_width, config.image_height);
    let Some(path) = path else {
        info!("no base image given, using a {width}x{height} gradient");
        return Ok(Frame::gradient(
            width,
            height,
            Hsv {
                hue: 0,
                sat: 255,
                val: 255,
            },
            Hsv {
                hue: 200,
                sat: 160,
                val: 255,
            },
        ));
    };

    let decoded = image::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let rgba = decoded
        .resize_exact(u32::try_from(width)?, u32::try_from(height)?, FilterType::Triangle)
        .to_rgba8();
    info!("loaded base image {} as {width}x{height}", path.display());
    Ok(Frame::from_rgba(width, height, rgba.into_raw())?)
}
