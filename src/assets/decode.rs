use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{BandError, BandResult};

/// Decode encoded image bytes (any format `image` understands) into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> BandResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(BandError::validation("decoded image has zero width or height"));
    }
    Ok(rgba)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
