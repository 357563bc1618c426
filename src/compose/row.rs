use image::{RgbaImage, imageops};

use crate::foundation::error::{BandError, BandResult};

/// Stitch badge rasters left-to-right into one row raster.
///
/// `slots` holds one entry per configured row member; `None` marks a member whose
/// image could not be loaded. Adjoining badge art shares a one-pixel border column,
/// and trimming follows each member's configured position: the first slot loses its
/// rightmost column, the last slot its leftmost column, and interior slots both. A
/// single-slot row is treated as "first" and loses only its right column. Missing
/// members are skipped but still occupy their position.
///
/// The canvas starts fully transparent, is as wide as the trimmed widths combined and
/// as tall as the tallest image; every image is anchored at `y = 0`.
///
/// Returns `Ok(None)` when no slot holds an image (the row has no content) and a
/// validation error when an image has nothing left after trimming.
pub fn compose_row(slots: &[Option<RgbaImage>]) -> BandResult<Option<RgbaImage>> {
    let last = slots.len().saturating_sub(1);
    let mut cropped = Vec::with_capacity(slots.len());
    for (index, image) in slots.iter().enumerate() {
        let Some(image) = image else {
            continue;
        };
        let (w, h) = image.dimensions();
        let (left, right) = if index == 0 {
            (0, 1)
        } else if index == last {
            (1, 0)
        } else {
            (1, 1)
        };
        if w <= left + right || h == 0 {
            return Err(BandError::validation(format!(
                "row image {index} is {w}x{h} and has nothing left after trimming"
            )));
        }
        cropped.push(imageops::crop_imm(image, left, 0, w - left - right, h).to_image());
    }
    if cropped.is_empty() {
        return Ok(None);
    }

    let width: u32 = cropped.iter().map(RgbaImage::width).sum();
    let height = cropped.iter().map(RgbaImage::height).max().unwrap_or(1);

    let mut row = RgbaImage::new(width, height);
    let mut x = 0i64;
    for piece in &cropped {
        imageops::replace(&mut row, piece, x, 0);
        x += i64::from(piece.width());
    }

    Ok(Some(row))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/row.rs"]
mod tests;
