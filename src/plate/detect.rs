use image::{GrayImage, Luma, RgbaImage};
use imageproc::region_labelling::{Connectivity, connected_components};

use crate::foundation::core::PixelBox;

/// Luminance strictly above this value counts as plate.
pub const PLATE_LUMA_THRESHOLD: u8 = 254;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Detected name-plate area inside a background raster.
pub struct NamePlateRegion {
    /// Tight bounds of the largest near-white component.
    pub bbox: PixelBox,
    /// Binary silhouette cropped to `bbox`: `255` where the background is near-white, else `0`.
    ///
    /// Every near-white pixel inside `bbox` is set, including pixels of other components
    /// that happen to fall inside the box.
    pub mask: GrayImage,
}

/// ITU-R 601-2 luma with rounding; alpha is ignored.
pub fn luminance(px: [u8; 4]) -> u8 {
    let l = u32::from(px[0]) * 299 + u32::from(px[1]) * 587 + u32::from(px[2]) * 114;
    ((l + 500) / 1000) as u8
}

/// Binarize `background`: `255` where luminance exceeds [`PLATE_LUMA_THRESHOLD`], else `0`.
pub fn plate_mask(background: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(background.width(), background.height(), |x, y| {
        if luminance(background.get_pixel(x, y).0) > PLATE_LUMA_THRESHOLD {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

#[derive(Clone, Copy, Debug)]
struct ComponentStats {
    area: u64,
    first_seen: u64,
    bbox: PixelBox,
}

/// Find the name plate: the largest 8-connected near-white component of `background`.
///
/// Ties on area go to the component reached first in row-major scan order. Returns
/// `None` when the background has no near-white pixel at all.
#[tracing::instrument(level = "debug", skip_all, fields(w = background.width(), h = background.height()))]
pub fn detect(background: &RgbaImage) -> Option<NamePlateRegion> {
    let binary = plate_mask(background);
    let labels = connected_components(&binary, Connectivity::Eight, Luma([0u8]));

    let mut stats: Vec<Option<ComponentStats>> = Vec::new();
    for (scan, (x, y, label)) in labels.enumerate_pixels().enumerate() {
        let label = label.0[0] as usize;
        if label == 0 {
            continue;
        }
        if stats.len() <= label {
            stats.resize(label + 1, None);
        }
        match stats[label].as_mut() {
            Some(s) => {
                s.area += 1;
                s.bbox.include(x, y);
            }
            None => {
                stats[label] = Some(ComponentStats {
                    area: 1,
                    first_seen: scan as u64,
                    bbox: PixelBox::pixel(x, y),
                });
            }
        }
    }

    let best = stats
        .iter()
        .flatten()
        .min_by(|a, b| b.area.cmp(&a.area).then(a.first_seen.cmp(&b.first_seen)))
        .copied();

    let Some(best) = best else {
        tracing::debug!("no near-white component; name plate absent");
        return None;
    };

    let bbox = best.bbox;
    let mask = image::imageops::crop_imm(&binary, bbox.x0, bbox.y0, bbox.width(), bbox.height())
        .to_image();
    tracing::debug!(
        x0 = bbox.x0,
        y0 = bbox.y0,
        x1 = bbox.x1,
        y1 = bbox.y1,
        area = best.area,
        components = stats.iter().flatten().count(),
        "name plate detected"
    );
    Some(NamePlateRegion { bbox, mask })
}

#[cfg(test)]
#[path = "../../tests/unit/plate/detect.rs"]
mod tests;
