use image::{GrayImage, RgbaImage};

use crate::foundation::math::{mul_div255_u8, premultiply, unpremultiply};

pub(crate) type PremulRgba8 = [u8; 4];

/// Premultiplied source-over: `src + dst * (1 - src.a)`.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Composite straight-alpha `src` over straight-alpha `dst` with `src`'s top-left at `(x, y)`.
///
/// Offsets may be negative or extend past `dst`; pixels outside `dst` are dropped.
pub fn overlay_at(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + sw).min(dw);
    let y_end = (y + sh).min(dh);
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    for dy in y_start..y_end {
        for dx in x_start..x_end {
            let s = src.get_pixel((dx - x) as u32, (dy - y) as u32).0;
            if s[3] == 0 {
                continue;
            }
            let d = dst.get_pixel_mut(dx as u32, dy as u32);
            d.0 = if s[3] == 255 {
                s
            } else {
                unpremultiply(over(premultiply(d.0), premultiply(s)))
            };
        }
    }
}

/// Multiply `img`'s alpha channel by `mask` (`255` keeps, `0` drops). Dimensions must match.
pub(crate) fn mask_alpha_in_place(img: &mut RgbaImage, mask: &GrayImage) {
    debug_assert_eq!(img.dimensions(), mask.dimensions());
    for (px, m) in img.pixels_mut().zip(mask.pixels()) {
        px.0[3] = mul_div255_u8(u16::from(px.0[3]), u16::from(m.0[0]));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composite.rs"]
mod tests;
