use image::{Luma, Rgba};

use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [0, 0, 0, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_half_red_on_opaque_white() {
    let dst = [255, 255, 255, 255];
    let src = premultiply([255, 0, 0, 128]);
    assert_eq!(over(dst, src), [255, 127, 127, 255]);
}

#[test]
fn overlay_clips_negative_offsets() {
    let mut dst = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
    let src = RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 255]));
    overlay_at(&mut dst, &src, -2, -1);

    assert_eq!(dst.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(dst.get_pixel(0, 1).0, [255, 255, 255, 255]);
    assert_eq!(dst.get_pixel(0, 2).0, [0, 0, 0, 255]);
    assert_eq!(dst.get_pixel(1, 0).0, [0, 0, 0, 255]);
}

#[test]
fn overlay_fully_outside_is_noop() {
    let mut dst = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
    let before = dst.clone();
    let src = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
    overlay_at(&mut dst, &src, 0, -10);
    overlay_at(&mut dst, &src, 5, 0);
    assert_eq!(dst, before);
}

#[test]
fn overlay_keeps_dst_under_transparent_src() {
    let mut dst = RgbaImage::from_pixel(2, 1, Rgba([9, 9, 9, 255]));
    let mut src = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 0, 255]));
    src.put_pixel(1, 0, Rgba([255, 0, 0, 0]));
    overlay_at(&mut dst, &src, 0, 0);
    assert_eq!(dst.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(dst.get_pixel(1, 0).0, [9, 9, 9, 255]);
}

#[test]
fn mask_alpha_drops_outside_pixels() {
    let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
    let mut mask = GrayImage::from_pixel(2, 1, Luma([255]));
    mask.put_pixel(1, 0, Luma([0]));
    mask_alpha_in_place(&mut img, &mask);
    assert_eq!(img.get_pixel(0, 0).0[3], 255);
    assert_eq!(img.get_pixel(1, 0).0[3], 0);
}
