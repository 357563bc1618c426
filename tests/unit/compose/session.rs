use image::{Rgba, RgbaImage};

use super::*;
use crate::assets::source::MemoryImageSource;
use crate::foundation::core::PixelBox;
use crate::model::band::BadgeUnit;

fn bg_with_plate(x0: u32, y0: u32) -> RgbaImage {
    let mut bg = RgbaImage::from_pixel(20, 20, Rgba([10, 10, 10, 255]));
    for y in y0..y0 + 3 {
        for x in x0..x0 + 5 {
            bg.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }
    bg
}

#[test]
fn layout_changes_reuse_the_cached_region() {
    let mut source = MemoryImageSource::new()
        .with("bg", bg_with_plate(2, 2))
        .with("b", RgbaImage::from_pixel(4, 2, Rgba([0, 255, 0, 255])));
    let mut band = BandConfig::new("bg", 1);
    let mut renderer = BandRenderer::new();

    let first = renderer.render(&band, &source, None).unwrap();
    assert_eq!(renderer.detections(), 1);
    assert_eq!(first.region.unwrap().bbox, PixelBox::new(2, 2, 7, 5));

    renderer.note_change(band.push_item(BadgeUnit::badge("b")));
    renderer.note_change(band.set_margin(3));
    renderer.render(&band, &source, None).unwrap();
    assert_eq!(renderer.detections(), 1);

    source.insert("b", RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255])));
    renderer.render(&band, &source, None).unwrap();
    assert_eq!(renderer.detections(), 1);
}

#[test]
fn background_change_forces_detection() {
    let source = MemoryImageSource::new()
        .with("bg1", bg_with_plate(2, 2))
        .with("bg2", bg_with_plate(10, 12));
    let mut band = BandConfig::new("bg1", 0);
    let mut renderer = BandRenderer::new();
    renderer.render(&band, &source, None).unwrap();

    renderer.note_change(band.set_background("bg2"));
    assert!(renderer.cached_region().is_none());
    let out = renderer.render(&band, &source, None).unwrap();
    assert_eq!(renderer.detections(), 2);
    assert_eq!(out.region.unwrap().bbox, PixelBox::new(10, 12, 15, 15));
}

#[test]
fn in_place_replacement_is_detected_by_fingerprint() {
    let mut source = MemoryImageSource::new().with("bg", bg_with_plate(2, 2));
    let band = BandConfig::new("bg", 0);
    let mut renderer = BandRenderer::new();
    renderer.render(&band, &source, None).unwrap();

    source.insert("bg", bg_with_plate(8, 9));
    let out = renderer.render(&band, &source, None).unwrap();
    assert_eq!(renderer.detections(), 2);
    assert_eq!(out.region.unwrap().bbox, PixelBox::new(8, 9, 13, 12));
    assert_eq!(
        renderer.cached_region().map(|r| r.bbox),
        Some(PixelBox::new(8, 9, 13, 12))
    );
}

#[test]
fn missing_background_leaves_cache_untouched() {
    let source = MemoryImageSource::new().with("bg", bg_with_plate(2, 2));
    let mut band = BandConfig::new("bg", 0);
    let mut renderer = BandRenderer::new();
    renderer.render(&band, &source, None).unwrap();

    band.set_background("");
    assert!(renderer.render(&band, &source, None).is_err());
    band.set_background("bg");
    renderer.render(&band, &source, None).unwrap();
    assert_eq!(renderer.detections(), 1);
}

#[test]
fn cached_and_fresh_renders_match() {
    let source = MemoryImageSource::new()
        .with("bg", bg_with_plate(3, 4))
        .with("b", RgbaImage::from_pixel(5, 3, Rgba([200, 0, 100, 255])));
    let mut band = BandConfig::new("bg", 2);
    band.push_item(BadgeUnit::badge("b"));

    let mut renderer = BandRenderer::new();
    let a = renderer.render(&band, &source, None).unwrap();
    let b = renderer.render(&band, &source, None).unwrap();
    let fresh = crate::compose::band::render(&band, &source, None).unwrap();
    assert_eq!(a.image, b.image);
    assert_eq!(a.image, fresh.image);
    assert_eq!(renderer.detections(), 1);
}
