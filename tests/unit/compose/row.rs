use image::Rgba;

use super::*;

fn solid(w: u32, h: u32, c: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(c))
}

#[test]
fn empty_row_has_no_content() {
    assert!(compose_row(&[]).unwrap().is_none());
    assert!(compose_row(&[None, None]).unwrap().is_none());
}

#[test]
fn widths_follow_trim_rule() {
    let widths = [7u32, 5, 9, 4];
    let images = widths
        .iter()
        .map(|&w| Some(solid(w, 3, [1, 2, 3, 255])))
        .collect::<Vec<_>>();
    let row = compose_row(&images).unwrap().unwrap();

    let expected = (widths[0] - 1) + (widths[1] - 2) + (widths[2] - 2) + (widths[3] - 1);
    assert_eq!(row.dimensions(), (expected, 3));
}

#[test]
fn two_images_drop_the_shared_seam() {
    let mut left = solid(3, 1, [10, 0, 0, 255]);
    left.put_pixel(2, 0, Rgba([99, 99, 99, 255]));
    let mut right = solid(3, 1, [0, 20, 0, 255]);
    right.put_pixel(0, 0, Rgba([99, 99, 99, 255]));

    let row = compose_row(&[Some(left), Some(right)]).unwrap().unwrap();
    assert_eq!(row.width(), 4);
    for x in 0..2 {
        assert_eq!(row.get_pixel(x, 0).0, [10, 0, 0, 255]);
    }
    for x in 2..4 {
        assert_eq!(row.get_pixel(x, 0).0, [0, 20, 0, 255]);
    }
}

#[test]
fn shorter_images_anchor_top_on_transparent_canvas() {
    let tall = solid(4, 4, [255, 0, 0, 255]);
    let short = solid(4, 2, [0, 0, 255, 255]);
    let row = compose_row(&[Some(tall), Some(short)]).unwrap().unwrap();

    assert_eq!(row.dimensions(), (6, 4));
    assert_eq!(row.get_pixel(4, 0).0, [0, 0, 255, 255]);
    assert_eq!(row.get_pixel(4, 1).0, [0, 0, 255, 255]);
    assert_eq!(row.get_pixel(4, 2).0[3], 0);
    assert_eq!(row.get_pixel(5, 3).0[3], 0);
}

#[test]
fn single_image_loses_right_column_only() {
    let mut img = solid(3, 2, [5, 5, 5, 255]);
    img.put_pixel(0, 0, Rgba([7, 7, 7, 255]));
    let row = compose_row(&[Some(img)]).unwrap().unwrap();
    assert_eq!(row.dimensions(), (2, 2));
    assert_eq!(row.get_pixel(0, 0).0, [7, 7, 7, 255]);
}

#[test]
fn too_narrow_images_are_rejected() {
    assert!(compose_row(&[Some(solid(1, 3, [0, 0, 0, 255])), Some(solid(4, 3, [0, 0, 0, 255]))]).is_err());
    let interior_too_narrow = [
        Some(solid(4, 1, [0, 0, 0, 255])),
        Some(solid(2, 1, [0, 0, 0, 255])),
        Some(solid(4, 1, [0, 0, 0, 255])),
    ];
    assert!(compose_row(&interior_too_narrow).is_err());
}

#[test]
fn missing_slots_keep_configured_positions() {
    // [missing, b, c]: b is interior and loses both edge columns, c loses its left one.
    let mut b = solid(4, 1, [0, 255, 0, 255]);
    b.put_pixel(0, 0, Rgba([9, 9, 9, 255]));
    b.put_pixel(3, 0, Rgba([9, 9, 9, 255]));
    let mut c = solid(3, 1, [0, 0, 255, 255]);
    c.put_pixel(0, 0, Rgba([9, 9, 9, 255]));

    let row = compose_row(&[None, Some(b), Some(c)]).unwrap().unwrap();
    assert_eq!(row.width(), 2 + 2);
    let px = (0..4).map(|x| row.get_pixel(x, 0).0).collect::<Vec<_>>();
    assert_eq!(
        px,
        [[0, 255, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255], [0, 0, 255, 255]]
    );
}

#[test]
fn trailing_member_after_missing_first_trims_left() {
    let mut b = solid(3, 1, [0, 255, 0, 255]);
    b.put_pixel(0, 0, Rgba([9, 9, 9, 255]));
    let row = compose_row(&[None, Some(b)]).unwrap().unwrap();
    assert_eq!(row.width(), 2);
    assert!(row.pixels().all(|p| p.0 == [0, 255, 0, 255]));
}
