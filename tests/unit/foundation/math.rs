use super::*;

#[test]
fn fnv_is_streaming_and_matches_reference() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"leatherband");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"leather");
    b.write_bytes(b"band");
    assert_eq!(a.finish(), b.finish());

    let mut empty = Fnv1a64::new_default();
    empty.write_bytes(b"");
    assert_eq!(empty.finish(), 0xcbf2_9ce4_8422_2325);
    let mut single = Fnv1a64::new_default();
    single.write_bytes(b"a");
    assert_eq!(single.finish(), 0xaf63_dc4c_8601_ec8c);
}

#[test]
fn fnv_str_is_length_prefixed() {
    let mut a = Fnv1a64::new_default();
    a.write_str("ab");
    a.write_str("c");
    let mut b = Fnv1a64::new_default();
    b.write_str("a");
    b.write_str("bc");
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn premultiply_extremes() {
    assert_eq!(premultiply([10, 20, 30, 0]), [0, 0, 0, 0]);
    assert_eq!(premultiply([10, 20, 30, 255]), [10, 20, 30, 255]);
    assert_eq!(premultiply([255, 0, 0, 128]), [128, 0, 0, 128]);
}

#[test]
fn unpremultiply_recovers_opaque_and_half() {
    assert_eq!(unpremultiply([10, 20, 30, 255]), [10, 20, 30, 255]);
    assert_eq!(unpremultiply([9, 9, 9, 0]), [0, 0, 0, 0]);
    assert_eq!(unpremultiply([128, 0, 0, 128]), [255, 0, 0, 128]);
}
