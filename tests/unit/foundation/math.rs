use super::*;

#[test]
fn unpremul_opaque_is_identity() {
    let px = [200, 10, 99, 255];
    assert_eq!(unpremul_rgba8(px), px);
}

#[test]
fn unpremul_half_alpha_rounds_to_nearest() {
    assert_eq!(unpremul_rgba8([128, 0, 64, 128]), [255, 0, 128, 128]);
    assert_eq!(mul_div255(255, 128), 128);
}

#[test]
fn unpremul_transparent_is_zero() {
    assert_eq!(unpremul_rgba8([0, 0, 0, 0]), [0, 0, 0, 0]);
    assert_eq!(unpremul_rgba8([3, 3, 3, 0]), [0, 0, 0, 0]);
}
