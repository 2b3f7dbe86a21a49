use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_scaled_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
    assert_eq!(over(dst, [0, 0, 0, 255], 0.08), [0, 0, 0, 20]);
}

#[test]
fn shifted_over_moves_content_by_offset() {
    let (w, h) = (3u32, 3u32);
    let mut src = vec![0u8; 36];
    src[0..4].copy_from_slice(&[0, 0, 0, 255]);
    let mut dst = vec![0u8; 36];
    over_shifted_in_place(&mut dst, &src, w, h, 1, 1, 1.0).unwrap();
    assert_eq!(&dst[0..4], &[0, 0, 0, 0]);
    let i = ((w + 1) * 4) as usize;
    assert_eq!(&dst[i..i + 4], &[0, 0, 0, 255]);
}

#[test]
fn shifted_over_drops_pixels_past_the_edge() {
    let (w, h) = (2u32, 2u32);
    let src = [0u8, 0, 0, 255].repeat(4);
    let mut dst = vec![0u8; 16];
    over_shifted_in_place(&mut dst, &src, w, h, 5, 0, 1.0).unwrap();
    assert!(dst.iter().all(|&b| b == 0));
}

#[test]
fn mismatched_lengths_are_errors() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
    assert!(over_shifted_in_place(&mut dst, &[0u8; 8], 3, 1, 1, 0, 1.0).is_err());
}
