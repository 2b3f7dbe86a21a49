use super::*;

#[test]
fn zero_sigma_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_premul(&src, 1, 2, 0.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn kernel_sums_to_one_and_peaks_in_the_middle() {
    let k = GaussianKernel::new(1.5).unwrap();
    assert_eq!(k.radius(), 5);
    assert_eq!(k.taps().len(), 11);
    assert_eq!(k.taps().iter().sum::<u64>(), 1 << 16);
    let peak = k.taps().iter().max().unwrap();
    assert_eq!(k.taps()[5], *peak);
    // Mirror taps agree up to quantization.
    for i in 0..5 {
        assert!(k.taps()[i].abs_diff(k.taps()[10 - i]) <= 1);
    }
    assert!(GaussianKernel::new(0.0).is_err());
    assert!(GaussianKernel::new(f32::NAN).is_err());
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_premul(&src, w, h, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_premul(&src, w, h, 0.6).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn content_blur_matches_full_frame_blur() {
    let (w, h) = (40u32, 30u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    for (x, y) in [(10u32, 10u32), (11, 10), (20, 15), (21, 16)] {
        let i = ((y * w + x) * 4) as usize;
        src[i..i + 4].copy_from_slice(&[0, 0, 0, 255]);
    }

    let sigma = 1.0;
    let full = blur_premul(&src, w, h, sigma).unwrap();
    let mut local = src.clone();
    blur_content_in_place(&mut local, w, h, sigma).unwrap();
    assert_eq!(local, full);
}

#[test]
fn alpha_bounds_tracks_extent() {
    let (w, h) = (8u32, 6u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    assert_eq!(alpha_bounds(&src, w, h), None);
    src[((2 * w + 3) * 4 + 3) as usize] = 1;
    src[((4 * w + 5) * 4 + 3) as usize] = 9;
    assert_eq!(
        alpha_bounds(&src, w, h),
        Some(PixelRect {
            x0: 3,
            y0: 2,
            x1: 6,
            y1: 5
        })
    );
    let padded = PixelRect {
        x0: 3,
        y0: 2,
        x1: 6,
        y1: 5,
    }
    .padded(4, w, h);
    assert_eq!(
        padded,
        PixelRect {
            x0: 0,
            y0: 0,
            x1: 8,
            y1: 6
        }
    );
}

#[test]
fn buffer_length_mismatch_is_an_error() {
    assert!(blur_premul(&[0u8; 7], 1, 2, 1.0).is_err());
}

#[test]
fn rows_and_columns_blur_alike() {
    // A vertical bar blurred must equal the transposed blur of a horizontal bar.
    let (n, sigma) = (9u32, 1.0);
    let mut horiz = vec![0u8; (n * n * 4) as usize];
    let mut vert = horiz.clone();
    for i in 0..n {
        let h = ((4 * n + i) * 4) as usize;
        let v = ((i * n + 4) * 4) as usize;
        horiz[h..h + 4].copy_from_slice(&[0, 0, 0, 200]);
        vert[v..v + 4].copy_from_slice(&[0, 0, 0, 200]);
    }
    let bh = blur_premul(&horiz, n, n, sigma).unwrap();
    let bv = blur_premul(&vert, n, n, sigma).unwrap();
    for y in 0..n {
        for x in 0..n {
            let a = bh[((y * n + x) * 4 + 3) as usize];
            let b = bv[((x * n + y) * 4 + 3) as usize];
            assert_eq!(a, b, "({x}, {y})");
        }
    }
}
