use crate::foundation::error::{SealError, SealResult};

/// Axis-aligned pixel rectangle, `x1`/`y1` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    pub fn width(self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(self) -> u32 {
        self.y1 - self.y0
    }

    /// Grow by `pad` on every side, clamped to a `width x height` canvas.
    pub fn padded(self, pad: u32, width: u32, height: u32) -> Self {
        Self {
            x0: self.x0.saturating_sub(pad),
            y0: self.y0.saturating_sub(pad),
            x1: self.x1.saturating_add(pad).min(width),
            y1: self.y1.saturating_add(pad).min(height),
        }
    }
}

/// Bounding box of pixels with non-zero alpha.
pub fn alpha_bounds(data: &[u8], width: u32, height: u32) -> Option<PixelRect> {
    let mut out: Option<PixelRect> = None;
    for y in 0..height {
        let row = (y * width) as usize * 4;
        for x in 0..width {
            if data[row + x as usize * 4 + 3] == 0 {
                continue;
            }
            out = Some(match out {
                None => PixelRect {
                    x0: x,
                    y0: y,
                    x1: x + 1,
                    y1: y + 1,
                },
                Some(r) => PixelRect {
                    x0: r.x0.min(x),
                    y0: r.y0.min(y),
                    x1: r.x1.max(x + 1),
                    y1: r.y1.max(y + 1),
                },
            });
        }
    }
    out
}

/// Kernel radius covering three standard deviations.
pub fn radius_for_sigma(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (3.0 * sigma).ceil() as u32
}

const ONE_Q16: u64 = 1 << 16;

/// Gaussian taps in 16.16 fixed point, summing to exactly one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GaussianKernel {
    taps: Vec<u64>,
}

impl GaussianKernel {
    pub fn new(sigma: f32) -> SealResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(SealError::validation("blur sigma must be > 0"));
        }
        let radius = radius_for_sigma(sigma) as i64;
        let two_var = 2.0 * f64::from(sigma).powi(2);
        let weights: Vec<f64> = (-radius..=radius)
            .map(|i| (-(i * i) as f64 / two_var).exp())
            .collect();
        let total: f64 = weights.iter().sum();

        // Quantize the running sum so rounding error never accumulates.
        let mut prev = 0u64;
        let mut running = 0.0;
        let taps = weights
            .iter()
            .map(|w| {
                running += w / total;
                let edge = ((running * ONE_Q16 as f64).round() as u64).min(ONE_Q16);
                let tap = edge - prev;
                prev = edge;
                tap
            })
            .collect::<Vec<_>>();
        let mut kernel = Self { taps };
        if let Some(last) = kernel.taps.last_mut() {
            *last += ONE_Q16 - prev;
        }
        Ok(kernel)
    }

    pub fn radius(&self) -> usize {
        self.taps.len() / 2
    }

    pub fn taps(&self) -> &[u64] {
        &self.taps
    }

    /// Convolve `lines` runs of `len` RGBA pixels each, clamping at the ends of every run.
    ///
    /// `line_step` and `pixel_step` are byte offsets, so the same loop blurs rows or columns.
    fn convolve(&self, src: &[u8], dst: &mut [u8], runs: Runs) {
        let r = self.radius() as isize;
        let last = runs.len as isize - 1;
        for line in 0..runs.lines {
            let base = line * runs.line_step;
            for i in 0..runs.len {
                let mut acc = [0u64; 4];
                for (k, &tap) in self.taps.iter().enumerate() {
                    let j = (i as isize + k as isize - r).clamp(0, last) as usize;
                    let px = &src[base + j * runs.pixel_step..][..4];
                    for (a, &v) in acc.iter_mut().zip(px) {
                        *a += tap * u64::from(v);
                    }
                }
                let out = &mut dst[base + i * runs.pixel_step..][..4];
                for (o, a) in out.iter_mut().zip(acc) {
                    *o = ((a + ONE_Q16 / 2) >> 16).min(255) as u8;
                }
            }
        }
    }
}

#[derive(Clone, Copy)]
struct Runs {
    lines: usize,
    len: usize,
    line_step: usize,
    pixel_step: usize,
}

/// Separable gaussian blur of a premultiplied RGBA8 buffer. A non-positive `sigma` copies.
pub fn blur_premul(src: &[u8], width: u32, height: u32, sigma: f32) -> SealResult<Vec<u8>> {
    let (w, h) = (width as usize, height as usize);
    let expected_len = w
        .checked_mul(h)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| SealError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(SealError::render(
            "blur_premul expects src matching width*height*4",
        ));
    }
    if radius_for_sigma(sigma) == 0 || w == 0 || h == 0 {
        return Ok(src.to_vec());
    }

    let kernel = GaussianKernel::new(sigma)?;
    let mut rows = vec![0u8; expected_len];
    kernel.convolve(
        src,
        &mut rows,
        Runs {
            lines: h,
            len: w,
            line_step: w * 4,
            pixel_step: 4,
        },
    );
    let mut out = vec![0u8; expected_len];
    kernel.convolve(
        &rows,
        &mut out,
        Runs {
            lines: w,
            len: h,
            line_step: 4,
            pixel_step: w * 4,
        },
    );
    Ok(out)
}

/// Blur only the pixels near non-transparent content, in place.
///
/// Everything outside `bounds` padded by the kernel radius must already be transparent; that
/// region stays transparent after a full-frame blur too, so the result is identical.
pub fn blur_content_in_place(
    data: &mut [u8],
    width: u32,
    height: u32,
    sigma: f32,
) -> SealResult<()> {
    let radius = radius_for_sigma(sigma);
    if radius == 0 {
        return Ok(());
    }
    let Some(bounds) = alpha_bounds(data, width, height) else {
        return Ok(());
    };
    let region = bounds.padded(radius, width, height);
    let row_bytes = region.width() as usize * 4;
    let start_of = |y: u32| ((y * width + region.x0) as usize) * 4;

    let crop: Vec<u8> = (region.y0..region.y1)
        .flat_map(|y| data[start_of(y)..start_of(y) + row_bytes].iter().copied())
        .collect();
    let blurred = blur_premul(&crop, region.width(), region.height(), sigma)?;
    for (y, row) in (region.y0..region.y1).zip(blurred.chunks_exact(row_bytes)) {
        data[start_of(y)..start_of(y) + row_bytes].copy_from_slice(row);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
