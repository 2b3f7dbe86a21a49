use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    config::SealConfig,
    foundation::{
        core::Point,
        error::{SealError, SealResult},
    },
    render::FrameRGBA,
};

/// Half-width of the ring band where edge erosion applies.
pub const EROSION_BAND: f64 = 8.0;
pub const FADE_AREA_COUNT: usize = 2;

const EROSION_ALPHA_PROB: f64 = 0.13;
const EROSION_DARKEN_PROB: f64 = 0.18;
const EROSION_DARKEN: f64 = 0.7;
const NOISE_SCALE: f64 = 0.7;

/// Elliptical region of extra fading, alive for one filter pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeArea {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
    /// RGB multiplier in `[0.5, 0.7]`.
    pub fade: f64,
}

impl FadeArea {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = (x - self.center.x) / self.rx;
        let dy = (y - self.center.y) / self.ry;
        dx * dx + dy * dy < 1.0
    }
}

/// Ink wear post-process over a straight-alpha RGBA buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgingFilter {
    pub strength: f64,
    /// Untransformed canvas center.
    pub center: Point,
    pub usable_radius: f64,
}

impl AgingFilter {
    pub fn new(strength: f64, center: Point, usable_radius: f64) -> SealResult<Self> {
        if !(0.0..=1.0).contains(&strength) {
            return Err(SealError::validation("aging strength must be in [0, 1]"));
        }
        Ok(Self {
            strength,
            center,
            usable_radius,
        })
    }

    pub fn from_config(cfg: &SealConfig) -> SealResult<Self> {
        Self::new(
            cfg.aging_strength,
            Point::new(cfg.size / 2.0, cfg.size / 2.0),
            cfg.usable_radius(),
        )
    }

    /// Per-channel multipliers of the global fade; red fades faster than green and blue.
    pub fn fade_factors(&self) -> [f64; 3] {
        let s = self.strength;
        [0.93 - 0.2 * s, 0.93 - 0.1 * s, 0.93 - 0.1 * s]
    }

    /// Whether pixel (`x`, `y`) lies strictly inside the erosion band around the outer ring.
    pub fn in_erosion_band(&self, x: f64, y: f64) -> bool {
        let d = (x - self.center.x).hypot(y - self.center.y);
        d > self.usable_radius - EROSION_BAND && d < self.usable_radius + EROSION_BAND
    }

    pub fn generate_fade_areas<R: Rng + ?Sized>(&self, rng: &mut R) -> [FadeArea; FADE_AREA_COUNT] {
        let r = self.usable_radius.max(1.0);
        std::array::from_fn(|_| {
            let angle = rng.gen_range(0.0..std::f64::consts::TAU);
            let dist = rng.gen_range(0.0..=0.6) * r;
            FadeArea {
                center: Point::new(
                    self.center.x + dist * angle.cos(),
                    self.center.y + dist * angle.sin(),
                ),
                rx: rng.gen_range(0.15..=0.35) * r,
                ry: rng.gen_range(0.15..=0.35) * r,
                fade: rng.gen_range(0.5..=0.7),
            }
        })
    }

    /// Age `frame` in place. `seed` makes the result reproducible; `None` draws from entropy so
    /// every call yields a distinct result.
    #[tracing::instrument(skip(self, frame), fields(strength = self.strength))]
    pub fn apply(&self, frame: &mut FrameRGBA, seed: Option<u64>) -> SealResult<()> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let areas = self.generate_fade_areas(&mut rng);
        self.apply_with(frame, &areas, &mut rng)
    }

    /// Single pass over the buffer with caller-provided fade areas and random source.
    pub fn apply_with<R: Rng + ?Sized>(
        &self,
        frame: &mut FrameRGBA,
        areas: &[FadeArea],
        rng: &mut R,
    ) -> SealResult<()> {
        if frame.premultiplied {
            return Err(SealError::render("aging expects straight-alpha pixels"));
        }
        let expected = frame.width as usize * frame.height as usize * 4;
        if frame.data.len() != expected {
            return Err(SealError::render("frame byte length mismatch"));
        }

        let width = frame.width as usize;
        let s = self.strength;
        let [fade_r, fade_g, fade_b] = self.fade_factors();

        for (i, px) in frame.data.chunks_exact_mut(4).enumerate() {
            if px[3] == 0 {
                continue;
            }
            let x = (i % width) as f64;
            let y = (i / width) as f64;

            let mut r = f64::from(px[0]) * fade_r;
            let mut g = f64::from(px[1]) * fade_g;
            let mut b = f64::from(px[2]) * fade_b;
            let mut a = f64::from(px[3]);

            let noise = rng.gen_range(-0.5..=0.5) * 255.0 * s * NOISE_SCALE;
            r = (r + noise).clamp(0.0, 255.0);
            g = (g + noise / 2.0).clamp(0.0, 255.0);
            b = (b + noise / 2.0).clamp(0.0, 255.0);

            if self.in_erosion_band(x, y) {
                if rng.r#gen::<f64>() < EROSION_ALPHA_PROB * s {
                    a *= rng.gen_range(0.5..=0.8);
                }
                if rng.r#gen::<f64>() < EROSION_DARKEN_PROB * s {
                    r *= EROSION_DARKEN;
                    g *= EROSION_DARKEN;
                    b *= EROSION_DARKEN;
                }
            }

            for area in areas {
                if area.contains(x, y) {
                    r *= area.fade;
                    g *= area.fade;
                    b *= area.fade;
                    a *= rng.gen_range(0.92..=0.98);
                }
            }

            a = (a * rng.gen_range(0.97..=1.03)).clamp(0.0, 255.0);

            px[0] = r.round() as u8;
            px[1] = g.round() as u8;
            px[2] = b.round() as u8;
            px[3] = a.round() as u8;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/aging.rs"]
mod tests;
