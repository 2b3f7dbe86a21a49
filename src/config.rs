use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{
    color::parse_hex_color,
    core::Rgba8,
    error::{SealError, SealResult},
};

/// Outer ring rendering style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// One continuous stroked circle.
    #[default]
    Solid,
    /// 36 arc strokes of 5° every 10°.
    Dashed,
}

/// Partial seal options. Every unset field falls back to the default of [`SealConfig`].
///
/// Deserializes from JSON objects with camelCase keys, e.g.
/// `{"company": "ABC", "starSize": 70, "borderStyle": "dashed"}`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SealOptions {
    /// Square canvas side in pixels.
    pub size: Option<f64>,
    /// Hex color for border, star fill and text.
    pub color: Option<String>,
    /// Characters laid out along the upper arc.
    pub company: Option<String>,
    /// Text rendered below the star.
    pub title: Option<String>,
    /// Font size of the star glyph.
    pub star_size: Option<f64>,
    /// Font size of each company character.
    pub company_font_size: Option<f64>,
    /// Font size of the title.
    pub title_font_size: Option<f64>,
    /// Global rotation in degrees.
    pub rotation: Option<f64>,
    /// Global alpha in `[0, 1]`.
    pub opacity: Option<f64>,
    /// Outer ring stroke width.
    pub border_width: Option<f64>,
    /// Outer ring style.
    pub border_style: Option<BorderStyle>,
    /// Fraction of the usable radius where company characters sit.
    pub company_radius_ratio: Option<f64>,
    /// Fraction of the usable radius where the title sits.
    pub title_radius_ratio: Option<f64>,
    /// Reserved angular gap below the star, in degrees. Currently not used by layout.
    pub star_bottom_angle: Option<f64>,
    /// Draw the secondary inner ring.
    pub show_inner_circle: Option<bool>,
    /// Run the aging post-process.
    pub aging: Option<bool>,
    /// Aging intensity in `[0, 1]`.
    pub aging_strength: Option<f64>,
    /// Seed for the aging random source. Unset means a fresh entropy seed per render.
    pub aging_seed: Option<u64>,
}

impl SealOptions {
    /// Parse options from a JSON object.
    pub fn from_json_str(s: &str) -> SealResult<Self> {
        serde_json::from_str(s).map_err(|e| SealError::validation(format!("seal options: {e}")))
    }

    /// Read and parse options from a JSON file.
    pub fn from_path(path: &Path) -> SealResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read seal options '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Overlay `other` on top of `self`: fields set in `other` win.
    pub fn merged_with(self, other: SealOptions) -> SealOptions {
        SealOptions {
            size: other.size.or(self.size),
            color: other.color.or(self.color),
            company: other.company.or(self.company),
            title: other.title.or(self.title),
            star_size: other.star_size.or(self.star_size),
            company_font_size: other.company_font_size.or(self.company_font_size),
            title_font_size: other.title_font_size.or(self.title_font_size),
            rotation: other.rotation.or(self.rotation),
            opacity: other.opacity.or(self.opacity),
            border_width: other.border_width.or(self.border_width),
            border_style: other.border_style.or(self.border_style),
            company_radius_ratio: other.company_radius_ratio.or(self.company_radius_ratio),
            title_radius_ratio: other.title_radius_ratio.or(self.title_radius_ratio),
            star_bottom_angle: other.star_bottom_angle.or(self.star_bottom_angle),
            show_inner_circle: other.show_inner_circle.or(self.show_inner_circle),
            aging: other.aging.or(self.aging),
            aging_strength: other.aging_strength.or(self.aging_strength),
            aging_seed: other.aging_seed.or(self.aging_seed),
        }
    }
}

/// Fully resolved seal configuration. Built once per generator, never re-derived mid-render.
#[derive(Clone, Debug, PartialEq)]
pub struct SealConfig {
    pub size: f64,
    pub color: Rgba8,
    pub company: String,
    pub title: String,
    pub star_size: f64,
    pub company_font_size: f64,
    pub title_font_size: f64,
    pub rotation: f64,
    pub opacity: f64,
    pub border_width: f64,
    pub border_style: BorderStyle,
    pub company_radius_ratio: f64,
    pub title_radius_ratio: f64,
    /// Validated but not consumed by any layout computation.
    pub star_bottom_angle: f64,
    pub show_inner_circle: bool,
    pub aging: bool,
    pub aging_strength: f64,
    pub aging_seed: Option<u64>,
}

pub const DEFAULT_SIZE: f64 = 400.0;
pub const DEFAULT_COLOR: Rgba8 = Rgba8::opaque(0xFF, 0x00, 0x00);
pub const DEFAULT_COMPANY: &str = "测试公司";
pub const DEFAULT_TITLE: &str = " ";

/// Distance between the canvas edge and the outer ring.
pub const BORDER_MARGIN: f64 = 20.0;
pub const MAX_SIZE: f64 = 4096.0;

impl Default for SealConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            color: DEFAULT_COLOR,
            company: DEFAULT_COMPANY.to_string(),
            title: DEFAULT_TITLE.to_string(),
            star_size: 60.0,
            company_font_size: 38.0,
            title_font_size: 22.0,
            rotation: 0.0,
            opacity: 1.0,
            border_width: 6.0,
            border_style: BorderStyle::Solid,
            company_radius_ratio: 0.72,
            title_radius_ratio: 0.55,
            star_bottom_angle: 30.0,
            show_inner_circle: true,
            aging: false,
            aging_strength: 0.5,
            aging_seed: None,
        }
    }
}

impl SealConfig {
    /// Apply defaults to every unset field and validate the result.
    pub fn resolve(opts: &SealOptions) -> SealResult<Self> {
        let d = Self::default();
        let color = match opts.color.as_deref() {
            Some(s) => parse_hex_color(s)?,
            None => d.color,
        };

        let cfg = Self {
            size: opts.size.unwrap_or(d.size),
            color,
            company: opts.company.clone().unwrap_or(d.company),
            title: opts.title.clone().unwrap_or(d.title),
            star_size: opts.star_size.unwrap_or(d.star_size),
            company_font_size: opts.company_font_size.unwrap_or(d.company_font_size),
            title_font_size: opts.title_font_size.unwrap_or(d.title_font_size),
            rotation: opts.rotation.unwrap_or(d.rotation),
            opacity: opts.opacity.unwrap_or(d.opacity),
            border_width: opts.border_width.unwrap_or(d.border_width),
            border_style: opts.border_style.unwrap_or(d.border_style),
            company_radius_ratio: opts.company_radius_ratio.unwrap_or(d.company_radius_ratio),
            title_radius_ratio: opts.title_radius_ratio.unwrap_or(d.title_radius_ratio),
            star_bottom_angle: opts.star_bottom_angle.unwrap_or(d.star_bottom_angle),
            show_inner_circle: opts.show_inner_circle.unwrap_or(d.show_inner_circle),
            aging: opts.aging.unwrap_or(d.aging),
            aging_strength: opts.aging_strength.unwrap_or(d.aging_strength),
            aging_seed: opts.aging_seed,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> SealResult<()> {
        if !self.size.is_finite() || self.size <= 2.0 * BORDER_MARGIN || self.size > MAX_SIZE {
            return Err(SealError::validation(format!(
                "size must be finite and in ({}, {MAX_SIZE}]",
                2.0 * BORDER_MARGIN
            )));
        }
        for (name, v) in [
            ("starSize", self.star_size),
            ("companyFontSize", self.company_font_size),
            ("titleFontSize", self.title_font_size),
            ("borderWidth", self.border_width),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(SealError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, v) in [
            ("companyRadiusRatio", self.company_radius_ratio),
            ("titleRadiusRatio", self.title_radius_ratio),
        ] {
            if !v.is_finite() || v <= 0.0 || v > 1.0 {
                return Err(SealError::validation(format!("{name} must be in (0, 1]")));
            }
        }
        for (name, v) in [
            ("opacity", self.opacity),
            ("agingStrength", self.aging_strength),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(SealError::validation(format!("{name} must be in [0, 1]")));
            }
        }
        if !self.rotation.is_finite() {
            return Err(SealError::validation("rotation must be finite"));
        }
        if !self.star_bottom_angle.is_finite() {
            return Err(SealError::validation("starBottomAngle must be finite"));
        }
        Ok(())
    }

    /// Canvas side in whole pixels.
    pub fn canvas_side(&self) -> u32 {
        self.size.round() as u32
    }

    /// Radius of the outer ring and center of the edge-erosion band.
    pub fn usable_radius(&self) -> f64 {
        self.size / 2.0 - BORDER_MARGIN
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
