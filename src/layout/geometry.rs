use crate::{
    config::SealConfig,
    foundation::core::{Point, deg_to_rad},
};

/// Total sweep of the company-name arc in degrees.
pub const COMPANY_ARC_DEG: f64 = 240.0;
/// Angle of the arc midpoint (top of the circle, y grows downward).
pub const COMPANY_ARC_MID_DEG: f64 = -90.0;
/// First glyph angle: midpoint minus half the sweep.
pub const COMPANY_ARC_START_DEG: f64 = COMPANY_ARC_MID_DEG - COMPANY_ARC_DEG / 2.0;

pub const INNER_RING_INSET: f64 = 12.0;

pub const DASH_SEGMENTS: usize = 36;
pub const DASH_STEP_DEG: f64 = 10.0;
pub const DASH_SWEEP_DEG: f64 = 5.0;

/// One glyph slot on the company-name arc, in the seal's local (centered, rotated) frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPlacement {
    /// Glyph center.
    pub position: Point,
    /// Polar angle of the slot.
    pub angle_deg: f64,
    /// Rotation applied to the glyph so its baseline follows the arc tangent.
    pub rotation_deg: f64,
}

/// One dash of a dashed ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSegment {
    pub start_deg: f64,
    pub sweep_deg: f64,
}

/// Angular step between adjacent company glyphs. `None` when there is no step to speak of
/// (zero or one glyph).
pub fn company_angle_step_deg(count: usize) -> Option<f64> {
    if count < 2 {
        return None;
    }
    Some(COMPANY_ARC_DEG / (count - 1) as f64)
}

/// Slot angles for `count` glyphs spread over the 240° top arc.
///
/// A single glyph sits at the arc midpoint; zero glyphs yield no slots.
pub fn company_angles_deg(count: usize) -> Vec<f64> {
    match company_angle_step_deg(count) {
        None if count == 1 => vec![COMPANY_ARC_MID_DEG],
        None => Vec::new(),
        Some(step) => (0..count)
            .map(|i| COMPANY_ARC_START_DEG + step * i as f64)
            .collect(),
    }
}

/// Polar placement of `count` glyphs at `radius * ratio`.
pub fn company_placements(count: usize, radius: f64, ratio: f64) -> Vec<GlyphPlacement> {
    let r = radius * ratio;
    company_angles_deg(count)
        .into_iter()
        .map(|angle_deg| {
            let theta = deg_to_rad(angle_deg);
            GlyphPlacement {
                position: Point::new(r * theta.cos(), r * theta.sin()),
                angle_deg,
                rotation_deg: angle_deg + 90.0,
            }
        })
        .collect()
}

pub fn title_anchor(radius: f64, ratio: f64) -> Point {
    Point::new(0.0, radius * ratio)
}

pub fn inner_ring_radius(outer: f64) -> f64 {
    outer - INNER_RING_INSET
}

pub fn inner_ring_width(border_width: f64) -> f64 {
    (border_width / 2.0).max(2.0)
}

pub fn dashed_ring_segments() -> Vec<ArcSegment> {
    (0..DASH_SEGMENTS)
        .map(|i| ArcSegment {
            start_deg: DASH_STEP_DEG * i as f64,
            sweep_deg: DASH_SWEEP_DEG,
        })
        .collect()
}

/// Resolved geometry for one seal, all in the local frame except `center`.
#[derive(Clone, Debug, PartialEq)]
pub struct SealLayout {
    /// Canvas midpoint in pixel coordinates.
    pub center: Point,
    pub outer_radius: f64,
    pub inner_radius: Option<f64>,
    pub star: Point,
    pub company: Vec<GlyphPlacement>,
    pub title: Point,
}

pub fn layout_seal(cfg: &SealConfig) -> SealLayout {
    let outer_radius = cfg.usable_radius();
    let count = cfg.company.chars().count();
    SealLayout {
        center: Point::new(cfg.size / 2.0, cfg.size / 2.0),
        outer_radius,
        // Small canvases leave no room inside the inset.
        inner_radius: cfg
            .show_inner_circle
            .then(|| inner_ring_radius(outer_radius))
            .filter(|&r| r > 0.0),
        star: Point::ORIGIN,
        company: company_placements(count, outer_radius, cfg.company_radius_ratio),
        title: title_anchor(outer_radius, cfg.title_radius_ratio),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
