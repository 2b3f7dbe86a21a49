use kurbo::Shape as _;

use crate::{
    config::{BorderStyle, SealConfig},
    foundation::{
        core::{Affine, BezPath, Canvas, Point, Rgba8, Vec2, deg_to_rad},
        error::SealResult,
    },
    layout::geometry::{SealLayout, dashed_ring_segments, inner_ring_width, layout_seal},
};

/// Flattening tolerance for circles and arcs, in pixels.
const PATH_TOLERANCE: f64 = 0.05;

pub const STAR_GLYPH: &str = "★";
pub const STAR_OUTLINE_COLOR: Rgba8 = Rgba8::opaque(0xA0, 0x00, 0x00);
pub const STAR_OUTLINE_WIDTH: f64 = 2.0;
pub const COMPANY_STROKE_WIDTH: f64 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba8,
    pub width: f64,
}

/// Drop shadow drawn beneath an op. The shadow alpha lives in `color.a`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Rgba8,
    /// Canvas-style blur amount; the gaussian sigma is half of it.
    pub blur: f64,
    pub offset: Vec2,
}

impl Shadow {
    pub fn black(opacity: f64, blur: f64, offset: Vec2) -> Self {
        Self {
            color: Rgba8 {
                a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
                ..Rgba8::BLACK
            },
            blur,
            offset,
        }
    }
}

/// Immutable per-op paint state. Nothing leaks from one op to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DrawStyle {
    pub fill: Option<Rgba8>,
    pub stroke: Option<StrokeStyle>,
    pub shadow: Option<Shadow>,
}

/// What part of the seal an op draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpRole {
    Border,
    InnerRing,
    Star,
    CompanyGlyph,
    Title,
}

#[derive(Clone, Debug)]
pub enum DrawOp {
    Path {
        path: BezPath,
        transform: Affine,
        style: DrawStyle,
        role: OpRole,
    },
    /// Text centered (horizontally and vertically) on the origin of `transform`.
    Text {
        text: String,
        weight: FontWeight,
        size_px: f32,
        transform: Affine,
        style: DrawStyle,
        role: OpRole,
    },
}

impl DrawOp {
    pub fn role(&self) -> OpRole {
        match self {
            DrawOp::Path { role, .. } | DrawOp::Text { role, .. } => *role,
        }
    }

    pub fn style(&self) -> &DrawStyle {
        match self {
            DrawOp::Path { style, .. } | DrawOp::Text { style, .. } => style,
        }
    }

    pub fn transform(&self) -> Affine {
        match self {
            DrawOp::Path { transform, .. } | DrawOp::Text { transform, .. } => *transform,
        }
    }
}

/// Backend-agnostic description of one seal render, in draw order.
#[derive(Clone, Debug)]
pub struct SealPlan {
    pub canvas: Canvas,
    /// Global alpha applied to every op.
    pub opacity: f32,
    /// Center translation followed by the configured rotation.
    pub global: Affine,
    pub layout: SealLayout,
    pub ops: Vec<DrawOp>,
}

impl SealPlan {
    pub fn ops_with_role(&self, role: OpRole) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(move |op| op.role() == role)
    }
}

pub fn global_transform(cfg: &SealConfig) -> Affine {
    Affine::translate(Vec2::new(cfg.size / 2.0, cfg.size / 2.0))
        * Affine::rotate(deg_to_rad(cfg.rotation))
}

fn border_shadow() -> Shadow {
    Shadow::black(0.08, 2.0, Vec2::ZERO)
}

fn star_shadow() -> Shadow {
    Shadow::black(0.12, 2.0, Vec2::ZERO)
}

fn text_shadow() -> Shadow {
    Shadow::black(0.10, 1.0, Vec2::new(1.0, 1.0))
}

pub fn compile_seal(cfg: &SealConfig) -> SealResult<SealPlan> {
    cfg.validate()?;

    let layout = layout_seal(cfg);
    let global = global_transform(cfg);
    let mut ops = Vec::new();

    push_border(&mut ops, cfg, &layout, global);

    if let Some(r) = layout.inner_radius {
        ops.push(DrawOp::Path {
            path: kurbo::Circle::new(Point::ORIGIN, r).to_path(PATH_TOLERANCE),
            transform: global,
            style: DrawStyle {
                stroke: Some(StrokeStyle {
                    color: cfg.color,
                    width: inner_ring_width(cfg.border_width),
                }),
                ..DrawStyle::default()
            },
            role: OpRole::InnerRing,
        });
    }

    ops.push(DrawOp::Text {
        text: STAR_GLYPH.to_string(),
        weight: FontWeight::Bold,
        size_px: cfg.star_size as f32,
        transform: global * Affine::translate(layout.star.to_vec2()),
        style: DrawStyle {
            fill: Some(cfg.color),
            stroke: Some(StrokeStyle {
                color: STAR_OUTLINE_COLOR,
                width: STAR_OUTLINE_WIDTH,
            }),
            shadow: Some(star_shadow()),
        },
        role: OpRole::Star,
    });

    for (ch, slot) in cfg.company.chars().zip(&layout.company) {
        ops.push(DrawOp::Text {
            text: ch.to_string(),
            weight: FontWeight::Bold,
            size_px: cfg.company_font_size as f32,
            transform: global
                * Affine::translate(slot.position.to_vec2())
                * Affine::rotate(deg_to_rad(slot.rotation_deg)),
            style: DrawStyle {
                fill: Some(cfg.color),
                stroke: Some(StrokeStyle {
                    color: cfg.color,
                    width: COMPANY_STROKE_WIDTH,
                }),
                shadow: Some(text_shadow()),
            },
            role: OpRole::CompanyGlyph,
        });
    }

    ops.push(DrawOp::Text {
        text: cfg.title.clone(),
        weight: FontWeight::Regular,
        size_px: cfg.title_font_size as f32,
        transform: global * Affine::translate(layout.title.to_vec2()),
        style: DrawStyle {
            fill: Some(cfg.color),
            stroke: None,
            shadow: Some(text_shadow()),
        },
        role: OpRole::Title,
    });

    tracing::debug!(ops = ops.len(), "compiled seal plan");

    Ok(SealPlan {
        canvas: Canvas::square(cfg.canvas_side()),
        opacity: cfg.opacity as f32,
        global,
        layout,
        ops,
    })
}

fn push_border(ops: &mut Vec<DrawOp>, cfg: &SealConfig, layout: &SealLayout, global: Affine) {
    let style = DrawStyle {
        fill: None,
        stroke: Some(StrokeStyle {
            color: cfg.color,
            width: cfg.border_width,
        }),
        shadow: Some(border_shadow()),
    };
    let r = layout.outer_radius;

    match cfg.border_style {
        BorderStyle::Solid => ops.push(DrawOp::Path {
            path: kurbo::Circle::new(Point::ORIGIN, r).to_path(PATH_TOLERANCE),
            transform: global,
            style,
            role: OpRole::Border,
        }),
        BorderStyle::Dashed => {
            for seg in dashed_ring_segments() {
                let arc = kurbo::Arc::new(
                    Point::ORIGIN,
                    Vec2::new(r, r),
                    deg_to_rad(seg.start_deg),
                    deg_to_rad(seg.sweep_deg),
                    0.0,
                );
                ops.push(DrawOp::Path {
                    path: arc.to_path(PATH_TOLERANCE),
                    transform: global,
                    style,
                    role: OpRole::Border,
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
