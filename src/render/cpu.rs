use std::collections::HashMap;

use crate::{
    compile::{DrawOp, DrawStyle, SealPlan, Shadow},
    foundation::{
        core::{Affine, BezPath, Rgba8},
        error::{SealError, SealResult},
        math::unpremul_in_place,
    },
    render::{
        FrameRGBA,
        blur::blur_content_in_place,
        composite::{over_in_place, over_shifted_in_place},
    },
    text::{
        fonts::{FontFace, FontSet},
        shaping::{ShapedText, TextLayoutEngine},
    },
};

/// Executes a [`SealPlan`] on the CPU rasterizer.
///
/// Every op is rasterized into its own scratch layer through a fresh render context, then
/// composited onto the frame with the plan's global alpha. Drop shadows are rasterized the same
/// way in the shadow color, blurred and composited underneath first.
pub struct CpuRenderer<'a> {
    fonts: &'a FontSet,
    text: TextLayoutEngine,
    font_cache: HashMap<(usize, u32), vello_cpu::peniko::FontData>,
}

/// Geometry of one op, resolved once and rasterized for both the shadow and the body.
enum Prepared {
    Path {
        path: vello_cpu::kurbo::BezPath,
        transform: vello_cpu::kurbo::Affine,
    },
    Glyphs {
        font: vello_cpu::peniko::FontData,
        shaped: ShapedText,
        transform: vello_cpu::kurbo::Affine,
    },
}

struct Surface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl Surface {
    fn new(width: u32, height: u32) -> SealResult<Self> {
        let width: u16 = width
            .try_into()
            .map_err(|_| SealError::render("surface width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| SealError::render("surface height exceeds u16"))?;
        Ok(Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    /// Rasterize `draw` into the (cleared) layer. The render context exists only for the
    /// duration of this call, so no transform or paint state outlives it.
    fn paint<F>(&mut self, draw: F) -> SealResult<&[u8]>
    where
        F: FnOnce(&mut vello_cpu::RenderContext) -> SealResult<()>,
    {
        clear_pixmap(&mut self.pixmap);
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        draw(&mut ctx)?;
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        Ok(self.pixmap.data_as_u8_slice())
    }
}

impl<'a> CpuRenderer<'a> {
    pub fn new(fonts: &'a FontSet) -> Self {
        Self {
            fonts,
            text: TextLayoutEngine::new(),
            font_cache: HashMap::new(),
        }
    }

    #[tracing::instrument(skip_all, fields(ops = plan.ops.len(), size = plan.canvas.width))]
    pub fn render_plan(&mut self, plan: &SealPlan) -> SealResult<FrameRGBA> {
        let (width, height) = (plan.canvas.width, plan.canvas.height);
        let mut layer = Surface::new(width, height)?;
        let len = width as usize * height as usize * 4;
        // Premultiplied, fully transparent.
        let mut frame = vec![0u8; len];

        for op in &plan.ops {
            let Some(prepared) = self.prepare(op)? else {
                continue;
            };
            let style = op.style();

            if let Some(shadow) = style.shadow {
                composite_shadow(&mut frame, &mut layer, &prepared, style, shadow, plan)?;
            }

            // Fill and stroke are separate draws, each composited at the global alpha.
            for part in [Part::Fill, Part::Stroke] {
                if !part.present_in(style) {
                    continue;
                }
                let body = layer.paint(|ctx| {
                    draw_prepared(ctx, &prepared, style, part, None);
                    Ok(())
                })?;
                over_in_place(&mut frame, body, plan.opacity)?;
            }
        }

        unpremul_in_place(&mut frame);
        Ok(FrameRGBA {
            width,
            height,
            data: frame,
            premultiplied: false,
        })
    }

    fn prepare(&mut self, op: &DrawOp) -> SealResult<Option<Prepared>> {
        match op {
            DrawOp::Path {
                path, transform, ..
            } => Ok(Some(Prepared::Path {
                path: bezpath_to_cpu(path),
                transform: affine_to_cpu(*transform),
            })),
            DrawOp::Text {
                text,
                weight,
                size_px,
                transform,
                role,
                ..
            } => {
                let fonts = self.fonts;
                let Some(face) = fonts.face(*weight) else {
                    tracing::debug!(?role, "no font available; skipping text op");
                    return Ok(None);
                };
                let shaped = self.text.shape(text, face, *weight, *size_px)?;
                if shaped.glyphs.is_empty() {
                    return Ok(None);
                }
                let font = self.font_data_for(face);
                let local = *transform * Affine::translate(shaped.center_offset());
                Ok(Some(Prepared::Glyphs {
                    font,
                    shaped,
                    transform: affine_to_cpu(local),
                }))
            }
        }
    }

    fn font_data_for(&mut self, face: &FontFace) -> vello_cpu::peniko::FontData {
        let key = (std::sync::Arc::as_ptr(&face.data) as usize, face.index);
        self.font_cache
            .entry(key)
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(face.data.as_ref().clone()),
                    face.index,
                )
            })
            .clone()
    }
}

fn composite_shadow(
    frame: &mut [u8],
    layer: &mut Surface,
    prepared: &Prepared,
    style: &DrawStyle,
    shadow: Shadow,
    plan: &SealPlan,
) -> SealResult<()> {
    let (width, height) = (plan.canvas.width, plan.canvas.height);
    let silhouette = Rgba8 {
        a: 255,
        ..shadow.color
    };
    layer.paint(|ctx| {
        draw_prepared(ctx, prepared, style, Part::Both, Some(silhouette));
        Ok(())
    })?;

    let data = layer.pixmap.data_as_u8_slice_mut();
    blur_content_in_place(data, width, height, (shadow.blur / 2.0) as f32)?;

    let alpha = f32::from(shadow.color.a) / 255.0;
    over_shifted_in_place(
        frame,
        data,
        width,
        height,
        shadow.offset.x.round() as i32,
        shadow.offset.y.round() as i32,
        alpha * plan.opacity,
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Part {
    Fill,
    Stroke,
    Both,
}

impl Part {
    fn present_in(self, style: &DrawStyle) -> bool {
        match self {
            Part::Fill => style.fill.is_some(),
            Part::Stroke => style.stroke.is_some(),
            Part::Both => style.fill.is_some() || style.stroke.is_some(),
        }
    }

    fn fill(self) -> bool {
        self != Part::Stroke
    }

    fn stroke(self) -> bool {
        self != Part::Fill
    }
}

/// Fill then stroke, per `style`, limited to `part`. With `paint_override` every part uses that
/// color instead.
fn draw_prepared(
    ctx: &mut vello_cpu::RenderContext,
    prepared: &Prepared,
    style: &DrawStyle,
    part: Part,
    paint_override: Option<Rgba8>,
) {
    let fill = style.fill.filter(|_| part.fill());
    let stroke = style.stroke.filter(|_| part.stroke());
    let paint = |c: Rgba8| {
        let c = paint_override.unwrap_or(c);
        vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
    };

    match prepared {
        Prepared::Path { path, transform } => {
            ctx.set_transform(*transform);
            if let Some(fill) = fill {
                ctx.set_paint(paint(fill));
                ctx.fill_path(path);
            }
            if let Some(stroke) = stroke {
                ctx.set_paint(paint(stroke.color));
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(stroke.width));
                ctx.stroke_path(path);
            }
        }
        Prepared::Glyphs {
            font,
            shaped,
            transform,
        } => {
            ctx.set_transform(*transform);
            let glyphs = || {
                shaped.glyphs.iter().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                })
            };
            if let Some(fill) = fill {
                ctx.set_paint(paint(fill));
                ctx.glyph_run(font)
                    .font_size(shaped.font_size)
                    .fill_glyphs(glyphs());
            }
            if let Some(stroke) = stroke {
                ctx.set_paint(paint(stroke.color));
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(stroke.width));
                ctx.glyph_run(font)
                    .font_size(shaped.font_size)
                    .stroke_glyphs(glyphs());
            }
        }
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
