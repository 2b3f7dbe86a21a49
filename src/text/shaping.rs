use std::collections::HashMap;

use crate::{
    compile::FontWeight,
    foundation::error::{SealError, SealResult},
    text::fonts::FontFace,
};

/// One glyph origin in layout space: `x` along the line, `y` on the baseline, measured from the
/// top-left of the line box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedGlyph {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// A shaped single-line string ready for rasterization.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedText {
    pub glyphs: Vec<PositionedGlyph>,
    pub font_size: f32,
    pub width: f32,
    pub height: f32,
}

impl ShapedText {
    /// Offset that moves the line box center onto the local origin (center / middle alignment).
    pub fn center_offset(&self) -> kurbo::Vec2 {
        kurbo::Vec2::new(
            -f64::from(self.width) / 2.0,
            -f64::from(self.height) / 2.0,
        )
    }
}

/// Stateful helper for shaping strings with Parley from raw font bytes.
///
/// Each face is registered once per engine; one engine is owned by one render.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    families: HashMap<(usize, u32), String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, face: &FontFace) -> SealResult<String> {
        let key = (std::sync::Arc::as_ptr(&face.data) as usize, face.index);
        if let Some(name) = self.families.get(&key) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.data.as_ref().clone()),
            None,
        );
        // A collection registers one family per face; shape with the family that owns ours.
        let family_id = families
            .iter()
            .find(|(_, infos)| infos.iter().any(|info| info.index() == face.index))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| SealError::font("no font families registered from font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SealError::font("registered font family has no name"))?
            .to_string();

        self.families.insert(key, family_name.clone());
        Ok(family_name)
    }

    /// Shape `text` as one unwrapped line.
    pub fn shape(
        &mut self,
        text: &str,
        face: &FontFace,
        weight: FontWeight,
        size_px: f32,
    ) -> SealResult<ShapedText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SealError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_for(face)?;
        let font_weight = match weight {
            FontWeight::Regular => parley::style::FontWeight::NORMAL,
            FontWeight::Bold => parley::style::FontWeight::BOLD,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(font_weight));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| PositionedGlyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                }));
            }
        }

        Ok(ShapedText {
            glyphs,
            font_size: size_px,
            width: layout.width(),
            height: layout.height(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaping.rs"]
mod tests;
