pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod cpu;

use crate::{
    compile::compile_seal, config::SealConfig, foundation::error::SealResult, text::fonts::FontSet,
};

/// A rendered RGBA8 raster, row-major and tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA of the pixel at (`x`, `y`), if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) as usize) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Draw the seal described by `cfg`. Deterministic: no aging, no randomness.
pub fn render_seal(cfg: &SealConfig, fonts: &FontSet) -> SealResult<FrameRGBA> {
    let plan = compile_seal(cfg)?;
    cpu::CpuRenderer::new(fonts).render_plan(&plan)
}
