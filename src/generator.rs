use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    config::{SealConfig, SealOptions},
    effects::aging::AgingFilter,
    encode::png::{encode_png, write_png},
    foundation::error::SealResult,
    render::{FrameRGBA, render_seal},
    text::fonts::FontSet,
};

/// Public entry point: one resolved configuration plus the fonts it draws with.
///
/// The configuration is resolved and validated once at construction. Every call to
/// [`SealGenerator::render`] draws from scratch; nothing is cached between renders.
#[derive(Clone, Debug)]
pub struct SealGenerator {
    config: SealConfig,
    fonts: Arc<FontSet>,
}

impl SealGenerator {
    /// Resolve `opts` and discover system fonts.
    pub fn new(opts: &SealOptions) -> SealResult<Self> {
        Self::with_fonts(opts, Arc::new(FontSet::system()))
    }

    pub fn with_fonts(opts: &SealOptions, fonts: Arc<FontSet>) -> SealResult<Self> {
        Ok(Self {
            config: SealConfig::resolve(opts)?,
            fonts,
        })
    }

    pub fn from_config(config: SealConfig, fonts: Arc<FontSet>) -> SealResult<Self> {
        config.validate()?;
        Ok(Self { config, fonts })
    }

    pub fn config(&self) -> &SealConfig {
        &self.config
    }

    pub fn fonts(&self) -> &Arc<FontSet> {
        &self.fonts
    }

    /// Straight-alpha RGBA raster of the seal, aged when the configuration asks for it.
    #[tracing::instrument(skip(self), fields(company = %self.config.company, aging = self.config.aging))]
    pub fn render(&self) -> SealResult<FrameRGBA> {
        let mut frame = render_seal(&self.config, &self.fonts)?;
        if self.config.aging {
            AgingFilter::from_config(&self.config)?.apply(&mut frame, self.config.aging_seed)?;
        }
        Ok(frame)
    }

    pub fn render_png(&self) -> SealResult<Vec<u8>> {
        encode_png(&self.render()?)
    }

    /// Render, encode and write to `output_path`. Returns the written path.
    #[tracing::instrument(skip(self), fields(company = %self.config.company))]
    pub fn generate(&self, output_path: &Path) -> SealResult<PathBuf> {
        let bytes = self.render_png()?;
        write_png(output_path, &bytes)
    }
}

/// Generator for the all-default seal with system fonts.
pub fn default_generator() -> SealResult<SealGenerator> {
    SealGenerator::new(&SealOptions::default())
}

#[cfg(test)]
#[path = "../tests/unit/generator.rs"]
mod tests;
