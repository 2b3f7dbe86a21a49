//! Sealgen renders circular company seals ("official stamps") to transparent PNG images.
//!
//! A seal is a bordered disc with a star at its center, the company name laid out character by
//! character along a 240° upper arc, a title below the star and an optional worn-ink effect.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `SealOptions -> SealConfig` (defaults applied, validated once)
//! 2. **Compile**: `SealConfig -> SealPlan` (layout plus an ordered list of draw ops)
//! 3. **Render**: `SealPlan -> FrameRGBA` (CPU rasterizer, straight RGBA8)
//! 4. **Age** (optional): randomized ink wear over the finished buffer
//! 5. **Encode**: PNG bytes, written to disk by [`SealGenerator::generate`]
//!
//! Without aging the output is a pure function of the configuration and the fonts.
#![forbid(unsafe_code)]

mod batch;
mod compile;
mod config;
mod effects;
mod encode;
mod foundation;
mod generator;
mod layout;
mod render;
mod text;

pub use batch::{
    BatchJob, BatchOptions, DEFAULT_STEM, output_path_for, parse_names, plan_jobs, run_batch,
    sanitize_file_stem,
};
pub use compile::{
    DrawOp, DrawStyle, FontWeight, OpRole, SealPlan, Shadow, StrokeStyle, compile_seal,
    global_transform,
};
pub use config::{BorderStyle, SealConfig, SealOptions};
pub use effects::aging::{AgingFilter, FadeArea};
pub use encode::png::{encode_png, write_png};
pub use foundation::color::{format_hex_color, parse_hex_color};
pub use foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{SealError, SealResult};
pub use generator::{SealGenerator, default_generator};
pub use layout::geometry::{ArcSegment, GlyphPlacement, SealLayout, layout_seal};
pub use render::cpu::CpuRenderer;
pub use render::{FrameRGBA, render_seal};
pub use text::fonts::{FontFace, FontPaths, FontSet, FontSource};
