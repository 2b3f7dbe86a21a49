use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    foundation::{
        error::{SealError, SealResult},
        math::unpremul_rgba8,
    },
    render::FrameRGBA,
};

/// Encode `frame` as an RGBA8 PNG. Premultiplied frames are converted to straight alpha first.
pub fn encode_png(frame: &FrameRGBA) -> SealResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(SealError::encode(format!(
            "frame data length {} does not match {}x{} RGBA",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let data = if frame.premultiplied {
        frame
            .data
            .chunks_exact(4)
            .flat_map(|p| unpremul_rgba8([p[0], p[1], p[2], p[3]]))
            .collect()
    } else {
        frame.data.clone()
    };

    let img = image::RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| SealError::encode("pixel buffer too small for image"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| SealError::encode(format!("png: {e}")))?;
    Ok(buf)
}

/// Write encoded bytes to `path`, creating parent directories as needed.
pub fn write_png(path: &Path, bytes: &[u8]) -> SealResult<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote png");
    Ok(path.to_path_buf())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
