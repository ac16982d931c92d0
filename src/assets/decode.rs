use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{BlurError, BlurResult};

/// Decode encoded image bytes (PNG, JPEG, ...) into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> BlurResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| BlurError::invalid_image(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::new(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn load_image(path: impl AsRef<Path>) -> BlurResult<PixelBuffer> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

/// Encode as PNG in memory.
pub fn encode_png(img: &PixelBuffer) -> BlurResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        img.data(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .context("encode png")?;
    Ok(out.into_inner())
}

/// Write a PNG file, creating parent directories as needed.
pub fn save_png(path: impl AsRef<Path>, img: &PixelBuffer) -> BlurResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        img.data(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
