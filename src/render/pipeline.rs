use crate::config::model::BlurConfig;
use crate::foundation::core::PixelBuffer;
use crate::foundation::error::BlurResult;
use crate::kernel::rows::RowKernels;
use crate::render::backend::{AlphaMode, BlurBackend};
use crate::render::cpu::CpuBackend;

/// Apply a progressive blur on rayon's global pool.
///
/// Returns `src` itself (shared storage, no copy) when the config is disabled or its blur type
/// is `none`; that check comes before validation. Otherwise the config is validated, row kernels
/// are resolved and both passes run.
pub fn blur(src: &PixelBuffer, config: &BlurConfig) -> BlurResult<PixelBuffer> {
    blur_with_backend(src, config, &mut CpuBackend::global())
}

/// [`blur`] with an explicit execution backend.
#[tracing::instrument(skip(src, backend), fields(width = src.width(), height = src.height()))]
pub fn blur_with_backend(
    src: &PixelBuffer,
    config: &BlurConfig,
    backend: &mut dyn BlurBackend,
) -> BlurResult<PixelBuffer> {
    if !config.is_active() {
        return Ok(src.clone());
    }
    config.validate()?;

    let kernels = RowKernels::resolve(src.height(), config);
    backend.convolve(
        src,
        &kernels,
        AlphaMode::from_premultiply(config.premultiply_alpha),
    )
}

/// [`blur`] over raw RGBA8 bytes.
///
/// Fails with [`crate::BlurError::InvalidImage`] when `data` does not hold exactly
/// `width * height` pixels or the pixel count is zero.
pub fn blur_rgba8(
    data: &[u8],
    width: u32,
    height: u32,
    config: &BlurConfig,
) -> BlurResult<Vec<u8>> {
    let src = PixelBuffer::new(width, height, data.to_vec())?;
    let out = blur(&src, config)?;
    drop(src);
    Ok(out.into_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
