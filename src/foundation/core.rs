use std::sync::Arc;

use crate::foundation::error::{BlurError, BlurResult};

/// Bytes per RGBA8 pixel.
pub const CHANNELS: usize = 4;

/// An immutable RGBA8 image, tightly packed, row-major, origin top-left.
///
/// Storage is shared: cloning a `PixelBuffer` never copies pixels, which is what makes the
/// disabled-blur passthrough free.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Arc<Vec<u8>>,
}

impl PixelBuffer {
    /// Wrap raw RGBA8 bytes.
    ///
    /// Fails when the pixel count is zero or `data.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> BlurResult<Self> {
        let expected = expected_len(width, height)?;
        if data.len() != expected {
            return Err(BlurError::invalid_image(format!(
                "expected {expected} bytes for {width}x{height} RGBA8, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data: Arc::new(data),
        })
    }

    /// Build an image where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> BlurResult<Self> {
        let n = expected_len(width, height)? / CHANNELS;
        Self::new(width, height, rgba.repeat(n))
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes of row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// The pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Row length in bytes.
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Whether both buffers point at the same pixel storage.
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Take the bytes out, copying only if the storage is shared.
    pub fn into_vec(self) -> Vec<u8> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| shared.as_ref().clone())
    }
}

pub(crate) fn expected_len(width: u32, height: u32) -> BlurResult<usize> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or_else(|| BlurError::invalid_image("pixel buffer size overflow"))?;
    if len == 0 {
        return Err(BlurError::invalid_image(format!(
            "pixel count must be > 0 (got {width}x{height})"
        )));
    }
    Ok(len)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
