use crate::foundation::core::{CHANNELS, PixelBuffer};
use crate::foundation::error::BlurResult;

/// Default sample width.
pub const SAMPLE_WIDTH: u32 = 480;
/// Default sample height.
pub const SAMPLE_HEIGHT: u32 = 640;

/// Deterministic test card: a diagonal color wash under vertical bars and a checkerboard band.
///
/// Hard edges at every height make the progressive ramp easy to see.
pub fn sample_image(width: u32, height: u32) -> BlurResult<PixelBuffer> {
    let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
    let (fw, fh) = (f64::from(width.max(1)), f64::from(height.max(1)));
    for y in 0..height {
        let fy = f64::from(y) / fh;
        for x in 0..width {
            let fx = f64::from(x) / fw;
            let mut rgb = [
                40.0 + 180.0 * fx,
                60.0 + 150.0 * fy,
                210.0 - 120.0 * fx * fy,
            ];
            if (x / 24) % 2 == 0 {
                rgb = rgb.map(|c| c * 0.55);
            }
            if (0.4..0.6).contains(&fy) && ((x / 16) + (y / 16)) % 2 == 0 {
                rgb = [245.0, 245.0, 240.0];
            }
            let [r, g, b] = rgb.map(|c| c.round().clamp(0.0, 255.0) as u8);
            data.extend_from_slice(&[r, g, b, 255]);
        }
    }
    PixelBuffer::new(width, height, data)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sample.rs"]
mod tests;
