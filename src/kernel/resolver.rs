use crate::config::model::{BlurConfig, BlurType};

/// Hard ceiling on kernel radius. Configs implying more fail validation.
pub const MAX_RADIUS: u32 = 1000;

/// A symmetric 1-D kernel for one scanline.
///
/// `weights` has `2 * radius + 1` taps, ordered from offset `-radius` to `+radius`, and sums
/// to 1. Radius 0 is the identity.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanlineKernel {
    radius: u32,
    weights: Vec<f32>,
}

impl ScanlineKernel {
    /// The passthrough kernel: radius 0, weight `[1.0]`.
    pub fn identity() -> Self {
        Self {
            radius: 0,
            weights: vec![1.0],
        }
    }

    /// Build the kernel of width `size` (rounded up to odd) for `shape`.
    ///
    /// `size == 0` and [`BlurType::None`] give the identity.
    pub fn build(size: u32, shape: BlurType) -> Self {
        if size < 1 {
            return Self::identity();
        }
        let size = force_odd(size);
        let radius = radius_for_size(size);
        let taps = 2 * radius as usize + 1;

        let weights = match shape {
            BlurType::None => return Self::identity(),
            BlurType::Linear => vec![(1.0 / f64::from(size)) as f32; taps],
            BlurType::Gaussian => {
                let sigma = f64::from(size) / 6.0;
                let r = radius as i64;
                let raw: Vec<f64> = (-r..=r)
                    .map(|i| {
                        let x = i as f64 / sigma;
                        (-0.5 * x * x).exp()
                    })
                    .collect();
                // Normalize by the sampled sum, not the closed-form integral; the tail beyond
                // `radius` is cut off.
                let sum: f64 = raw.iter().sum();
                raw.into_iter().map(|w| (w / sum) as f32).collect()
            }
        };

        Self { radius, weights }
    }

    /// Half-width excluding the centre tap.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Tap weights from `-radius` to `+radius`.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Number of taps, always odd.
    pub fn width(&self) -> usize {
        self.weights.len()
    }

    /// Weight at signed offset `i`, or `None` outside the window.
    pub fn weight_at(&self, i: i64) -> Option<f32> {
        let idx = i + i64::from(self.radius);
        usize::try_from(idx)
            .ok()
            .and_then(|idx| self.weights.get(idx).copied())
    }

    /// Whether applying this kernel leaves a scanline unchanged.
    pub fn is_identity(&self) -> bool {
        self.radius == 0
    }
}

/// Normalized vertical coordinate of `row`, sampled at the pixel centre.
pub fn row_position(row: u32, height: u32) -> f64 {
    (f64::from(row) + 0.5) / f64::from(height.max(1))
}

/// Odd-forced kernel width at normalized height `y`.
///
/// Zero above the band (and for inactive configs), `max_kernel_size` below it, the eased
/// fraction of it inside. A collapsed band (`start == end`) is a hard step: rows at or below the
/// point get the full width.
pub fn kernel_size_at(y: f64, config: &BlurConfig) -> u32 {
    if !config.is_active() || y < config.start_point {
        return 0;
    }
    let max = config.max_kernel_size;
    let size = if y > config.end_point {
        max
    } else {
        let span = config.end_point - config.start_point;
        let t = if span > 0.0 {
            (y - config.start_point) / span
        } else {
            1.0
        };
        (config.easing.apply(t) * f64::from(max)).floor() as u32
    };
    force_odd(size)
}

/// Resolve the full kernel for normalized height `y`.
pub fn resolve_kernel(y: f64, config: &BlurConfig) -> ScanlineKernel {
    ScanlineKernel::build(kernel_size_at(y, config), config.blur_type)
}

/// Round an even width up to the next odd one.
pub const fn force_odd(size: u32) -> u32 {
    if size % 2 == 0 { size + 1 } else { size }
}

/// Radius of an odd kernel width.
pub const fn radius_for_size(size: u32) -> u32 {
    size.saturating_sub(1) / 2
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/resolver.rs"]
mod tests;
