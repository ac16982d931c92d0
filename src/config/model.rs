use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use crate::animation::ease::Ease;
use crate::foundation::error::{BlurError, BlurResult};
use crate::kernel::resolver::{MAX_RADIUS, force_odd, radius_for_size};

/// Smallest accepted `maxKernelSize`.
pub const MIN_KERNEL_SIZE: u32 = 1;
/// Largest accepted `maxKernelSize`.
pub const MAX_KERNEL_SIZE: u32 = 499;

/// Shape of the 1-D averaging window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlurType {
    /// No blur; equivalent to `enabled = false`.
    None,
    /// Box average, every tap weighted `1 / size`.
    Linear,
    /// Gaussian taper with `sigma = size / 6`.
    #[default]
    Gaussian,
}

impl BlurType {
    /// Every blur type.
    pub const ALL: [BlurType; 3] = [BlurType::None, BlurType::Linear, BlurType::Gaussian];

    /// Stable identifier, as used in config JSON and on the command line.
    pub const fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Linear => "linear",
            Self::Gaussian => "gaussian",
        }
    }
}

impl fmt::Display for BlurType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for BlurType {
    type Err = BlurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|t| t.id() == s).ok_or_else(|| {
            BlurError::invalid_config(format!(
                "unknown blur type '{s}' (expected none, linear or gaussian)"
            ))
        })
    }
}

/// Caller-owned description of one progressive blur.
///
/// Kernel size ramps from zero at `start_point` to `max_kernel_size` at `end_point`, both given as
/// fractions of the image height measured from the top.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlurConfig {
    /// When `false` the input is returned untouched.
    pub enabled: bool,
    /// Kernel shape.
    pub blur_type: BlurType,
    /// Top of the ramp, in `[0, 1]`.
    pub start_point: f64,
    /// Bottom of the ramp, in `[start_point, 1]`.
    pub end_point: f64,
    /// Kernel width reached at `end_point`, in `[1, 499]`. Even values are rounded up.
    pub max_kernel_size: u32,
    /// Ramp curve between the two points.
    pub easing: Ease,
    /// Blur color in premultiplied space and unpremultiply afterwards.
    ///
    /// Off by default, which blurs alpha and color independently.
    pub premultiply_alpha: bool,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            blur_type: BlurType::Gaussian,
            start_point: 0.5,
            end_point: 1.0,
            max_kernel_size: 51,
            easing: Ease::Linear,
            premultiply_alpha: false,
        }
    }
}

impl BlurConfig {
    /// Parse a config from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> BlurResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BlurError::invalid_config(format!("parse blur config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BlurResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BlurError::invalid_config(format!("open blur config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Whether running this config would change any pixel.
    pub fn is_active(&self) -> bool {
        self.enabled && self.blur_type != BlurType::None
    }

    /// Check every field range. Nothing is clamped here; bad values are reported.
    pub fn validate(&self) -> BlurResult<()> {
        for (name, v) in [
            ("startPoint", self.start_point),
            ("endPoint", self.end_point),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(BlurError::invalid_config(format!(
                    "{name} must be within [0, 1] (got {v})"
                )));
            }
        }
        if self.start_point > self.end_point {
            return Err(BlurError::invalid_config(format!(
                "startPoint ({}) must be <= endPoint ({})",
                self.start_point, self.end_point
            )));
        }
        if !(MIN_KERNEL_SIZE..=MAX_KERNEL_SIZE).contains(&self.max_kernel_size) {
            return Err(BlurError::invalid_config(format!(
                "maxKernelSize must be within [{MIN_KERNEL_SIZE}, {MAX_KERNEL_SIZE}] (got {})",
                self.max_kernel_size
            )));
        }
        let radius = radius_for_size(force_odd(self.max_kernel_size));
        if radius > MAX_RADIUS {
            return Err(BlurError::invalid_config(format!(
                "maxKernelSize {} implies radius {radius}, above the ceiling of {MAX_RADIUS}",
                self.max_kernel_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
