use std::fmt;
use std::str::FromStr;

use crate::foundation::error::BlurError;

/// Intensity curve applied to ramp progress before it is turned into a kernel size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    /// `t`
    #[default]
    Linear,
    /// `t^2 (2t - 1)`; negative on the first half, which clamps to zero.
    EaseIn,
    /// `t (2 - t)`
    EaseOut,
    /// `2t^2` below one half, `-1 + (4 - 2t) t` above.
    EaseInOut,
}

impl Ease {
    /// Every easing, in the order hosts should present them.
    pub const ALL: [Ease; 4] = [Ease::Linear, Ease::EaseIn, Ease::EaseOut, Ease::EaseInOut];

    /// Map progress `t` in `[0, 1]` onto `[0, 1]`.
    ///
    /// Input outside the unit interval is clamped first, and so is the output.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let v = match self {
            Self::Linear => t,
            Self::EaseIn => t * t * (2.0 * t - 1.0),
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        };
        v.clamp(0.0, 1.0)
    }

    /// Stable identifier, as used in config JSON and on the command line.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "easeIn",
            Self::EaseOut => "easeOut",
            Self::EaseInOut => "easeInOut",
        }
    }
}

/// Identifiers of every supported easing, for populating a selector.
///
/// Always `["linear", "easeIn", "easeOut", "easeInOut"]`.
pub fn list_easings() -> &'static [&'static str] {
    const IDS: [&str; 4] = [
        Ease::ALL[0].id(),
        Ease::ALL[1].id(),
        Ease::ALL[2].id(),
        Ease::ALL[3].id(),
    ];
    &IDS
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Ease {
    type Err = BlurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.id() == s)
            .ok_or_else(|| {
                BlurError::invalid_config(format!(
                    "unknown easing '{s}' (expected one of: {})",
                    list_easings().join(", ")
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
