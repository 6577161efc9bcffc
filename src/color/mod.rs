//! Log-opponent colour space and the texture measure fed to skin filters.
//!
//! Pipeline: zero-response correction → per-pixel `IRgBy` → block median
//! smoothing → texture amplitude and hue/saturation per pixel.
mod median;
mod texture;
mod transform;

pub use self::median::median_filter;
pub use self::texture::{smoothed_hues, texture_amplitude};
pub use self::transform::{correct_zero_response, to_irgby};

use serde::{Deserialize, Serialize};

/// Logarithmic channel response `105 * log10(x + 1)`.
#[inline]
pub fn log_response(x: u8) -> f64 {
    105.0 * (x as f64 + 1.0).log10()
}

/// Intensity plus red-green and blue-yellow opponent channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IRgBy {
    pub i: f64,
    pub rg: f64,
    pub by: f64,
}

impl IRgBy {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let (lr, lg, lb) = (log_response(r), log_response(g), log_response(b));
        Self {
            i: (lr + lb + lg) / 3.0,
            rg: lr - lg,
            by: lb - (lg + lr) / 2.0,
        }
    }
}

/// Per-pixel hue (degrees), saturation and smoothed texture amplitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HueSaturation {
    pub hue: f64,
    pub saturation: f64,
    pub texture: f64,
}

impl HueSaturation {
    pub const fn new(hue: f64, saturation: f64, texture: f64) -> Self {
        Self {
            hue,
            saturation,
            texture,
        }
    }

    /// Hue and saturation from smoothed opponent values; hue is `atan2(rg, by)`.
    pub fn from_opponents(rg: f64, by: f64, texture: f64) -> Self {
        Self {
            hue: rg.atan2(by).to_degrees(),
            saturation: (rg * rg + by * by).sqrt(),
            texture,
        }
    }
}
