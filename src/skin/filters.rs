//! Hue/saturation/texture thresholds used to classify skin pixels.
//!
//! Three tunings are provided as [`SkinPreset`]s. Each strict filter is a
//! union of hue bands gated by a maximum texture amplitude; the relaxed
//! filter used for mask growth is a single band with no texture gate.
use crate::color::HueSaturation;
use serde::{Deserialize, Serialize};

/// Inclusive hue (degrees) and saturation ranges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HueBand {
    pub hue: [f64; 2],
    pub saturation: [f64; 2],
}

impl HueBand {
    pub const fn new(hue_min: f64, hue_max: f64, saturation_min: f64, saturation_max: f64) -> Self {
        Self {
            hue: [hue_min, hue_max],
            saturation: [saturation_min, saturation_max],
        }
    }

    #[inline]
    pub fn contains(&self, colour: &HueSaturation) -> bool {
        colour.hue >= self.hue[0]
            && colour.hue <= self.hue[1]
            && colour.saturation >= self.saturation[0]
            && colour.saturation <= self.saturation[1]
    }
}

/// Band used when growing an existing mask into neighbouring pixels.
pub const RELAXED_BAND: HueBand = HueBand::new(110.0, 180.0, 0.0, 180.0);

/// Strict skin classification: any band matches and texture is low enough.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkinThresholds {
    pub bands: Vec<HueBand>,
    pub max_texture: f64,
}

impl SkinThresholds {
    pub fn accepts(&self, colour: &HueSaturation) -> bool {
        colour.texture <= self.max_texture && self.bands.iter().any(|b| b.contains(colour))
    }
}

impl Default for SkinThresholds {
    fn default() -> Self {
        SkinPreset::Default.thresholds()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinPreset {
    /// Thresholds tuned for mixed photo sets; filters regions by shape.
    #[default]
    Default,
    /// Thresholds from Kapur's skin detection write-up; no region filtering.
    Kapur,
    /// Kapur's schedule with the tuned bands and a looser texture gate.
    TweakedKapur,
}

impl SkinPreset {
    pub fn thresholds(self) -> SkinThresholds {
        match self {
            SkinPreset::Default => SkinThresholds {
                bands: vec![
                    HueBand::new(105.0, 120.0, 10.0, 60.0),
                    HueBand::new(120.0, 160.0, 10.0, 60.0),
                    HueBand::new(160.0, 180.0, 30.0, 30.0),
                ],
                max_texture: 20.0,
            },
            SkinPreset::Kapur => SkinThresholds {
                bands: vec![
                    HueBand::new(120.0, 160.0, 10.0, 60.0),
                    HueBand::new(150.0, 180.0, 20.0, 80.0),
                ],
                max_texture: 4.5,
            },
            SkinPreset::TweakedKapur => SkinThresholds {
                bands: vec![
                    HueBand::new(105.0, 120.0, 10.0, 60.0),
                    HueBand::new(120.0, 160.0, 10.0, 60.0),
                    HueBand::new(160.0, 180.0, 30.0, 40.0),
                ],
                max_texture: 9.0,
            },
        }
    }

    pub fn relaxed_band(self) -> HueBand {
        RELAXED_BAND
    }

    pub fn relaxed_expansions(self) -> usize {
        match self {
            SkinPreset::Default => 2,
            SkinPreset::Kapur | SkinPreset::TweakedKapur => 5,
        }
    }

    pub fn margin_fraction(self) -> f64 {
        match self {
            SkinPreset::Default => 0.13,
            SkinPreset::Kapur => 0.0,
            SkinPreset::TweakedKapur => 0.1,
        }
    }

    /// Whether aspect-ratio and subsumption filtering apply to candidates.
    pub fn filters_regions(self) -> bool {
        !matches!(self, SkinPreset::Kapur)
    }
}
