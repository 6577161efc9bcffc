//! Detector configuration.
//!
//! [`DetectorOptions`] holds the plain numeric knobs and is what the demo
//! reads from JSON. [`DetectorConfig`] wraps the options together with the
//! pluggable behaviour (scale function, skin predicates, region filter) as
//! shared closures; callers swap any of them with the `with_*` builders.
use crate::color::HueSaturation;
use crate::error::Result;
use crate::regions::{filter_regions, RegionFilterOptions};
use crate::skin::{HueBand, SkinPreset, SkinThresholds};
use crate::types::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Numeric detector parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorOptions {
    /// First texture median radius, multiplied by the scale.
    pub texture_first_pass_multiplier: usize,
    /// Second texture median radius, multiplied by the scale.
    pub texture_second_pass_multiplier: usize,
    /// Radius used to smooth the Rg/By channels, multiplied by the scale.
    pub rgby_smoothing_multiplier: usize,
    pub skin: SkinThresholds,
    pub relaxed_band: HueBand,
    /// Number of relaxed growth passes.
    pub relaxed_expansions: usize,
    /// Inclusive greyscale band applied to the colour data.
    pub intensity_band: [f64; 2],
    /// Skin objects need at least this many pixels per unit of scale.
    pub min_object_pixels_per_scale: usize,
    /// Apply the aspect-ratio and subsumption filters.
    pub filter_regions: bool,
    #[serde(flatten)]
    pub region_filter: RegionFilterOptions,
    /// Margin added around each surviving region, as a fraction of its size.
    pub margin_fraction: f64,
    /// `scale = round((width + height) / scale_divisor)`, at least 1.
    pub scale_divisor: f64,
    /// Larger images are resized to fit before detection; 0 disables.
    pub max_image_dimension: usize,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self::from_preset(SkinPreset::Default)
    }
}

impl DetectorOptions {
    pub fn from_preset(preset: SkinPreset) -> Self {
        Self {
            texture_first_pass_multiplier: 8,
            texture_second_pass_multiplier: 12,
            rgby_smoothing_multiplier: 2,
            skin: preset.thresholds(),
            relaxed_band: preset.relaxed_band(),
            relaxed_expansions: preset.relaxed_expansions(),
            intensity_band: [90.0, 240.0],
            min_object_pixels_per_scale: 64,
            filter_regions: preset.filters_regions(),
            region_filter: RegionFilterOptions::default(),
            margin_fraction: preset.margin_fraction(),
            scale_divisor: 640.0,
            max_image_dimension: 600,
        }
    }
}

pub type ScaleFn = Arc<dyn Fn(usize, usize) -> usize + Send + Sync>;
pub type PixelPredicate = Arc<dyn Fn(&HueSaturation) -> bool + Send + Sync>;
pub type RegionFilterFn = Arc<dyn Fn(&[Rect]) -> Result<Vec<Rect>> + Send + Sync>;

/// `round((width + height) / divisor)` with ties to even.
pub fn scale_from_divisor(divisor: f64) -> ScaleFn {
    Arc::new(move |width: usize, height: usize| {
        if divisor.is_nan() || divisor <= 0.0 {
            return 1;
        }
        ((width + height) as f64 / divisor).round_ties_even() as usize
    })
}

/// Options plus the behaviour the detector delegates to closures.
#[derive(Clone)]
pub struct DetectorConfig {
    options: DetectorOptions,
    scale: ScaleFn,
    skin_filter: PixelPredicate,
    relaxed_filter: PixelPredicate,
    region_filter: RegionFilterFn,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::new(DetectorOptions::default())
    }
}

impl DetectorConfig {
    /// Build closures from the numeric options.
    pub fn new(options: DetectorOptions) -> Self {
        let scale = scale_from_divisor(options.scale_divisor);
        let skin = options.skin.clone();
        let skin_filter: PixelPredicate = Arc::new(move |c: &HueSaturation| skin.accepts(c));
        let relaxed = options.relaxed_band;
        let relaxed_filter: PixelPredicate = Arc::new(move |c: &HueSaturation| relaxed.contains(c));
        let region_filter: RegionFilterFn = if options.filter_regions {
            let shape = options.region_filter;
            Arc::new(move |regions: &[Rect]| filter_regions(regions, &shape))
        } else {
            Arc::new(|regions: &[Rect]| Ok(regions.to_vec()))
        };
        Self {
            options,
            scale,
            skin_filter,
            relaxed_filter,
            region_filter,
        }
    }

    pub fn preset(preset: SkinPreset) -> Self {
        Self::new(DetectorOptions::from_preset(preset))
    }

    pub fn with_scale<F>(mut self, scale: F) -> Self
    where
        F: Fn(usize, usize) -> usize + Send + Sync + 'static,
    {
        self.scale = Arc::new(scale);
        self
    }

    pub fn with_skin_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&HueSaturation) -> bool + Send + Sync + 'static,
    {
        self.skin_filter = Arc::new(filter);
        self
    }

    pub fn with_relaxed_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&HueSaturation) -> bool + Send + Sync + 'static,
    {
        self.relaxed_filter = Arc::new(filter);
        self
    }

    pub fn with_region_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&[Rect]) -> Result<Vec<Rect>> + Send + Sync + 'static,
    {
        self.region_filter = Arc::new(filter);
        self
    }

    pub fn options(&self) -> &DetectorOptions {
        &self.options
    }

    /// Scale for a `width x height` image as reported by the scale function.
    /// The pipeline clamps this to at least 1.
    pub fn scale_for(&self, width: usize, height: usize) -> usize {
        (self.scale)(width, height)
    }

    pub fn is_skin(&self, colour: &HueSaturation) -> bool {
        (self.skin_filter)(colour)
    }

    pub fn is_relaxed_skin(&self, colour: &HueSaturation) -> bool {
        (self.relaxed_filter)(colour)
    }

    pub fn filter_regions(&self, regions: &[Rect]) -> Result<Vec<Rect>> {
        (self.region_filter)(regions)
    }
}

impl fmt::Debug for DetectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectorConfig")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl From<DetectorOptions> for DetectorConfig {
    fn from(options: DetectorOptions) -> Self {
        Self::new(options)
    }
}
