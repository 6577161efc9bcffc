//! Skin-tone face region detector.
//!
//! The [`FaceRegionDetector`] takes an RGB grid and returns candidate face
//! rectangles together with per-stage diagnostics.
//!
//! Typical usage:
//! ```no_run
//! use face_regions::{DetectorConfig, FaceRegionDetector, Grid, Rgb};
//!
//! # fn example(image: Grid<Rgb>) -> face_regions::Result<()> {
//! let detector = FaceRegionDetector::new(DetectorConfig::default());
//! let report = detector.process(&image)?;
//! for region in &report.regions {
//!     println!("candidate at {:?}", region);
//! }
//! # Ok(())
//! # }
//! ```

// Stages
// - Downscale: fit the larger side into `max_image_dimension` (process only).
// - Scale: evaluate the scale function on the working size, at least 1.
// - Colour: zero-response correction, log-opponent I/Rg/By.
// - Texture: two median passes over I, radii k1*scale and k2*scale.
// - Hues: Rg/By smoothed with radius k3*scale, hue and saturation per pixel.
// - Mask: strict filter, relaxed growth passes, intensity band.
// - Regions: skin objects, enclosed holes, candidate rectangles.
// - Filter: region filter closure, then margin expansion within the image.

use super::options::DetectorConfig;
use super::scaling::{downscale, rescale_region};
use crate::color::{correct_zero_response, smoothed_hues, texture_amplitude, to_irgby};
use crate::diagnostics::{elapsed_ms, DetectionReport, InputDescriptor, TimingBreakdown};
use crate::error::Result;
use crate::grid::Grid;
use crate::regions::{expand_region, extract_candidates, RegionProposer};
use crate::skin::{build_skin_mask, count_set};
use crate::types::{Rect, Rgb};
use log::debug;
use std::time::Instant;

/// Intermediate results of one pass over a working-resolution image.
struct Analysis {
    scale: usize,
    mask: Grid<bool>,
    skin_objects: usize,
    searched_objects: usize,
    raw_candidates: Vec<Rect>,
    regions: Vec<Rect>,
}

#[derive(Clone, Debug, Default)]
pub struct FaceRegionDetector {
    config: DetectorConfig,
}

impl FaceRegionDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DetectorConfig) {
        self.config = config;
    }

    /// Candidate regions in the coordinate space of `image`, which is analysed
    /// at its own resolution.
    pub fn detect(&self, image: &Grid<Rgb>) -> Result<Vec<Rect>> {
        let mut timings = TimingBreakdown::default();
        Ok(self.analyse(image, &mut timings, Instant::now())?.regions)
    }

    /// Downscale first when the image exceeds `max_image_dimension`, then map
    /// the regions back to source coordinates.
    pub fn detect_with_downscale(&self, image: &Grid<Rgb>) -> Result<Vec<Rect>> {
        Ok(self.process(image)?.regions)
    }

    /// Full run with diagnostics; regions are in source coordinates.
    pub fn process(&self, image: &Grid<Rgb>) -> Result<DetectionReport> {
        Ok(self.process_with_mask(image)?.0)
    }

    /// Like [`FaceRegionDetector::process`], also returning the final skin
    /// mask at working resolution.
    pub fn process_with_mask(&self, image: &Grid<Rgb>) -> Result<(DetectionReport, Grid<bool>)> {
        let total = Instant::now();
        let mut timings = TimingBreakdown::default();

        let start = Instant::now();
        let max_dimension = self.config.options().max_image_dimension;
        let (working, factor) = downscale(image, max_dimension)?;
        if factor != 1.0 {
            debug!(
                "downscaled {}x{} to {}x{} (factor {:.3})",
                image.width(),
                image.height(),
                working.width(),
                working.height(),
                factor
            );
        }
        let start = timings.lap("downscale", start);

        let analysis = self.analyse(&working, &mut timings, start)?;

        let regions = if factor == 1.0 {
            analysis.regions.clone()
        } else {
            analysis
                .regions
                .iter()
                .map(|&r| rescale_region(r, factor, image.width(), image.height()))
                .collect::<Result<Vec<_>>>()?
        };
        timings.total_ms = elapsed_ms(total);

        let report = DetectionReport {
            input: InputDescriptor {
                width: image.width(),
                height: image.height(),
                working_width: working.width(),
                working_height: working.height(),
                downscale_factor: factor,
            },
            scale: analysis.scale,
            skin_pixels: count_set(&analysis.mask),
            skin_objects: analysis.skin_objects,
            searched_objects: analysis.searched_objects,
            raw_candidates: analysis.raw_candidates,
            regions,
            classified: None,
            timings,
        };
        Ok((report, analysis.mask))
    }

    fn analyse(
        &self,
        image: &Grid<Rgb>,
        timings: &mut TimingBreakdown,
        start: Instant,
    ) -> Result<Analysis> {
        let options = self.config.options();
        let (width, height) = (image.width(), image.height());
        let scale = self.config.scale_for(width, height).max(1);
        debug!("image loaded: {}x{}, scale {}", width, height, scale);

        let corrected = correct_zero_response(image);
        debug!("zero response corrected");
        let values = to_irgby(&corrected);
        debug!("I/RgBy computed");
        let start = timings.lap("colour", start);

        let texture = texture_amplitude(
            &values,
            options.texture_first_pass_multiplier * scale,
            options.texture_second_pass_multiplier * scale,
        )?;
        debug!("texture amplitude computed");
        let start = timings.lap("texture", start);

        let hues = smoothed_hues(&values, &texture, options.rgby_smoothing_multiplier * scale)?;
        debug!("hue data computed");
        let start = timings.lap("hues", start);

        let config = &self.config;
        let mask = build_skin_mask(
            &hues,
            &corrected,
            |c| config.is_skin(c),
            |c| config.is_relaxed_skin(c),
            options.relaxed_expansions,
            options.intensity_band,
        )?;
        let start = timings.lap("mask", start);

        let extraction = extract_candidates(
            &mask,
            scale,
            options.min_object_pixels_per_scale * scale,
        )?;
        let start = timings.lap("regions", start);

        let filtered = self.config.filter_regions(&extraction.candidates)?;
        let regions = filtered
            .iter()
            .map(|&r| expand_region(r, options.margin_fraction, width, height))
            .collect::<Result<Vec<_>>>()?;
        timings.lap("filter", start);
        debug!(
            "regions identified: {} candidates, {} after filtering",
            extraction.candidates.len(),
            regions.len()
        );

        Ok(Analysis {
            scale,
            mask,
            skin_objects: extraction.total_objects,
            searched_objects: extraction.objects.len(),
            raw_candidates: extraction.candidates,
            regions,
        })
    }
}

impl RegionProposer for FaceRegionDetector {
    fn propose(&self, image: &Grid<Rgb>) -> Result<Vec<Rect>> {
        self.detect_with_downscale(image)
    }
}
