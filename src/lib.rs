#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod classify;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod hog;
pub mod image;
pub mod types;

// Building blocks of the detector; public for tools and experiments.
pub mod color;
pub mod regions;
pub mod skin;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector, feature extractor, classifier boundary.
pub use crate::classify::{classify_regions, ClassifiedRegion, FaceClassifier, LinearClassifier};
pub use crate::detector::{DetectorConfig, DetectorOptions, FaceRegionDetector};
pub use crate::hog::{FeatureExtractor, HogOptions, NormaliserKind};
pub use crate::skin::SkinPreset;

// Core data types.
pub use crate::error::{Error, Result};
pub use crate::grid::{Grid, GridView};
pub use crate::types::{Point, Rect, Rgb};

// Diagnostics returned by the detector.
pub use crate::diagnostics::{DetectionReport, InputDescriptor, TimingBreakdown};

// Alternative region source.
pub use crate::regions::{RegionProposer, SlidingWindowProposer};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use face_regions::prelude::*;
///
/// # fn main() -> face_regions::Result<()> {
/// let (w, h) = (320usize, 240usize);
/// let image = Grid::filled(w, h, Rgb::new(200, 150, 120))?;
///
/// let detector = FaceRegionDetector::new(DetectorConfig::preset(SkinPreset::Default));
/// let report = detector.process(&image)?;
///
/// let extractor = FeatureExtractor::<NormaliserKind>::default();
/// for region in &report.regions {
///     let features = extractor.region_features(&image, *region)?;
///     println!("{:?}: {} features", region, features.len());
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        DetectorConfig, FaceClassifier, FaceRegionDetector, FeatureExtractor, Grid, NormaliserKind,
        Rect, Rgb, SkinPreset,
    };
}
