//! Skin-tone face region detector.
//!
//! Overview
//! - Optionally downsizes the photo so its larger side fits a working limit.
//! - Derives a scale from the working size; every smoothing radius and size
//!   threshold is a multiple of it.
//! - Converts to log-opponent colour, measures texture, smooths the opponent
//!   channels and classifies pixels as skin with configurable predicates.
//! - Grows the mask with a relaxed predicate, removes very dark and very
//!   bright pixels, then looks for skin objects that enclose a hole.
//! - Filters the candidates by shape and overlap and adds a margin.
//!
//! Modules
//! - [`options`] – numeric options and the closure-based configuration.
//! - `pipeline` – the [`FaceRegionDetector`] implementation.
//! - `scaling` – working-resolution planning and mapping back to the source.

pub mod options;
mod pipeline;
mod scaling;

pub use options::{scale_from_divisor, DetectorConfig, DetectorOptions};
pub use pipeline::FaceRegionDetector;
pub use scaling::{downscale, downscale_factor, rescale_region};
