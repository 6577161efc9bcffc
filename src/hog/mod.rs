//! Histogram-of-oriented-gradients descriptor.
//!
//! A region is reduced to rounded greyscale, per-pixel central-difference
//! gradients, one 9-bin histogram per pixel block, a contrast normalisation
//! pass, and finally a flat vector of `9 x histograms` values.
mod extract;
mod features;
mod gradient;
mod histogram;
mod normalise;

pub use self::extract::{block_histogram, histograms, histograms_rgb};
pub use self::features::{flatten, FeatureExtractor, HogOptions};
pub use self::gradient::{gradient_field, greyscale, orientation_degrees, GradientVector};
pub use self::histogram::{bin_centre, HistogramOfGradient, BIN_COUNT, BIN_WIDTH_DEG};
pub use self::normalise::{
    BlockwiseNormaliser, GlobalNormaliser, HistogramGrid, Normalise, NormaliserKind,
    OverlappingBlockwiseNormaliser,
};
