use super::extract::histograms_rgb;
use super::histogram::BIN_COUNT;
use super::normalise::{HistogramGrid, Normalise, NormaliserKind};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::types::{Rect, Rgb};
use serde::{Deserialize, Serialize};

/// Flatten a histogram grid into a feature vector.
///
/// Histograms are visited row by row (top to bottom, left to right) and each
/// contributes its bins in order 10°, 30°, ..., 170°. Classifiers trained on
/// these vectors depend on this layout.
pub fn flatten(hogs: &HistogramGrid) -> Vec<f64> {
    let mut out = Vec::with_capacity(hogs.width() * hogs.height() * BIN_COUNT);
    for hog in hogs.values() {
        out.extend_from_slice(hog.bins());
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HogOptions {
    /// Pixels per histogram cell side.
    pub block_size: usize,
    /// Side of the square every region is resampled to before extraction.
    pub sample_size: usize,
    pub normaliser: NormaliserKind,
}

impl Default for HogOptions {
    fn default() -> Self {
        Self {
            block_size: 8,
            sample_size: 128,
            normaliser: NormaliserKind::default(),
        }
    }
}

/// Greyscale → gradients → histograms → normalise → flatten.
#[derive(Clone, Debug)]
pub struct FeatureExtractor<N = NormaliserKind> {
    block_size: usize,
    sample_size: usize,
    normaliser: N,
}

impl FeatureExtractor<NormaliserKind> {
    pub fn from_options(options: &HogOptions) -> Result<Self> {
        Self::new(options.block_size, options.sample_size, options.normaliser)
    }
}

impl Default for FeatureExtractor<NormaliserKind> {
    fn default() -> Self {
        let options = HogOptions::default();
        Self {
            block_size: options.block_size,
            sample_size: options.sample_size,
            normaliser: options.normaliser,
        }
    }
}

impl<N: Normalise> FeatureExtractor<N> {
    pub fn new(block_size: usize, sample_size: usize, normaliser: N) -> Result<Self> {
        if block_size == 0 || sample_size < block_size {
            return Err(Error::InvalidBlockSize {
                block_size,
                width: sample_size,
                height: sample_size,
            });
        }
        Ok(Self {
            block_size,
            sample_size,
            normaliser,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Normalised histogram grid for a whole image.
    pub fn histograms(&self, image: &Grid<Rgb>) -> Result<HistogramGrid> {
        let hogs = histograms_rgb(image, self.block_size)?;
        self.normaliser.normalise(&hogs)
    }

    /// Feature vector for a whole image at its own resolution.
    pub fn features(&self, image: &Grid<Rgb>) -> Result<Vec<f64>> {
        Ok(flatten(&self.histograms(image)?))
    }

    /// Feature vector for `region` of `image`, resampled to the configured
    /// sample size so every region yields the same length.
    pub fn region_features(&self, image: &Grid<Rgb>, region: Rect) -> Result<Vec<f64>> {
        let patch = image
            .slice(region)?
            .resize_bilinear(self.sample_size, self.sample_size)?;
        self.features(&patch)
    }

    /// Length of the vectors produced by [`FeatureExtractor::region_features`].
    pub fn feature_len(&self) -> usize {
        let cells = (self.sample_size as f64 / self.block_size as f64).round_ties_even() as usize;
        let (w, h) = self.normaliser.output_size(cells, cells);
        w * h * BIN_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hog::histogram::HistogramOfGradient;
    use crate::hog::normalise::GlobalNormaliser;

    #[test]
    fn flatten_is_row_major_by_bin() {
        let mut a = [0.0; BIN_COUNT];
        a[0] = 1.0;
        let mut b = [0.0; BIN_COUNT];
        b[8] = 2.0;
        let hogs = Grid::new(
            2,
            1,
            &[
                HistogramOfGradient::new(a).unwrap(),
                HistogramOfGradient::new(b).unwrap(),
            ],
        )
        .unwrap();
        let v = flatten(&hogs);
        assert_eq!(v.len(), 18);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[17], 2.0);
    }

    #[test]
    fn default_feature_length_matches_output() {
        let extractor = FeatureExtractor::<NormaliserKind>::default();
        // 128 / 8 = 16 cells, overlapping blocks of 2 -> 30x30 histograms.
        assert_eq!(extractor.feature_len(), 30 * 30 * 9);
        let image = Grid::from_fn(300, 200, |p| {
            let v = ((p.x * 7 + p.y * 3) % 256) as u8;
            Rgb::new(v, v, v)
        })
        .unwrap();
        let features = extractor
            .region_features(&image, Rect::new(40, 20, 150, 150))
            .unwrap();
        assert_eq!(features.len(), extractor.feature_len());
    }

    #[test]
    fn custom_normaliser_is_accepted() {
        let extractor = FeatureExtractor::new(4, 16, GlobalNormaliser).unwrap();
        assert_eq!(extractor.feature_len(), 4 * 4 * 9);
        assert!(FeatureExtractor::new(0, 16, GlobalNormaliser).is_err());
        assert!(FeatureExtractor::new(32, 16, GlobalNormaliser).is_err());
    }

    #[test]
    fn region_outside_image_is_rejected() {
        let image = Grid::filled(20, 20, Rgb::new(1, 2, 3)).unwrap();
        let extractor = FeatureExtractor::new(4, 16, GlobalNormaliser).unwrap();
        assert!(extractor
            .region_features(&image, Rect::new(10, 10, 20, 5))
            .is_err());
    }
}
