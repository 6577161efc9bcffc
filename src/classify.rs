//! Boundary to an externally trained face/non-face classifier.
//!
//! The crate never trains anything; it only needs a yes/no decision for a
//! feature vector. Closures work directly, and a serialisable linear model
//! covers the common case of an exported SVM.
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::hog::{FeatureExtractor, Normalise};
use crate::types::{Rect, Rgb};
use log::debug;
use serde::{Deserialize, Serialize};

pub trait FaceClassifier {
    fn is_face(&self, features: &[f64]) -> bool;

    /// Feature length the classifier was trained on, when known.
    fn expected_len(&self) -> Option<usize> {
        None
    }
}

impl<F> FaceClassifier for F
where
    F: Fn(&[f64]) -> bool,
{
    fn is_face(&self, features: &[f64]) -> bool {
        self(features)
    }
}

/// `w · x + b > 0` decision function.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LinearClassifier {
    pub fn new(weights: Vec<f64>, bias: f64) -> Result<Self> {
        if weights.is_empty() {
            return Err(Error::InvalidArgument(
                "linear classifier needs at least one weight".to_string(),
            ));
        }
        Ok(Self { weights, bias })
    }

    pub fn decision_value(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.weights.len() {
            return Err(Error::InvalidArgument(format!(
                "expected {} features, got {}",
                self.weights.len(),
                features.len()
            )));
        }
        let dot: f64 = self
            .weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum();
        Ok(dot + self.bias)
    }
}

impl FaceClassifier for LinearClassifier {
    /// Vectors of the wrong length are never faces.
    fn is_face(&self, features: &[f64]) -> bool {
        self.decision_value(features).is_ok_and(|v| v > 0.0)
    }

    fn expected_len(&self) -> Option<usize> {
        Some(self.weights.len())
    }
}

/// A candidate region with the classifier's verdict.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedRegion {
    pub region: Rect,
    pub is_face: bool,
}

/// Extract features for every region and ask `classifier` about each.
pub fn classify_regions<N, C>(
    image: &Grid<Rgb>,
    regions: &[Rect],
    extractor: &FeatureExtractor<N>,
    classifier: &C,
) -> Result<Vec<ClassifiedRegion>>
where
    N: Normalise,
    C: FaceClassifier + ?Sized,
{
    if let Some(expected) = classifier.expected_len() {
        let produced = extractor.feature_len();
        if expected != produced {
            return Err(Error::InvalidArgument(format!(
                "classifier expects {expected} features but extractor produces {produced}"
            )));
        }
    }
    let mut out = Vec::with_capacity(regions.len());
    for &region in regions {
        let features = extractor.region_features(image, region)?;
        let is_face = classifier.is_face(&features);
        debug!("region {:?}: face={}", region, is_face);
        out.push(ClassifiedRegion { region, is_face });
    }
    Ok(out)
}
