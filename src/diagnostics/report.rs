use super::TimingBreakdown;
use crate::classify::ClassifiedRegion;
use crate::types::Rect;
use serde::Serialize;

/// Dimensions of the image the caller supplied and of the grid that was
/// actually analysed after any downscaling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub working_width: usize,
    pub working_height: usize,
    /// Source pixels per working pixel; `1.0` when no resize happened.
    pub downscale_factor: f64,
}

impl InputDescriptor {
    pub fn unscaled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            working_width: width,
            working_height: height,
            downscale_factor: 1.0,
        }
    }
}

/// Result produced by [`FaceRegionDetector::process`](crate::FaceRegionDetector).
///
/// `regions` are in source image coordinates; `raw_candidates` are the
/// unfiltered, unexpanded rectangles in working coordinates.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub input: InputDescriptor,
    pub scale: usize,
    pub skin_pixels: usize,
    pub skin_objects: usize,
    pub searched_objects: usize,
    pub raw_candidates: Vec<Rect>,
    pub regions: Vec<Rect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classified: Option<Vec<ClassifiedRegion>>,
    pub timings: TimingBreakdown,
}

impl DetectionReport {
    pub fn face_count(&self) -> Option<usize> {
        self.classified
            .as_ref()
            .map(|c| c.iter().filter(|r| r.is_face).count())
    }
}
