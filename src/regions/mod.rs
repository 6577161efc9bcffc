//! Skin-mask topology: connected objects, enclosed holes and the filters
//! that turn them into face candidate rectangles.
//!
//! A skin object becomes a candidate when its bounding rectangle contains an
//! unmasked component that never reaches the rectangle's edge, the usual
//! signature of eyes or a mouth inside a face.
mod extract;
mod filter;
mod flood;
mod sliding;

pub use self::extract::{
    extract_candidates, find_enclosed_hole, skin_objects, Extraction, SkinObject,
};
pub use self::filter::{
    aspect_ratio_filter, expand_region, filter_regions, subsumption_filter, RegionFilterOptions,
};
pub use self::flood::{bounding_rect, FloodFill};
pub use self::sliding::SlidingWindowProposer;

use crate::error::Result;
use crate::grid::Grid;
use crate::types::{Rect, Rgb};

/// Anything that can suggest rectangles of an image worth classifying.
pub trait RegionProposer {
    fn propose(&self, image: &Grid<Rgb>) -> Result<Vec<Rect>>;
}
