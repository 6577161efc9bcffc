use crate::error::{Error, Result};
use crate::types::Rect;
use serde::{Deserialize, Serialize};

/// Shape and overlap thresholds applied to candidate regions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionFilterOptions {
    /// Longest side divided by shortest side must not exceed this.
    pub max_aspect_ratio: f64,
    /// A region is subsumed only by another more than this many times larger.
    pub subsumption_area_ratio: f64,
    /// Fraction of the smaller region's area the overlap must exceed.
    pub subsumption_overlap: f64,
}

impl Default for RegionFilterOptions {
    fn default() -> Self {
        Self {
            max_aspect_ratio: 2.4,
            subsumption_area_ratio: 2.0,
            subsumption_overlap: 0.75,
        }
    }
}

/// Keep regions whose longest side is at most `max_aspect_ratio` times the
/// shortest. An empty region is an invalid argument.
pub fn aspect_ratio_filter(regions: &[Rect], max_aspect_ratio: f64) -> Result<Vec<Rect>> {
    if let Some(empty) = regions.iter().find(|r| r.is_empty()) {
        return Err(Error::InvalidArgument(format!(
            "region {empty:?} has a zero dimension"
        )));
    }
    Ok(regions
        .iter()
        .copied()
        .filter(|r| r.aspect_ratio() <= max_aspect_ratio)
        .collect())
}

/// Drop every region that is mostly covered by a much larger one.
///
/// All comparisons are made against the input set, so the outcome does not
/// depend on region order.
pub fn subsumption_filter(regions: &[Rect], area_ratio: f64, overlap: f64) -> Vec<Rect> {
    regions
        .iter()
        .copied()
        .filter(|region| {
            let area = region.area() as f64;
            !regions.iter().any(|other| {
                other.area() as f64 > area * area_ratio
                    && other
                        .intersect(region)
                        .is_some_and(|shared| shared.area() as f64 > overlap * area)
            })
        })
        .collect()
}

/// Aspect filter followed by the subsumption filter.
pub fn filter_regions(regions: &[Rect], options: &RegionFilterOptions) -> Result<Vec<Rect>> {
    let shaped = aspect_ratio_filter(regions, options.max_aspect_ratio)?;
    Ok(subsumption_filter(
        &shaped,
        options.subsumption_area_ratio,
        options.subsumption_overlap,
    ))
}

/// Grow `region` on every side by `fraction` of its own width/height
/// (rounded half to even), then clip to a `width x height` image.
pub fn expand_region(region: Rect, fraction: f64, width: usize, height: usize) -> Result<Rect> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyGrid { width, height });
    }
    if !region.fits_within(width, height) {
        return Err(Error::WindowOutOfBounds {
            window: region,
            width,
            height,
        });
    }
    if !fraction.is_finite() || fraction < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "margin fraction must be a non-negative number, got {fraction}"
        )));
    }
    let dx = (region.width as f64 * fraction).round_ties_even() as usize;
    let dy = (region.height as f64 * fraction).round_ties_even() as usize;
    let left = region.left.saturating_sub(dx);
    let top = region.top.saturating_sub(dy);
    let right = region.right().saturating_add(dx).min(width);
    let bottom = region.bottom().saturating_add(dy).min(height);
    Ok(Rect::new(left, top, right - left, bottom - top))
}
