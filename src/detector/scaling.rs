//! Working-resolution helpers.
//!
//! - Plans the resize that brings a large photo down to the working size.
//! - Maps regions found at working resolution back onto the source image.
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::types::{Rect, Rgb};

/// Source pixels per working pixel so that the larger side fits in
/// `max_dimension`. `1.0` when the image already fits or the limit is 0.
pub fn downscale_factor(width: usize, height: usize, max_dimension: usize) -> f64 {
    let largest = width.max(height);
    if max_dimension == 0 || largest <= max_dimension {
        return 1.0;
    }
    largest as f64 / max_dimension as f64
}

/// Resize `image` so its larger side is at most `max_dimension`.
///
/// Returns the working grid (a cheap clone when no resize is needed) and the
/// factor to hand to [`rescale_region`].
pub fn downscale(image: &Grid<Rgb>, max_dimension: usize) -> Result<(Grid<Rgb>, f64)> {
    let factor = downscale_factor(image.width(), image.height(), max_dimension);
    if factor == 1.0 {
        return Ok((image.clone(), 1.0));
    }
    let width = ((image.width() as f64 / factor).round() as usize).max(1);
    let height = ((image.height() as f64 / factor).round() as usize).max(1);
    Ok((image.resize_bilinear(width, height)?, factor))
}

/// Multiply every edge of `region` by `factor` (rounded) and clip the result
/// to a `width x height` source image.
pub fn rescale_region(region: Rect, factor: f64, width: usize, height: usize) -> Result<Rect> {
    if factor.is_nan() || factor <= 0.0 || factor.is_infinite() {
        return Err(Error::InvalidArgument(format!(
            "rescale factor must be positive, got {factor}"
        )));
    }
    let map = |v: usize, limit: usize| ((v as f64 * factor).round() as usize).min(limit);
    let left = map(region.left, width);
    let top = map(region.top, height);
    let right = map(region.right(), width);
    let bottom = map(region.bottom(), height);
    Rect::from_ltrb(left, top, right, bottom).ok_or(Error::WindowOutOfBounds {
        window: region,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_images_are_left_alone() {
        assert_eq!(downscale_factor(600, 400, 600), 1.0);
        assert_eq!(downscale_factor(6000, 4000, 0), 1.0);
        let image = Grid::filled(40, 30, Rgb::new(1, 2, 3)).unwrap();
        let (working, factor) = downscale(&image, 600).unwrap();
        assert_eq!(factor, 1.0);
        assert!(working.shares_backing(&image));
    }

    #[test]
    fn large_images_fit_the_limit() {
        let image = Grid::filled(1200, 900, Rgb::new(10, 20, 30)).unwrap();
        let (working, factor) = downscale(&image, 600).unwrap();
        assert_eq!(factor, 2.0);
        assert_eq!((working.width(), working.height()), (600, 450));
        assert_eq!(*working.get(10, 10).unwrap(), Rgb::new(10, 20, 30));
    }

    #[test]
    fn regions_map_back_and_clip() {
        let r = rescale_region(Rect::new(10, 20, 30, 40), 2.0, 1200, 900).unwrap();
        assert_eq!(r, Rect::new(20, 40, 60, 80));
        let clipped = rescale_region(Rect::new(500, 400, 100, 50), 2.0, 1100, 850).unwrap();
        assert_eq!(clipped, Rect::new(1000, 800, 100, 50));
        assert!(rescale_region(Rect::new(0, 0, 1, 1), 0.0, 10, 10).is_err());
    }
}
