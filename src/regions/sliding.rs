use super::RegionProposer;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::types::{Rect, Rgb};
use serde::{Deserialize, Serialize};

/// Exhaustive square windows swept left-to-right, top-to-bottom.
///
/// Window sides are fractions of the larger image dimension; each window
/// steps by `overlap` of its side. Sizes larger than the smaller image
/// dimension are skipped and duplicate sizes are visited once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlidingWindowProposer {
    fractions: Vec<f64>,
    overlap: f64,
}

impl Default for SlidingWindowProposer {
    fn default() -> Self {
        Self {
            fractions: vec![1.0 / 8.0, 1.0 / 6.0, 1.0 / 4.0, 1.0 / 3.0],
            overlap: 1.0 / 3.0,
        }
    }
}

impl SlidingWindowProposer {
    pub fn new(fractions: Vec<f64>, overlap: f64) -> Result<Self> {
        if overlap.is_nan() || overlap <= 0.0 || overlap > 1.0 {
            return Err(Error::InvalidArgument(format!(
                "window overlap must be in (0, 1], got {overlap}"
            )));
        }
        if let Some(bad) = fractions
            .iter()
            .find(|f| f.is_nan() || **f <= 0.0 || **f > 1.0)
        {
            return Err(Error::InvalidArgument(format!(
                "window fractions must be in (0, 1], got {bad}"
            )));
        }
        Ok(Self { fractions, overlap })
    }

    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    pub fn overlap(&self) -> f64 {
        self.overlap
    }

    /// Window sides for an image of the given size, in first-seen order.
    pub fn window_sizes(&self, width: usize, height: usize) -> Vec<usize> {
        let largest = width.max(height) as f64;
        let smallest = width.min(height);
        let mut sizes: Vec<usize> = Vec::with_capacity(self.fractions.len());
        for fraction in &self.fractions {
            let size = (largest * fraction).round_ties_even() as usize;
            if size == 0 || size > smallest || sizes.contains(&size) {
                continue;
            }
            sizes.push(size);
        }
        sizes
    }

    pub fn windows(&self, width: usize, height: usize) -> Vec<Rect> {
        let mut out = Vec::new();
        for size in self.window_sizes(width, height) {
            let step = ((size as f64 * self.overlap).round_ties_even() as usize).max(1);
            let mut y = 0;
            while y + size <= height {
                let mut x = 0;
                while x + size <= width {
                    out.push(Rect::new(x, y, size, size));
                    x += step;
                }
                y += step;
            }
        }
        out
    }
}

impl RegionProposer for SlidingWindowProposer {
    fn propose(&self, image: &Grid<Rgb>) -> Result<Vec<Rect>> {
        Ok(self.windows(image.width(), image.height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_follow_larger_dimension_and_skip_oversized() {
        let p = SlidingWindowProposer::default();
        // 600x100: 75, 100, 150, 200 -> only 75 and 100 fit the height.
        assert_eq!(p.window_sizes(600, 100), vec![75, 100]);
    }

    #[test]
    fn duplicate_sizes_are_visited_once() {
        let p = SlidingWindowProposer::new(vec![0.5, 0.5, 0.25], 0.5).unwrap();
        assert_eq!(p.window_sizes(40, 40), vec![20, 10]);
    }

    #[test]
    fn windows_step_by_overlap_and_stay_inside() {
        let p = SlidingWindowProposer::new(vec![0.5], 0.5).unwrap();
        let windows = p.windows(20, 10);
        // Side 10, step 5: x in {0, 5, 10}, y in {0}.
        assert_eq!(
            windows,
            vec![
                Rect::new(0, 0, 10, 10),
                Rect::new(5, 0, 10, 10),
                Rect::new(10, 0, 10, 10)
            ]
        );
        assert!(windows.iter().all(|w| w.fits_within(20, 10)));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(SlidingWindowProposer::new(vec![0.5], 0.0).is_err());
        assert!(SlidingWindowProposer::new(vec![1.5], 0.5).is_err());
    }
}
