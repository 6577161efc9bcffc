use super::gradient::{gradient_field, greyscale, GradientVector};
use super::histogram::HistogramOfGradient;
use crate::error::Result;
use crate::grid::Grid;
use crate::types::Rgb;
use log::debug;

/// Bin every gradient of a block into one histogram.
pub fn block_histogram(block: &Grid<GradientVector>) -> HistogramOfGradient {
    let mut hist = HistogramOfGradient::zero();
    for g in block.values() {
        hist.accumulate(g.angle as f64, g.magnitude);
    }
    hist
}

/// One histogram per `block_size` square of the intensity grid.
pub fn histograms(intensity: &Grid<f64>, block_size: usize) -> Result<Grid<HistogramOfGradient>> {
    let field = gradient_field(intensity);
    let hogs = field.block_out(block_size, block_histogram)?;
    debug!(
        "hog: {}x{} pixels -> {}x{} histograms (block {})",
        intensity.width(),
        intensity.height(),
        hogs.width(),
        hogs.height(),
        block_size
    );
    Ok(hogs)
}

pub fn histograms_rgb(source: &Grid<Rgb>, block_size: usize) -> Result<Grid<HistogramOfGradient>> {
    histograms(&greyscale(source), block_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn block_size_must_fit() {
        let g = Grid::filled(6, 6, 0.0).unwrap();
        assert!(matches!(
            histograms(&g, 7),
            Err(Error::InvalidBlockSize { .. })
        ));
        assert!(histograms(&g, 0).is_err());
    }

    #[test]
    fn flat_image_has_empty_histograms() {
        let g = Grid::filled(8, 8, 77.0).unwrap();
        let hogs = histograms(&g, 4).unwrap();
        assert_eq!((hogs.width(), hogs.height()), (2, 2));
        assert!(hogs.values().all(|h| h.sum() == 0.0));
    }
}
