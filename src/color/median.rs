use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::types::Point;

/// Blocky median smoothing.
///
/// The grid is tiled from the top-left with non-overlapping squares of side
/// `block_size + 1`; each tile is overwritten with the median (element
/// `len / 2` after sorting) of `extract` over its cells. Tiles running off the
/// right or bottom edge are truncated.
pub fn median_filter<T, F>(source: &Grid<T>, extract: F, block_size: usize) -> Result<Grid<f64>>
where
    F: Fn(&T) -> f64,
{
    if block_size == 0 {
        return Err(Error::InvalidBlockSize {
            block_size,
            width: source.width(),
            height: source.height(),
        });
    }
    let (w, h) = (source.width(), source.height());
    let step = block_size + 1;
    let mut out = vec![0.0; w * h];
    let mut scratch = Vec::with_capacity(step * step);
    for top in (0..h).step_by(step) {
        for left in (0..w).step_by(step) {
            let area = source.neighbourhood(Point::new(left, top), 0, block_size)?;
            let tile = source.slice(area)?;
            scratch.clear();
            scratch.extend(tile.values().map(&extract));
            let mid = scratch.len() / 2;
            let (_, median, _) = scratch.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
            let median = *median;
            for y in area.top..area.bottom() {
                out[y * w + area.left..y * w + area.right()].fill(median);
            }
        }
    }
    Grid::from_vec(w, h, out)
}
