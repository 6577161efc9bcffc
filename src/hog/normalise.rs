//! Contrast normalisation strategies for histogram grids.
//!
//! Every strategy divides histograms by the greatest single bin magnitude in
//! some neighbourhood. When that maximum is zero each histogram is instead
//! rescaled to sum to one (uniform when it is empty as well).
use super::histogram::HistogramOfGradient;
use crate::error::{Error, Result};
use crate::grid::{Grid, GridView};
use crate::types::Rect;
use serde::{Deserialize, Serialize};

pub type HistogramGrid = Grid<HistogramOfGradient>;

pub trait Normalise {
    fn normalise(&self, hogs: &HistogramGrid) -> Result<HistogramGrid>;

    /// Output dimensions for an input of `width x height` histograms.
    fn output_size(&self, width: usize, height: usize) -> (usize, usize) {
        (width, height)
    }
}

impl<F> Normalise for F
where
    F: Fn(&HistogramGrid) -> Result<HistogramGrid>,
{
    fn normalise(&self, hogs: &HistogramGrid) -> Result<HistogramGrid> {
        self(hogs)
    }
}

#[inline]
fn divide_or_normalise(hog: &HistogramOfGradient, max: f64) -> HistogramOfGradient {
    if max == 0.0 {
        hog.normalised()
    } else {
        hog.scaled(1.0 / max)
    }
}

fn greatest_in(hogs: &HistogramGrid) -> f64 {
    hogs.values()
        .map(HistogramOfGradient::greatest_magnitude)
        .fold(0.0, f64::max)
}

fn check_block(block_size: usize, hogs: &HistogramGrid) -> Result<()> {
    if block_size == 0 || block_size > hogs.width() || block_size > hogs.height() {
        return Err(Error::InvalidBlockSize {
            block_size,
            width: hogs.width(),
            height: hogs.height(),
        });
    }
    Ok(())
}

/// Scale the whole grid so its greatest bin becomes one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlobalNormaliser;

impl Normalise for GlobalNormaliser {
    fn normalise(&self, hogs: &HistogramGrid) -> Result<HistogramGrid> {
        let max = greatest_in(hogs);
        Ok(hogs.transform(|h| divide_or_normalise(h, max)))
    }
}

/// Divide each histogram by the greatest bin inside a `block_size` square
/// starting at the cell, shifted back so it stays inside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockwiseNormaliser {
    pub block_size: usize,
}

impl Normalise for BlockwiseNormaliser {
    fn normalise(&self, hogs: &HistogramGrid) -> Result<HistogramGrid> {
        let bs = self.block_size;
        check_block(bs, hogs)?;
        let (w, h) = (hogs.width(), hogs.height());
        let greatest = hogs.transform(HistogramOfGradient::greatest_magnitude);
        let mut out = Vec::with_capacity(w * h);
        for (y, row) in hogs.rows().enumerate() {
            let top = (y + bs).min(h) - bs;
            for (x, hog) in row.iter().enumerate() {
                let left = (x + bs).min(w) - bs;
                let window = greatest.slice(Rect::new(left, top, bs, bs))?;
                let max = window.values().copied().fold(0.0, f64::max);
                out.push(divide_or_normalise(hog, max));
            }
        }
        Grid::from_vec(w, h, out)
    }
}

/// Normalise every `block_size` window (stride one) independently and tile
/// the results side by side.
///
/// The output holds `(W - B + 1) * B x (H - B + 1) * B` histograms; interior
/// cells appear once per window that covers them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlappingBlockwiseNormaliser {
    pub block_size: usize,
}

impl Normalise for OverlappingBlockwiseNormaliser {
    fn normalise(&self, hogs: &HistogramGrid) -> Result<HistogramGrid> {
        let bs = self.block_size;
        check_block(bs, hogs)?;
        let across = hogs.width() - bs + 1;
        let down = hogs.height() - bs + 1;
        let out_w = across * bs;
        let out_h = down * bs;
        let mut out = vec![HistogramOfGradient::zero(); out_w * out_h];
        for by in 0..down {
            for bx in 0..across {
                let block = hogs.slice(Rect::new(bx, by, bs, bs))?;
                let max = greatest_in(&block);
                for (j, row) in block.rows().enumerate() {
                    let start = (by * bs + j) * out_w + bx * bs;
                    for (dst, hog) in out[start..start + bs].iter_mut().zip(row) {
                        *dst = divide_or_normalise(hog, max);
                    }
                }
            }
        }
        Grid::from_vec(out_w, out_h, out)
    }

    fn output_size(&self, width: usize, height: usize) -> (usize, usize) {
        let bs = self.block_size;
        (
            (width + 1).saturating_sub(bs) * bs,
            (height + 1).saturating_sub(bs) * bs,
        )
    }
}

/// Serialisable choice of normaliser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormaliserKind {
    Global,
    Blockwise { block_size: usize },
    OverlappingBlockwise { block_size: usize },
}

impl Default for NormaliserKind {
    fn default() -> Self {
        NormaliserKind::OverlappingBlockwise { block_size: 2 }
    }
}

impl Normalise for NormaliserKind {
    fn normalise(&self, hogs: &HistogramGrid) -> Result<HistogramGrid> {
        match *self {
            NormaliserKind::Global => GlobalNormaliser.normalise(hogs),
            NormaliserKind::Blockwise { block_size } => {
                BlockwiseNormaliser { block_size }.normalise(hogs)
            }
            NormaliserKind::OverlappingBlockwise { block_size } => {
                OverlappingBlockwiseNormaliser { block_size }.normalise(hogs)
            }
        }
    }

    fn output_size(&self, width: usize, height: usize) -> (usize, usize) {
        match *self {
            NormaliserKind::Global => GlobalNormaliser.output_size(width, height),
            NormaliserKind::Blockwise { block_size } => {
                BlockwiseNormaliser { block_size }.output_size(width, height)
            }
            NormaliserKind::OverlappingBlockwise { block_size } => {
                OverlappingBlockwiseNormaliser { block_size }.output_size(width, height)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hog::histogram::BIN_COUNT;

    fn peak(value: f64) -> HistogramOfGradient {
        let mut bins = [0.0; BIN_COUNT];
        bins[2] = value;
        HistogramOfGradient::new(bins).unwrap()
    }

    fn peaks(width: usize, height: usize, values: &[f64]) -> HistogramGrid {
        Grid::from_vec(width, height, values.iter().map(|v| peak(*v)).collect()).unwrap()
    }

    #[test]
    fn global_scales_to_unit_maximum() {
        let hogs = peaks(2, 2, &[1.0, 4.0, 2.0, 8.0]);
        let out = GlobalNormaliser.normalise(&hogs).unwrap();
        assert_eq!(greatest_in(&out), 1.0);
        assert_eq!(out.get(0, 1).unwrap().bins()[2], 0.25);
    }

    #[test]
    fn global_falls_back_to_uniform_when_empty() {
        let hogs = peaks(2, 1, &[0.0, 0.0]);
        let out = GlobalNormaliser.normalise(&hogs).unwrap();
        assert!(out
            .values()
            .all(|h| h.bins().iter().all(|v| (*v - 1.0 / 9.0).abs() < 1e-12)));
    }

    #[test]
    fn blockwise_window_is_shifted_inside() {
        // 3x1 is rejected for block 2 (height 1); use 3x2.
        let hogs = peaks(3, 2, &[2.0, 4.0, 8.0, 1.0, 1.0, 1.0]);
        let out = BlockwiseNormaliser { block_size: 2 }.normalise(&hogs).unwrap();
        // Cell (0,0) window covers x 0..2 -> max 4.
        assert_eq!(out.get(0, 0).unwrap().bins()[2], 0.5);
        // Cell (2,0) window shifts to x 1..3 -> max 8.
        assert_eq!(out.get(2, 0).unwrap().bins()[2], 1.0);
        assert_eq!(out.get(1, 0).unwrap().bins()[2], 0.5);
        assert_eq!((out.width(), out.height()), (3, 2));
    }

    fn is_uniform(hog: &HistogramOfGradient) -> bool {
        hog.bins().iter().all(|v| (*v - 1.0 / 9.0).abs() < 1e-12)
    }

    #[test]
    fn blockwise_falls_back_per_cell() {
        let hogs = peaks(3, 3, &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 5.0]);
        let out = BlockwiseNormaliser { block_size: 2 }.normalise(&hogs).unwrap();
        // Windows at (0,0) and (0,1) miss the peak entirely.
        assert!(is_uniform(out.get(0, 0).unwrap()));
        assert!(is_uniform(out.get(0, 1).unwrap()));
        // (1,1) shares its window with the peak, so it is scaled, not uniform.
        assert_eq!(out.get(1, 1).unwrap().sum(), 0.0);
        assert_eq!(out.get(2, 2).unwrap().bins()[2], 1.0);
        assert_eq!(out.get(2, 2).unwrap().greatest_magnitude(), 1.0);
    }

    #[test]
    fn blockwise_rejects_oversized_block() {
        let hogs = peaks(3, 1, &[1.0, 1.0, 1.0]);
        assert!(BlockwiseNormaliser { block_size: 2 }.normalise(&hogs).is_err());
    }

    #[test]
    fn overlapping_tiles_each_window() {
        let hogs = peaks(3, 2, &[1.0, 2.0, 4.0, 1.0, 1.0, 1.0]);
        let n = OverlappingBlockwiseNormaliser { block_size: 2 };
        let out = n.normalise(&hogs).unwrap();
        assert_eq!((out.width(), out.height()), (4, 2));
        assert_eq!(n.output_size(3, 2), (4, 2));
        // Second column of the first tile and first column of the second tile
        // are the same source cell, normalised by different maxima.
        assert_eq!(out.get(1, 0).unwrap().bins()[2], 1.0);
        assert_eq!(out.get(2, 0).unwrap().bins()[2], 0.5);
        assert_eq!(out.get(3, 0).unwrap().bins()[2], 1.0);
    }

    #[test]
    fn overlapping_falls_back_per_window() {
        let hogs = peaks(3, 3, &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 5.0]);
        let out = OverlappingBlockwiseNormaliser { block_size: 2 }
            .normalise(&hogs)
            .unwrap();
        assert_eq!((out.width(), out.height()), (4, 4));
        // The top-left window is all zero and becomes uniform.
        let first = out.slice(Rect::new(0, 0, 2, 2)).unwrap();
        assert!(first.values().all(is_uniform));
        // The bottom-right window holds the peak: max 1, empty cells stay empty.
        assert_eq!(out.get(3, 3).unwrap().bins()[2], 1.0);
        assert_eq!(out.get(2, 2).unwrap().sum(), 0.0);
        let last = out.slice(Rect::new(2, 2, 2, 2)).unwrap();
        assert_eq!(greatest_in(&last), 1.0);
    }

    #[test]
    fn closures_act_as_normalisers() {
        let identity = |hogs: &HistogramGrid| -> Result<HistogramGrid> { Ok(hogs.clone()) };
        let hogs = peaks(1, 1, &[3.0]);
        assert_eq!(identity.normalise(&hogs).unwrap(), hogs);
    }

    #[test]
    fn kind_parses_from_json() {
        let kind: NormaliserKind =
            serde_json::from_str(r#"{"kind":"blockwise","block_size":3}"#).unwrap();
        assert_eq!(kind, NormaliserKind::Blockwise { block_size: 3 });
        let global: NormaliserKind = serde_json::from_str(r#"{"kind":"global"}"#).unwrap();
        assert_eq!(global, NormaliserKind::Global);
    }
}
