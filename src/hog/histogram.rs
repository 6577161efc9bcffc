use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub const BIN_COUNT: usize = 9;
pub const BIN_WIDTH_DEG: f64 = 20.0;

/// Centre of bin `index` in degrees: 10, 30, ..., 170.
#[inline]
pub fn bin_centre(index: usize) -> f64 {
    index as f64 * BIN_WIDTH_DEG + BIN_WIDTH_DEG / 2.0
}

/// Nine non-negative gradient magnitudes for 20° orientation bins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHistogram")]
pub struct HistogramOfGradient {
    bins: [f64; BIN_COUNT],
}

/// Unvalidated wire form; deserialisation goes through [`HistogramOfGradient::new`].
#[derive(Deserialize)]
struct RawHistogram {
    bins: [f64; BIN_COUNT],
}

impl TryFrom<RawHistogram> for HistogramOfGradient {
    type Error = Error;

    fn try_from(raw: RawHistogram) -> Result<Self> {
        Self::new(raw.bins)
    }
}

impl HistogramOfGradient {
    /// Rejects negative and NaN magnitudes.
    pub fn new(bins: [f64; BIN_COUNT]) -> Result<Self> {
        if let Some((bin, &value)) = bins
            .iter()
            .enumerate()
            .find(|(_, v)| v.is_nan() || **v < 0.0)
        {
            return Err(Error::InvalidMagnitude { bin, value });
        }
        Ok(Self { bins })
    }

    pub const fn zero() -> Self {
        Self {
            bins: [0.0; BIN_COUNT],
        }
    }

    #[inline]
    pub fn bins(&self) -> &[f64; BIN_COUNT] {
        &self.bins
    }

    pub fn sum(&self) -> f64 {
        self.bins.iter().sum()
    }

    pub fn greatest_magnitude(&self) -> f64 {
        self.bins.iter().copied().fold(0.0, f64::max)
    }

    /// Bins rescaled to sum to one; uniform `1/9` when the histogram is empty.
    pub fn normalised(&self) -> Self {
        let total = self.sum();
        if total == 0.0 {
            return Self {
                bins: [1.0 / BIN_COUNT as f64; BIN_COUNT],
            };
        }
        self.scaled(1.0 / total)
    }

    /// Every bin multiplied by `factor`; negative factors clamp to zero.
    pub fn scaled(&self, factor: f64) -> Self {
        let factor = factor.max(0.0);
        Self {
            bins: self.bins.map(|v| v * factor),
        }
    }

    /// Shift every orientation by 90°, turning gradient directions into edge
    /// directions. Each bin lands halfway between two bins and is split evenly.
    pub fn rotated_90(&self) -> Self {
        let mut bins = [0.0; BIN_COUNT];
        for (i, &v) in self.bins.iter().enumerate() {
            bins[(i + 4) % BIN_COUNT] += 0.5 * v;
            bins[(i + 5) % BIN_COUNT] += 0.5 * v;
        }
        Self { bins }
    }

    /// Split `magnitude` between the two bins nearest `angle` (degrees in
    /// `[0, 180)`), wrapping between the first and last bins.
    pub fn accumulate(&mut self, angle: f64, magnitude: f64) {
        if !magnitude.is_finite() || magnitude <= 0.0 || !angle.is_finite() {
            return;
        }
        let last = BIN_COUNT - 1;
        let half = BIN_WIDTH_DEG / 2.0;
        let (bin0, bin1, fraction0) = if angle <= half {
            (0, last, 0.5 + 0.25 * (angle / BIN_WIDTH_DEG))
        } else if angle >= 180.0 - half {
            (last, 0, 0.5 + 0.25 * ((180.0 - angle) / BIN_WIDTH_DEG))
        } else {
            let position = (angle - half) / BIN_WIDTH_DEG;
            let bin0 = position.floor() as usize;
            let bin1 = position.ceil() as usize;
            (bin0, bin1, (bin_centre(bin1) - angle) / BIN_WIDTH_DEG)
        };
        if bin0 == bin1 {
            self.bins[bin0] += magnitude;
            return;
        }
        self.bins[bin0] += magnitude * fraction0;
        self.bins[bin1] += magnitude * (1.0 - fraction0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn negative_and_nan_bins_are_rejected() {
        let mut bins = [0.0; BIN_COUNT];
        bins[3] = -1.0;
        assert!(matches!(
            HistogramOfGradient::new(bins),
            Err(Error::InvalidMagnitude { bin: 3, .. })
        ));
        bins[3] = f64::NAN;
        assert!(HistogramOfGradient::new(bins).is_err());
    }

    #[test]
    fn deserialising_checks_magnitudes() {
        let negative = r#"{"bins":[-5,0,0,0,0,0,0,0,0]}"#;
        assert!(serde_json::from_str::<HistogramOfGradient>(negative).is_err());

        let mut h = HistogramOfGradient::zero();
        h.accumulate(90.0, 2.0);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(serde_json::from_str::<HistogramOfGradient>(&json).unwrap(), h);
    }

    #[test]
    fn centred_angle_fills_single_bin() {
        let mut h = HistogramOfGradient::zero();
        h.accumulate(90.0, 2.0);
        assert_eq!(h.bins()[4], 2.0);
        assert_eq!(h.sum(), 2.0);
    }

    #[test]
    fn interior_angle_splits_linearly() {
        let mut h = HistogramOfGradient::zero();
        h.accumulate(105.0, 1.0);
        // Between 90 (bin 4) and 110 (bin 5), closer to 110.
        assert!(approx_eq(h.bins()[4], 0.25));
        assert!(approx_eq(h.bins()[5], 0.75));
    }

    #[test]
    fn low_and_high_angles_wrap() {
        let mut low = HistogramOfGradient::zero();
        low.accumulate(0.0, 4.0);
        assert_eq!(low.bins()[0], 2.0);
        assert_eq!(low.bins()[8], 2.0);

        let mut high = HistogramOfGradient::zero();
        high.accumulate(176.0, 1.0);
        assert!(approx_eq(high.bins()[8], 0.5 + 0.25 * (4.0 / 20.0)));
        assert!(approx_eq(high.bins()[0], 1.0 - (0.5 + 0.25 * (4.0 / 20.0))));
    }

    #[test]
    fn normalised_sums_to_one_or_is_uniform() {
        let h = HistogramOfGradient::new([1.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 4.0]).unwrap();
        let n = h.normalised();
        assert!(approx_eq(n.sum(), 1.0));
        assert!(approx_eq(n.bins()[8], 0.5));
        let empty = HistogramOfGradient::zero().normalised();
        assert!(empty.bins().iter().all(|v| approx_eq(*v, 1.0 / 9.0)));
    }

    #[test]
    fn rotation_preserves_mass() {
        let mut bins = [0.0; BIN_COUNT];
        bins[0] = 2.0;
        let r = HistogramOfGradient::new(bins).unwrap().rotated_90();
        // 10° + 90° = 100°, halfway between 90° and 110°.
        assert_eq!(r.bins()[4], 1.0);
        assert_eq!(r.bins()[5], 1.0);
        assert_eq!(r.sum(), 2.0);
    }

    #[test]
    fn greatest_magnitude_and_scaling() {
        let h = HistogramOfGradient::new([1.0, 5.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(h.greatest_magnitude(), 5.0);
        assert!(approx_eq(h.scaled(0.2).greatest_magnitude(), 1.0));
    }
}
