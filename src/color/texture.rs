use super::{median_filter, HueSaturation, IRgBy};
use crate::error::Result;
use crate::grid::Grid;

/// Smoothed magnitude of local intensity fluctuation.
///
/// `|I - median(I, first_radius)|`, smoothed again with `second_radius`.
pub fn texture_amplitude(
    values: &Grid<IRgBy>,
    first_radius: usize,
    second_radius: usize,
) -> Result<Grid<f64>> {
    let smoothed = median_filter(values, |v| v.i, first_radius)?;
    let difference = values.combine(&smoothed, |v, s| (v.i - s).abs())?;
    median_filter(&difference, |v| *v, second_radius)
}

/// Median-smooth the opponent channels independently, then derive hue and
/// saturation and attach the texture amplitude of the same pixel.
pub fn smoothed_hues(
    values: &Grid<IRgBy>,
    texture: &Grid<f64>,
    radius: usize,
) -> Result<Grid<HueSaturation>> {
    let rg = median_filter(values, |v| v.rg, radius)?;
    let by = median_filter(values, |v| v.by, radius)?;
    rg.combine(&by, |&rg, &by| (rg, by))?
        .combine(texture, |&(rg, by), &t| HueSaturation::from_opponents(rg, by, t))
}
