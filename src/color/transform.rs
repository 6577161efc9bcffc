use super::IRgBy;
use crate::grid::Grid;
use crate::types::Rgb;

/// Subtract the smallest channel value found anywhere in the image from
/// every channel, removing a constant sensor black level.
pub fn correct_zero_response(source: &Grid<Rgb>) -> Grid<Rgb> {
    let floor = source.values().map(Rgb::min_channel).min().unwrap_or(0);
    if floor == 0 {
        return source.clone();
    }
    source.transform(|c| Rgb::new(c.r - floor, c.g - floor, c.b - floor))
}

pub fn to_irgby(source: &Grid<Rgb>) -> Grid<IRgBy> {
    source.transform(|c| IRgBy::from_rgb(c.r, c.g, c.b))
}
