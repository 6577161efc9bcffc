use crate::color::HueSaturation;
use crate::error::Result;
use crate::grid::Grid;
use crate::types::Rgb;

pub fn initial_mask<F>(hues: &Grid<HueSaturation>, skin_filter: F) -> Grid<bool>
where
    F: Fn(&HueSaturation) -> bool,
{
    hues.transform(skin_filter)
}

/// Grow `mask` by up to `passes` neighbourhood hops.
///
/// Each pass reads the previous pass's complete mask: an unmasked pixel turns
/// on when `relaxed_filter` accepts it and any pixel of its clamped 3x3
/// neighbourhood was already on.
pub fn relax_mask<F>(
    mask: &Grid<bool>,
    hues: &Grid<HueSaturation>,
    relaxed_filter: F,
    passes: usize,
) -> Result<Grid<bool>>
where
    F: Fn(&HueSaturation) -> bool,
{
    let mut current = mask.clone();
    for _ in 0..passes {
        let previous = current;
        let grown = previous.combine_with(hues, |p, &on, colour| -> Result<bool> {
            if on {
                return Ok(true);
            }
            if !relaxed_filter(colour) {
                return Ok(false);
            }
            let around = previous.neighbourhood(p, 1, 1)?;
            previous.any_match(around, |&v| v)
        })?;
        current = collect_mask(&grown)?;
    }
    Ok(current)
}

fn collect_mask(cells: &Grid<Result<bool>>) -> Result<Grid<bool>> {
    let values = cells.values().cloned().collect::<Result<Vec<bool>>>()?;
    Grid::from_vec(cells.width(), cells.height(), values)
}

/// Keep only mask pixels whose greyscale intensity lies within `band`
/// (inclusive), suppressing near-black and near-white matches.
pub fn apply_intensity_band(
    mask: &Grid<bool>,
    colour: &Grid<Rgb>,
    band: [f64; 2],
) -> Result<Grid<bool>> {
    colour.combine(mask, |c, &on| {
        if !on {
            return false;
        }
        let intensity = c.greyscale();
        intensity >= band[0] && intensity <= band[1]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn hue(h: f64) -> HueSaturation {
        HueSaturation::new(h, 20.0, 0.0)
    }

    #[test]
    fn relaxation_spreads_one_hop_per_pass() {
        // A single seed at the left of a row of relaxed-acceptable pixels.
        let hues = Grid::filled(6, 1, hue(130.0)).unwrap();
        let seed = Grid::from_fn(6, 1, |p| p.x == 0).unwrap();
        let relaxed = |c: &HueSaturation| c.hue >= 110.0;

        let one = relax_mask(&seed, &hues, relaxed, 1).unwrap();
        assert_eq!(one.to_vec(), vec![true, true, false, false, false, false]);
        let three = relax_mask(&seed, &hues, relaxed, 3).unwrap();
        assert_eq!(three.to_vec(), vec![true, true, true, true, false, false]);
    }

    #[test]
    fn relaxation_stops_at_rejected_pixels() {
        let hues = Grid::from_fn(5, 1, |p| if p.x == 2 { hue(20.0) } else { hue(130.0) }).unwrap();
        let seed = Grid::from_fn(5, 1, |p| p.x == 0).unwrap();
        let grown = relax_mask(&seed, &hues, |c| c.hue >= 110.0, 5).unwrap();
        assert_eq!(grown.to_vec(), vec![true, true, false, false, false]);
    }

    #[test]
    fn relaxation_uses_diagonal_neighbours() {
        let hues = Grid::filled(3, 3, hue(130.0)).unwrap();
        let seed = Grid::from_fn(3, 3, |p| p == Point::new(0, 0)).unwrap();
        let grown = relax_mask(&seed, &hues, |_| true, 1).unwrap();
        assert!(*grown.get(1, 1).unwrap());
        assert!(!*grown.get(2, 2).unwrap());
    }

    #[test]
    fn intensity_band_drops_dark_and_bright_pixels() {
        let colour = Grid::new(
            3,
            1,
            &[Rgb::new(20, 20, 20), Rgb::new(150, 150, 150), Rgb::new(250, 250, 250)],
        )
        .unwrap();
        let mask = Grid::filled(3, 1, true).unwrap();
        let banded = apply_intensity_band(&mask, &colour, [90.0, 240.0]).unwrap();
        assert_eq!(banded.to_vec(), vec![false, true, false]);
    }
}
