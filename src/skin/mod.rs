//! Skin mask construction: strict classification, relaxed growth, then an
//! intensity band against the zero-corrected colour data.
mod filters;
mod mask;

pub use self::filters::{HueBand, SkinPreset, SkinThresholds, RELAXED_BAND};
pub use self::mask::{apply_intensity_band, initial_mask, relax_mask};

use crate::color::HueSaturation;
use crate::error::Result;
use crate::grid::Grid;
use crate::types::Rgb;
use log::debug;

/// Run all three mask stages in order.
pub fn build_skin_mask<S, R>(
    hues: &Grid<HueSaturation>,
    colour: &Grid<Rgb>,
    skin_filter: S,
    relaxed_filter: R,
    relaxed_expansions: usize,
    intensity_band: [f64; 2],
) -> Result<Grid<bool>>
where
    S: Fn(&HueSaturation) -> bool,
    R: Fn(&HueSaturation) -> bool,
{
    let mask = initial_mask(hues, skin_filter);
    debug!("initial skin mask: {} pixels", count_set(&mask));

    let mask = relax_mask(&mask, hues, relaxed_filter, relaxed_expansions)?;
    debug!(
        "relaxed skin mask ({} passes): {} pixels",
        relaxed_expansions,
        count_set(&mask)
    );

    let mask = apply_intensity_band(&mask, colour, intensity_band)?;
    debug!("final skin mask: {} pixels", count_set(&mask));
    Ok(mask)
}

pub fn count_set(mask: &Grid<bool>) -> usize {
    mask.values().filter(|&&v| v).count()
}
