//! Per-pixel intensity gradients for histogram binning.
//!
//! - Central differences `dx = I(x+1,y) - I(x-1,y)`, `dy = I(x,y+1) - I(x,y-1)`.
//! - Orientation `atan2(dx, -dy)` in whole degrees folded into `[0, 180)`; the
//!   sign of `dy` is flipped because row 0 is the top of the image.
//! - Border pixels have zero magnitude; nothing is extrapolated.
use crate::grid::{Grid, GridView};
use crate::types::Rgb;
use nalgebra::Vector2;

/// Gradient strength and unsigned orientation of one pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GradientVector {
    pub magnitude: f64,
    /// Whole degrees in `[0, 180)`.
    pub angle: u8,
}

/// Rounded greyscale intensity of every pixel.
pub fn greyscale(source: &Grid<Rgb>) -> Grid<f64> {
    source.transform(|c| c.greyscale().round_ties_even())
}

/// Orientation of the change `(dx, dy)` in whole degrees within `[0, 180)`.
pub fn orientation_degrees(dx: f64, dy: f64) -> u8 {
    let mut angle = dx.atan2(-dy).to_degrees().round_ties_even() as i32;
    if angle < 0 {
        angle += 180;
    }
    if angle >= 180 {
        angle -= 180;
    }
    angle as u8
}

pub fn gradient_field(intensity: &Grid<f64>) -> Grid<GradientVector> {
    let (w, h) = (intensity.width(), intensity.height());
    intensity.transform_with(|p, _| {
        if p.x == 0 || p.y == 0 || p.x + 1 >= w || p.y + 1 >= h {
            return GradientVector::default();
        }
        let row = intensity.row(p.y);
        let dx = row[p.x + 1] - row[p.x - 1];
        let dy = intensity.row(p.y + 1)[p.x] - intensity.row(p.y - 1)[p.x];
        GradientVector {
            magnitude: Vector2::new(dx, dy).norm(),
            angle: orientation_degrees(dx, dy),
        }
    })
}
