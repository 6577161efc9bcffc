use super::{check_dimensions, Grid, GridView};
use crate::error::Result;
use crate::types::Rgb;

impl Grid<Rgb> {
    /// Bilinear resize to `width x height` using pixel-centre alignment.
    ///
    /// Samples outside the source are clamped to the nearest edge pixel.
    pub fn resize_bilinear(&self, width: usize, height: usize) -> Result<Grid<Rgb>> {
        check_dimensions(width, height)?;
        if width == self.width() && height == self.height() {
            return Ok(self.clone());
        }
        let sx = self.width() as f64 / width as f64;
        let sy = self.height() as f64 / height as f64;
        let max_x = (self.width() - 1) as f64;
        let max_y = (self.height() - 1) as f64;
        Grid::from_fn(width, height, |p| {
            let fx = ((p.x as f64 + 0.5) * sx - 0.5).clamp(0.0, max_x);
            let fy = ((p.y as f64 + 0.5) * sy - 0.5).clamp(0.0, max_y);
            sample_bilinear(self, fx, fy)
        })
    }
}

#[inline]
fn sample_bilinear(grid: &Grid<Rgb>, x: f64, y: f64) -> Rgb {
    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(grid.width() - 1);
    let y1 = (y0 + 1).min(grid.height() - 1);
    let tx = x - x0 as f64;
    let ty = y - y0 as f64;

    let top = grid.row(y0);
    let bottom = grid.row(y1);
    let mix = |channel: fn(&Rgb) -> u8| -> u8 {
        let upper = channel(&top[x0]) as f64 * (1.0 - tx) + channel(&top[x1]) as f64 * tx;
        let lower = channel(&bottom[x0]) as f64 * (1.0 - tx) + channel(&bottom[x1]) as f64 * tx;
        (upper * (1.0 - ty) + lower * ty).round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(mix(|c| c.r), mix(|c| c.g), mix(|c| c.b))
}
