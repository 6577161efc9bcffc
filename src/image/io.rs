//! I/O helpers for RGB photos, masks and JSON.
//!
//! - `load_rgb_image`: decode a PNG/JPEG/etc. into a `Grid<Rgb>`.
//! - `save_mask_png`: write a skin mask as a black/white PNG.
//! - `save_regions_png`: write the photo with region outlines drawn on top.
//! - `write_json_file` / `read_json_file`: pretty JSON to and from disk.
use crate::grid::{Grid, GridView};
use crate::types::{Rect, Rgb};
use image::{DynamicImage, GrayImage, ImageBuffer, RgbImage};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Convert a decoded `image` buffer into an owned grid.
pub fn grid_from_rgb_image(image: &RgbImage) -> Result<Grid<Rgb>, String> {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let pixels: Vec<Rgb> = image.pixels().map(|p| Rgb::from(p.0)).collect();
    Grid::from_vec(width, height, pixels).map_err(|e| format!("Invalid image: {e}"))
}

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<Grid<Rgb>, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    grid_from_rgb_image(&img)
}

/// Save a mask as a grayscale PNG: set cells white, others black.
pub fn save_mask_png(mask: &Grid<bool>, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut data = Vec::with_capacity(mask.width() * mask.height());
    for row in mask.rows() {
        data.extend(row.iter().map(|&on| if on { 255u8 } else { 0 }));
    }
    let image: GrayImage = ImageBuffer::from_raw(mask.width() as u32, mask.height() as u32, data)
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    DynamicImage::ImageLuma8(image)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save `image` as PNG with a one-pixel outline around every region.
pub fn save_regions_png(
    image: &Grid<Rgb>,
    regions: &[Rect],
    colour: Rgb,
    path: &Path,
) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = RgbImage::new(image.width() as u32, image.height() as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, px) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, image::Rgb([px.r, px.g, px.b]));
        }
    }
    let stroke = image::Rgb([colour.r, colour.g, colour.b]);
    for region in regions {
        if region.is_empty() || !region.fits_within(image.width(), image.height()) {
            continue;
        }
        let (right, bottom) = (region.right() - 1, region.bottom() - 1);
        for x in region.left..region.right() {
            out.put_pixel(x as u32, region.top as u32, stroke);
            out.put_pixel(x as u32, bottom as u32, stroke);
        }
        for y in region.top..region.bottom() {
            out.put_pixel(region.left as u32, y as u32, stroke);
            out.put_pixel(right as u32, y as u32, stroke);
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
