//! File-format boundary backed by the `image` crate.
//!
//! The detection and HOG code only ever sees [`Grid`](crate::Grid) values;
//! decoding and encoding live here so the core stays format agnostic.
pub mod io;

pub use self::io::{
    grid_from_rgb_image, load_rgb_image, read_json_file, save_mask_png, save_regions_png,
    write_json_file,
};
