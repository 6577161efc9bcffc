//! Error type shared by every stage of the detection and feature pipeline.
//!
//! Only invalid arguments are errors. Degenerate numeric cases (a histogram
//! field with no gradient energy) are handled where they occur, and an image
//! without candidate regions is a successful, empty result.

use crate::types::Rect;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("backing data holds {actual} values but {width}x{height} requires {expected}")]
    DataLength {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("point ({x}, {y}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("window {window:?} does not fit inside {width}x{height} grid")]
    WindowOutOfBounds {
        window: Rect,
        width: usize,
        height: usize,
    },

    #[error("grid shapes differ: {left_width}x{left_height} vs {right_width}x{right_height}")]
    ShapeMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },

    #[error("block size {block_size} is invalid for {width}x{height} grid")]
    InvalidBlockSize {
        block_size: usize,
        width: usize,
        height: usize,
    },

    #[error("histogram bin {bin} has invalid magnitude {value}")]
    InvalidMagnitude { bin: usize, value: f64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
