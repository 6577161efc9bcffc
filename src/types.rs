use serde::{Deserialize, Serialize};

/// Luma weights used wherever a colour is collapsed to a single intensity.
pub const GREYSCALE_WEIGHTS: [f64; 3] = [0.2989, 0.5870, 0.1140];

/// Zero-based pixel coordinate; `x` grows rightwards, `y` grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in pixel units. `right`/`bottom` are exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub const fn new(left: usize, top: usize, width: usize, height: usize) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Build from edges; `None` when `right < left` or `bottom < top`.
    pub fn from_ltrb(left: usize, top: usize, right: usize, bottom: usize) -> Option<Self> {
        if right < left || bottom < top {
            return None;
        }
        Some(Self::new(left, top, right - left, bottom - top))
    }

    #[inline]
    pub const fn right(&self) -> usize {
        self.left + self.width
    }

    #[inline]
    pub const fn bottom(&self) -> usize {
        self.top + self.height
    }

    #[inline]
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right() && p.y >= self.top && p.y < self.bottom()
    }

    /// True when `p` lies on the outermost ring of pixels of this rectangle.
    #[inline]
    pub fn on_edge(&self, p: Point) -> bool {
        p.x == self.left
            || p.y == self.top
            || p.x + 1 == self.right()
            || p.y + 1 == self.bottom()
    }

    /// True when the rectangle lies entirely inside a `width x height` area.
    #[inline]
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.left.checked_add(self.width).is_some_and(|r| r <= width)
            && self.top.checked_add(self.height).is_some_and(|b| b <= height)
    }

    /// Overlapping region of two rectangles, `None` when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Ratio of the longer side to the shorter one; infinite for empty rectangles.
    pub fn aspect_ratio(&self) -> f64 {
        let long = self.width.max(self.height) as f64;
        let short = self.width.min(self.height) as f64;
        if short == 0.0 {
            f64::INFINITY
        } else {
            long / short
        }
    }
}

/// 8-bit per channel colour sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Weighted luma in `[0, 255]`, unrounded.
    #[inline]
    pub fn greyscale(&self) -> f64 {
        GREYSCALE_WEIGHTS[0] * self.r as f64
            + GREYSCALE_WEIGHTS[1] * self.g as f64
            + GREYSCALE_WEIGHTS[2] * self.b as f64
    }

    #[inline]
    pub fn min_channel(&self) -> u8 {
        self.r.min(self.g).min(self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(value: [u8; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}
