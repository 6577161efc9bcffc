//! Immutable 2D grid with windowed views over a shared backing buffer.
//!
//! A [`Grid`] owns a reference-counted, never-mutated buffer plus a window
//! (`Rect`) into it. Slicing produces another window over the same buffer;
//! every `transform`, `combine` and `block_out` allocates a fresh buffer.
//!
//! - Coordinates are zero-based and relative to the grid's own window.
//! - Enumeration and row access are row-major (`y` outer, `x` inner).
//! - Width and height are always greater than zero.
mod iter;
mod resample;
mod view;

pub use self::iter::Cells;
pub use self::view::{GridView, Rows};

use crate::error::{Error, Result};
use crate::types::{Point, Rect};
use std::fmt;
use std::sync::Arc;

pub struct Grid<T> {
    data: Arc<Vec<T>>,
    stride: usize,
    window: Rect,
}

impl<T> Clone for Grid<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            stride: self.stride,
            window: self.window,
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyGrid { width, height });
    }
    width
        .checked_mul(height)
        .ok_or_else(|| Error::InvalidArgument(format!("{width}x{height} grid is too large")))
}

impl<T: Clone> Grid<T> {
    /// Build a grid from borrowed row-major values. The values are copied so
    /// later changes to the caller's buffer can never leak into the grid.
    pub fn new(width: usize, height: usize, values: &[T]) -> Result<Self> {
        Self::from_vec(width, height, values.to_vec())
    }

    pub fn filled(width: usize, height: usize, value: T) -> Result<Self> {
        let len = check_dimensions(width, height)?;
        Ok(Self::wrap(width, height, vec![value; len]))
    }

    /// Copy the visible window into a row-major `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.width() * self.height());
        for row in self.rows() {
            out.extend_from_slice(row);
        }
        out
    }
}

impl<T> Grid<T> {
    /// Build a grid from owned row-major values without copying them.
    pub fn from_vec(width: usize, height: usize, values: Vec<T>) -> Result<Self> {
        let expected = check_dimensions(width, height)?;
        if values.len() != expected {
            return Err(Error::DataLength {
                width,
                height,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self::wrap(width, height, values))
    }

    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(Point) -> T,
    {
        let len = check_dimensions(width, height)?;
        let mut values = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                values.push(f(Point::new(x, y)));
            }
        }
        Ok(Self::wrap(width, height, values))
    }

    /// Callers guarantee `values.len() == width * height` with both positive.
    fn wrap(width: usize, height: usize, values: Vec<T>) -> Self {
        debug_assert_eq!(values.len(), width * height);
        Self {
            data: Arc::new(values),
            stride: width,
            window: Rect::new(0, 0, width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.window.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.window.height
    }

    /// Full extent of this grid in its own coordinates.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    /// Location of this view inside the backing buffer.
    #[inline]
    pub fn window(&self) -> Rect {
        self.window
    }

    /// True when both grids are views over the same backing buffer.
    pub fn shares_backing<U>(&self, other: &Grid<U>) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.data) as *const u8,
            Arc::as_ptr(&other.data) as *const u8,
        )
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x < self.width() && p.y < self.height()
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (self.window.top + y) * self.stride + self.window.left + x
    }

    /// Bounds-checked access; each axis is validated independently.
    pub fn get(&self, x: usize, y: usize) -> Result<&T> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(&self.data[self.offset(x, y)])
    }

    pub fn at(&self, p: Point) -> Result<&T> {
        self.get(p.x, p.y)
    }

    pub fn transform<U, F>(&self, mut f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        self.transform_with(|_, value| f(value))
    }

    /// Like [`Grid::transform`] but the closure also receives the cell position.
    pub fn transform_with<U, F>(&self, mut f: F) -> Grid<U>
    where
        F: FnMut(Point, &T) -> U,
    {
        let mut values = Vec::with_capacity(self.width() * self.height());
        for (y, row) in self.rows().enumerate() {
            values.extend(row.iter().enumerate().map(|(x, v)| f(Point::new(x, y), v)));
        }
        Grid::wrap(self.width(), self.height(), values)
    }

    pub fn combine<U, V, F>(&self, other: &Grid<U>, mut f: F) -> Result<Grid<V>>
    where
        F: FnMut(&T, &U) -> V,
    {
        self.combine_with(other, |_, a, b| f(a, b))
    }

    /// Cell-wise merge of two equally shaped grids.
    pub fn combine_with<U, V, F>(&self, other: &Grid<U>, mut f: F) -> Result<Grid<V>>
    where
        F: FnMut(Point, &T, &U) -> V,
    {
        if self.width() != other.width() || self.height() != other.height() {
            return Err(Error::ShapeMismatch {
                left_width: self.width(),
                left_height: self.height(),
                right_width: other.width(),
                right_height: other.height(),
            });
        }
        let mut values = Vec::with_capacity(self.width() * self.height());
        for (y, (a, b)) in self.rows().zip(other.rows()).enumerate() {
            values.extend(
                a.iter()
                    .zip(b.iter())
                    .enumerate()
                    .map(|(x, (va, vb))| f(Point::new(x, y), va, vb)),
            );
        }
        Ok(Grid::wrap(self.width(), self.height(), values))
    }

    /// View over `area` (relative to this grid) sharing the same backing buffer.
    pub fn slice(&self, area: Rect) -> Result<Grid<T>> {
        if area.is_empty() {
            return Err(Error::EmptyGrid {
                width: area.width,
                height: area.height,
            });
        }
        if !area.fits_within(self.width(), self.height()) {
            return Err(Error::WindowOutOfBounds {
                window: area,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(Grid {
            data: Arc::clone(&self.data),
            stride: self.stride,
            window: Rect::new(
                self.window.left + area.left,
                self.window.top + area.top,
                area.width,
                area.height,
            ),
        })
    }

    /// Reduce non-overlapping `block_size` squares to one cell each.
    ///
    /// The output is `round(W / block_size) x round(H / block_size)` (ties to
    /// even). Blocks at the right and bottom edges are truncated to the grid.
    pub fn block_out<U, F>(&self, block_size: usize, mut reducer: F) -> Result<Grid<U>>
    where
        F: FnMut(&Grid<T>) -> U,
    {
        let (w, h) = (self.width(), self.height());
        if block_size == 0 || block_size > w || block_size > h {
            return Err(Error::InvalidBlockSize {
                block_size,
                width: w,
                height: h,
            });
        }
        let out_w = (w as f64 / block_size as f64).round_ties_even() as usize;
        let out_h = (h as f64 / block_size as f64).round_ties_even() as usize;
        let mut values = Vec::with_capacity(out_w * out_h);
        for by in 0..out_h {
            let top = by * block_size;
            let bottom = (top + block_size).min(h);
            for bx in 0..out_w {
                let left = bx * block_size;
                let right = (left + block_size).min(w);
                let block = self.slice(Rect::new(left, top, right - left, bottom - top))?;
                values.push(reducer(&block));
            }
        }
        Ok(Grid::wrap(out_w, out_h, values))
    }

    /// Lazily walk every cell in row-major order. Each call starts afresh.
    pub fn enumerate(&self) -> Cells<'_, T> {
        Cells::new(self)
    }

    pub fn enumerate_where<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = (Point, &'a T)> + 'a
    where
        P: FnMut(Point, &T) -> bool + 'a,
    {
        self.enumerate().filter(move |&(p, v)| predicate(p, v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.rows().flatten()
    }

    /// True if any cell inside `area` satisfies `predicate`.
    pub fn any_match<P>(&self, area: Rect, mut predicate: P) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
    {
        if !area.fits_within(self.width(), self.height()) {
            return Err(Error::WindowOutOfBounds {
                window: area,
                width: self.width(),
                height: self.height(),
            });
        }
        for y in area.top..area.bottom() {
            let row = self.row(y);
            if row[area.left..area.right()].iter().any(&mut predicate) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Rectangle reaching `left_up` cells up/left and `right_down` cells
    /// down/right of `p`, clamped to the grid.
    ///
    /// `right_down` must be positive while `left_up` may be zero; block
    /// median filtering anchors its windows at the top-left corner.
    pub fn neighbourhood(&self, p: Point, left_up: usize, right_down: usize) -> Result<Rect> {
        if !self.contains(p) {
            return Err(Error::OutOfBounds {
                x: p.x,
                y: p.y,
                width: self.width(),
                height: self.height(),
            });
        }
        if right_down == 0 {
            return Err(Error::InvalidArgument(
                "neighbourhood must extend at least one cell right and down".to_string(),
            ));
        }
        let min_x = p.x.saturating_sub(left_up);
        let min_y = p.y.saturating_sub(left_up);
        let max_x = (p.x + right_down).min(self.width() - 1);
        let max_y = (p.y + right_down).min(self.height() - 1);
        Ok(Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }
}

impl<T> GridView for Grid<T> {
    type Cell = T;

    #[inline]
    fn width(&self) -> usize {
        self.window.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.window.height
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[T] {
        let start = self.offset(0, y);
        &self.data[start..start + self.window.width]
    }
}

impl<T: PartialEq> PartialEq for Grid<T> {
    /// Compares visible cells only; the backing buffers may differ.
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.rows().zip(other.rows()).all(|(a, b)| a == b)
    }
}

impl<T> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
