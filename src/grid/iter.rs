use super::{Grid, GridView};
use crate::types::Point;

/// Row-major walk over the visible cells of a grid: `y` outer, `x` inner.
///
/// Points are relative to the grid's own window, so a slice enumerates from
/// `(0, 0)` regardless of where it sits in the backing buffer.
pub struct Cells<'a, T> {
    grid: &'a Grid<T>,
    x: usize,
    y: usize,
}

impl<'a, T> Cells<'a, T> {
    pub(super) fn new(grid: &'a Grid<T>) -> Self {
        Self { grid, x: 0, y: 0 }
    }
}

impl<'a, T> Iterator for Cells<'a, T> {
    type Item = (Point, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.grid.height() {
            return None;
        }
        let point = Point::new(self.x, self.y);
        let value = &self.grid.row(self.y)[self.x];
        self.x += 1;
        if self.x == self.grid.width() {
            self.x = 0;
            self.y += 1;
        }
        Some((point, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.grid.width() * self.grid.height();
        let done = self.y * self.grid.width() + self.x;
        let left = total.saturating_sub(done);
        (left, Some(left))
    }
}

impl<'a, T> ExactSizeIterator for Cells<'a, T> {}
