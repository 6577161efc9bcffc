/// Row-oriented read access shared by every grid in the crate.
///
/// A row slice always covers the visible window only; `stride` is the distance
/// between consecutive rows in the backing buffer.
pub trait GridView {
    type Cell;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Cell];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { grid: self, y: 0 }
    }

    fn is_contiguous(&self) -> bool {
        self.stride() == self.width()
    }
}

pub struct Rows<'a, G: ?Sized + GridView> {
    grid: &'a G,
    y: usize,
}

impl<'a, G: GridView> Iterator for Rows<'a, G> {
    type Item = &'a [G::Cell];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.grid.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.grid.row(y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.grid.height().saturating_sub(self.y);
        (left, Some(left))
    }
}

impl<'a, G: GridView> ExactSizeIterator for Rows<'a, G> {}
