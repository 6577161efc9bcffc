use crate::error::{Error, Result};
use crate::grid::{Grid, GridView};
use crate::types::{Point, Rect};

const NEIGH_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 4-connected flood fill over a boolean mask, confined to `limit`.
///
/// Traversal uses an explicit stack. The visited set is owned by the filler
/// and persists across `fill` calls, so repeated fills from unvisited seeds
/// partition `limit` into connected components without touching the mask.
pub struct FloodFill<'a> {
    mask: &'a Grid<bool>,
    limit: Rect,
    visited: Vec<u8>,
    stack: Vec<usize>,
}

impl<'a> FloodFill<'a> {
    pub fn new(mask: &'a Grid<bool>, limit: Rect) -> Result<Self> {
        if limit.is_empty() || !limit.fits_within(mask.width(), mask.height()) {
            return Err(Error::WindowOutOfBounds {
                window: limit,
                width: mask.width(),
                height: mask.height(),
            });
        }
        Ok(Self {
            mask,
            limit,
            visited: vec![0u8; limit.area()],
            stack: Vec::with_capacity(64),
        })
    }

    #[inline]
    fn local_index(&self, p: Point) -> usize {
        (p.y - self.limit.top) * self.limit.width + (p.x - self.limit.left)
    }

    #[inline]
    fn point_at(&self, idx: usize) -> Point {
        Point::new(
            self.limit.left + idx % self.limit.width,
            self.limit.top + idx / self.limit.width,
        )
    }

    pub fn is_visited(&self, p: Point) -> bool {
        self.limit.contains(p) && self.visited[self.local_index(p)] != 0
    }

    /// Collect the component containing `start` (cells equal to the mask value
    /// at `start`). Returns an empty list when `start` was already visited.
    pub fn fill(&mut self, start: Point) -> Result<Vec<Point>> {
        if !self.limit.contains(start) {
            return Err(Error::OutOfBounds {
                x: start.x,
                y: start.y,
                width: self.mask.width(),
                height: self.mask.height(),
            });
        }
        let seed = self.local_index(start);
        if self.visited[seed] != 0 {
            return Ok(Vec::new());
        }
        let target = *self.mask.at(start)?;

        let mut component = Vec::new();
        self.stack.clear();
        self.visited[seed] = 1;
        self.stack.push(seed);
        while let Some(idx) = self.stack.pop() {
            let p = self.point_at(idx);
            component.push(p);
            for (dx, dy) in NEIGH_OFFSETS {
                let nx = p.x as isize + dx;
                let ny = p.y as isize + dy;
                if nx < self.limit.left as isize
                    || ny < self.limit.top as isize
                    || nx >= self.limit.right() as isize
                    || ny >= self.limit.bottom() as isize
                {
                    continue;
                }
                let q = Point::new(nx as usize, ny as usize);
                let q_idx = self.local_index(q);
                if self.visited[q_idx] != 0 || self.mask.row(q.y)[q.x] != target {
                    continue;
                }
                self.visited[q_idx] = 1;
                self.stack.push(q_idx);
            }
        }
        Ok(component)
    }
}

/// Smallest rectangle covering every point; `None` for an empty set.
pub fn bounding_rect(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(rows: &[&str]) -> Grid<bool> {
        let h = rows.len();
        let w = rows[0].len();
        let cells: Vec<bool> = rows.iter().flat_map(|r| r.chars().map(|c| c == '#')).collect();
        Grid::from_vec(w, h, cells).unwrap()
    }

    #[test]
    fn fill_is_four_connected() {
        let mask = mask_from(&["#..", ".#.", "..#"]);
        let mut fill = FloodFill::new(&mask, mask.bounds()).unwrap();
        let first = fill.fill(Point::new(0, 0)).unwrap();
        assert_eq!(first, vec![Point::new(0, 0)]);
        // The diagonal splits the background into two components.
        let upper = fill.fill(Point::new(1, 0)).unwrap();
        assert_eq!(upper.len(), 3);
        assert!(fill.fill(Point::new(2, 1)).unwrap().is_empty());
        let lower = fill.fill(Point::new(0, 2)).unwrap();
        assert_eq!(lower.len(), 3);
        assert!(!fill.is_visited(Point::new(1, 1)));
    }

    #[test]
    fn fill_stays_inside_limit() {
        let mask = mask_from(&["....", "....", "...."]);
        let limit = Rect::new(1, 1, 2, 2);
        let mut fill = FloodFill::new(&mask, limit).unwrap();
        let got = fill.fill(Point::new(1, 1)).unwrap();
        assert_eq!(got.len(), 4);
        assert!(got.iter().all(|p| limit.contains(*p)));
        assert!(fill.fill(Point::new(0, 0)).is_err());
    }

    #[test]
    fn large_component_does_not_recurse() {
        let mask = Grid::filled(400, 400, true).unwrap();
        let mut fill = FloodFill::new(&mask, mask.bounds()).unwrap();
        assert_eq!(fill.fill(Point::new(200, 200)).unwrap().len(), 160_000);
    }

    #[test]
    fn bounding_rect_covers_points() {
        let pts = [Point::new(3, 4), Point::new(1, 6), Point::new(2, 5)];
        assert_eq!(bounding_rect(&pts), Some(Rect::new(1, 4, 3, 3)));
        assert_eq!(bounding_rect(&[]), None);
    }
}
