use super::flood::{bounding_rect, FloodFill};
use crate::error::Result;
use crate::grid::Grid;
use crate::types::{Point, Rect};
use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Connected set of masked pixels with its bounding rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct SkinObject {
    pub points: Vec<Point>,
    pub bounds: Rect,
}

impl SkinObject {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Result of scanning a skin mask for face candidates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    /// Number of connected skin objects before size filtering.
    pub total_objects: usize,
    /// Objects large enough to be searched for holes.
    pub objects: Vec<SkinObject>,
    /// Bounding rectangles of objects with an enclosed hole, in object order.
    pub candidates: Vec<Rect>,
}

/// Partition the masked pixels into 4-connected objects, seeded in row-major
/// order.
pub fn skin_objects(mask: &Grid<bool>) -> Result<Vec<SkinObject>> {
    let mut fill = FloodFill::new(mask, mask.bounds())?;
    let mut objects = Vec::new();
    for (p, &on) in mask.enumerate() {
        if !on || fill.is_visited(p) {
            continue;
        }
        let points = fill.fill(p)?;
        if let Some(bounds) = bounding_rect(&points) {
            objects.push(SkinObject { points, bounds });
        }
    }
    Ok(objects)
}

/// First unmasked component inside `object.bounds` that never touches the
/// bounding rectangle's edge and has more than `min_hole_exclusive` pixels.
pub fn find_enclosed_hole(
    mask: &Grid<bool>,
    object: &SkinObject,
    min_hole_exclusive: usize,
) -> Result<Option<Vec<Point>>> {
    let bounds = object.bounds;
    let mut fill = FloodFill::new(mask, bounds)?;
    let area = mask.slice(bounds)?;
    for (local, &on) in area.enumerate() {
        let p = Point::new(bounds.left + local.x, bounds.top + local.y);
        if on || fill.is_visited(p) {
            continue;
        }
        let hole = fill.fill(p)?;
        if hole.iter().any(|q| bounds.on_edge(*q)) {
            continue;
        }
        if hole.len() <= min_hole_exclusive {
            continue;
        }
        return Ok(Some(hole));
    }
    Ok(None)
}

fn candidate_for(mask: &Grid<bool>, object: &SkinObject, scale: usize) -> Result<Option<Rect>> {
    Ok(find_enclosed_hole(mask, object, scale)?.map(|_| object.bounds))
}

/// Emit one candidate rectangle per sufficiently large skin object that
/// encloses a hole.
///
/// Objects with fewer than `min_object_pixels` pixels are dropped; holes must
/// hold more than `scale` pixels.
pub fn extract_candidates(
    mask: &Grid<bool>,
    scale: usize,
    min_object_pixels: usize,
) -> Result<Extraction> {
    let mut objects = skin_objects(mask)?;
    let total_objects = objects.len();
    objects.retain(|o| o.len() >= min_object_pixels);
    debug!(
        "skin objects: {} found, {} with at least {} pixels",
        total_objects,
        objects.len(),
        min_object_pixels
    );

    #[cfg(feature = "parallel")]
    let found: Vec<Option<Rect>> = objects
        .par_iter()
        .map(|o| candidate_for(mask, o, scale))
        .collect::<Result<_>>()?;
    #[cfg(not(feature = "parallel"))]
    let found: Vec<Option<Rect>> = objects
        .iter()
        .map(|o| candidate_for(mask, o, scale))
        .collect::<Result<_>>()?;

    let candidates: Vec<Rect> = found.into_iter().flatten().collect();
    debug!("candidate regions with enclosed holes: {}", candidates.len());
    Ok(Extraction {
        total_objects,
        objects,
        candidates,
    })
}
