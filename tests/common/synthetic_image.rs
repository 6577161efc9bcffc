use face_regions::{Grid, Rect, Rgb};

/// Skin tone that passes every skin preset on a flat patch.
pub const SKIN: Rgb = Rgb::new(200, 150, 120);
/// Dark blue, below the intensity band so it never joins the mask.
pub const BACKGROUND: Rgb = Rgb::new(20, 40, 90);
/// Eyes and mouth; also pins the zero-response floor at 0.
pub const FEATURE: Rgb = Rgb::new(0, 0, 0);

/// Intensity grid `f(x, y)`.
pub fn ramp<F>(width: usize, height: usize, f: F) -> Grid<f64>
where
    F: Fn(usize, usize) -> f64,
{
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    Grid::from_fn(width, height, |p| f(p.x, p.y)).unwrap()
}

/// Filled disc of `outer` radius centred on `(cx, cy)` with an unmasked disc
/// of `inner` radius at the same centre.
pub fn disc_with_hole_mask(
    width: usize,
    height: usize,
    centre: (usize, usize),
    outer: usize,
    inner: usize,
) -> Grid<bool> {
    let (cx, cy) = (centre.0 as i64, centre.1 as i64);
    Grid::from_fn(width, height, |p| {
        let dx = p.x as i64 - cx;
        let dy = p.y as i64 - cy;
        let d2 = dx * dx + dy * dy;
        d2 <= (outer * outer) as i64 && d2 > (inner * inner) as i64
    })
    .unwrap()
}

/// Eye and mouth rectangles of [`face_photo`].
#[derive(Clone, Copy, Debug)]
pub struct FaceLayout {
    pub eyes: [Rect; 2],
    pub mouth: Rect,
}

pub fn face_layout(width: usize, height: usize) -> FaceLayout {
    let ex = (width as f64 * 0.37) as usize;
    let ey = (height as f64 * 0.4) as usize;
    let mx = (width as f64 * 0.44) as usize;
    let my = (height as f64 * 0.62) as usize;
    FaceLayout {
        eyes: [
            Rect::new(ex, ey, 6, 5),
            Rect::new(width - ex - 6, ey, 6, 5),
        ],
        mouth: Rect::new(mx, my, (width as f64 * 0.12) as usize, 4),
    }
}

/// Flat skin-coloured ellipse on a dark background with black eyes and
/// mouth, which leave enclosed holes in the skin mask.
pub fn face_photo(width: usize, height: usize) -> Grid<Rgb> {
    let layout = face_layout(width, height);
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let (rx, ry) = (width as f64 * 0.28, height as f64 * 0.3);
    Grid::from_fn(width, height, |p| {
        if layout.eyes.iter().any(|e| e.contains(p)) || layout.mouth.contains(p) {
            return FEATURE;
        }
        let nx = (p.x as f64 + 0.5 - cx) / rx;
        let ny = (p.y as f64 + 0.5 - cy) / ry;
        if nx * nx + ny * ny <= 1.0 {
            SKIN
        } else {
            BACKGROUND
        }
    })
    .unwrap()
}

/// Same ellipse without eyes or mouth; the skin mask has no holes.
pub fn blank_face_photo(width: usize, height: usize) -> Grid<Rgb> {
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let (rx, ry) = (width as f64 * 0.28, height as f64 * 0.3);
    Grid::from_fn(width, height, |p| {
        let nx = (p.x as f64 + 0.5 - cx) / rx;
        let ny = (p.y as f64 + 0.5 - cy) / ry;
        if p.x == 0 && p.y == 0 {
            FEATURE
        } else if nx * nx + ny * ny <= 1.0 {
            SKIN
        } else {
            BACKGROUND
        }
    })
    .unwrap()
}
