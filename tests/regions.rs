mod common;

use common::synthetic_image::disc_with_hole_mask;
use face_regions::regions::{
    aspect_ratio_filter, expand_region, extract_candidates, filter_regions, RegionFilterOptions,
};
use face_regions::{Grid, Rect, RegionProposer, Rgb, SlidingWindowProposer};

#[test]
fn disc_with_interior_hole_yields_its_bounding_box() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mask = disc_with_hole_mask(60, 60, (30, 30), 25, 8);
    let found = extract_candidates(&mask, 1, 64).unwrap();
    assert_eq!(found.total_objects, 1);
    assert_eq!(found.candidates, vec![Rect::new(5, 5, 51, 51)]);
}

#[test]
fn hole_reaching_the_bounding_box_edge_is_not_enclosed() {
    let disc = disc_with_hole_mask(60, 60, (30, 30), 25, 8);
    // Cut a channel from the hole down through the bottom of the disc.
    let mask = disc.transform_with(|p, &on| on && !((28..=32).contains(&p.x) && p.y >= 30));
    let found = extract_candidates(&mask, 1, 64).unwrap();
    assert_eq!(found.total_objects, 1);
    assert!(found.candidates.is_empty());
}

#[test]
fn small_objects_and_tiny_holes_are_ignored() {
    // Ring around a single unmasked pixel: the hole is not larger than scale 1.
    let pinhole = Grid::from_fn(20, 20, |p| !(p.x == 10 && p.y == 10)).unwrap();
    assert!(extract_candidates(&pinhole, 1, 64)
        .unwrap()
        .candidates
        .is_empty());

    // Same disc as above, but objects must hold more pixels than it has.
    let mask = disc_with_hole_mask(60, 60, (30, 30), 25, 8);
    let found = extract_candidates(&mask, 1, 10_000).unwrap();
    assert_eq!(found.total_objects, 1);
    assert!(found.objects.is_empty());
    assert!(found.candidates.is_empty());
}

#[test]
fn two_faces_are_reported_in_row_major_order() {
    let left = disc_with_hole_mask(120, 60, (30, 35), 20, 6);
    let right = disc_with_hole_mask(120, 60, (90, 25), 20, 6);
    let mask = left.combine(&right, |a, b| *a || *b).unwrap();
    let found = extract_candidates(&mask, 1, 64).unwrap();
    assert_eq!(
        found.candidates,
        vec![Rect::new(70, 5, 41, 41), Rect::new(10, 15, 41, 41)]
    );
}

#[test]
fn aspect_ratio_three_to_one_is_rejected_two_to_one_kept() {
    let regions = [Rect::new(0, 0, 90, 30), Rect::new(0, 0, 60, 30)];
    assert_eq!(aspect_ratio_filter(&regions, 2.4).unwrap(), vec![Rect::new(0, 0, 60, 30)]);
}

#[test]
fn small_region_inside_a_large_one_is_subsumed() {
    let big = Rect::new(0, 0, 100, 100);
    let inner = Rect::new(10, 10, 30, 30);
    let apart = Rect::new(150, 0, 30, 30);
    let kept = filter_regions(&[inner, big, apart], &RegionFilterOptions::default()).unwrap();
    assert_eq!(kept, vec![big, apart]);
}

#[test]
fn expansion_never_leaves_the_image() {
    let (w, h) = (64, 48);
    let corners = [
        Rect::new(0, 0, 10, 10),
        Rect::new(54, 0, 10, 10),
        Rect::new(0, 38, 10, 10),
        Rect::new(54, 38, 10, 10),
        Rect::new(0, 0, 64, 48),
    ];
    for r in corners {
        let grown = expand_region(r, 0.5, w, h).unwrap();
        assert!(grown.fits_within(w, h), "{grown:?} escaped the image");
        assert!(grown.area() >= r.area());
    }
    assert_eq!(
        expand_region(Rect::new(0, 0, 10, 10), 0.5, w, h).unwrap(),
        Rect::new(0, 0, 15, 15)
    );
}

#[test]
fn sliding_windows_cover_the_image() {
    let image = Grid::filled(120, 90, Rgb::new(1, 1, 1)).unwrap();
    let proposer = SlidingWindowProposer::default();
    assert_eq!(proposer.window_sizes(120, 90), vec![15, 20, 30, 40]);
    let windows = proposer.propose(&image).unwrap();
    assert!(!windows.is_empty());
    assert!(windows.iter().all(|r| r.fits_within(120, 90)));
    assert_eq!(windows[0], Rect::new(0, 0, 15, 15));
}
