//! Blob metrics regression test

use blobscan_color::{threshold_global, threshold_mean};
use blobscan_core::{Box, PixMut};
use blobscan_morph::close;
use blobscan_region::{analyze_blobs, blob_info, filter_by_area, largest_blob, label_blobs};
use blobscan_test::{RegParams, binary_from_rows, count_foreground, gray_from_fn};

#[test]
fn blob_reg() {
    let mut rp = RegParams::new("blob");

    // Single pixel in the middle of a 7x7 image
    let mut pix = PixMut::new(7, 7, 1, 255).unwrap();
    pix.set_pixel(3, 3, 255).unwrap();
    let labeling = analyze_blobs(&pix.into()).unwrap();
    rp.compare_values(1.0, labeling.count() as f64, 0.0);
    let blob = labeling.blobs()[0];
    rp.compare_values(1.0, blob.area as f64, 0.0);
    rp.compare_values(1.0, blob.perimeter as f64, 0.0);
    rp.compare_values(1.0, (blob.bounds() == Box::new_unchecked(3, 3, 1, 1)) as u8 as f64, 0.0);
    rp.compare_values(1.0, (blob.centroid() == (3, 3)) as u8 as f64, 0.0);

    // Two 2x2 squares on a 9x9 image
    let squares = binary_from_rows(&[
        ".........",
        ".##......",
        ".##......",
        ".........",
        ".........",
        ".........",
        "......##.",
        "......##.",
        ".........",
    ]);
    let labeling = analyze_blobs(&squares).unwrap();
    rp.compare_values(2.0, labeling.count() as f64, 0.0);
    let expected = [(1u8, 1, 1), (2, 6, 6)];
    for (blob, (label, x, y)) in labeling.blobs().iter().zip(expected) {
        rp.compare_values(label as f64, blob.label as f64, 0.0);
        rp.compare_values(4.0, blob.area as f64, 0.0);
        rp.compare_values(4.0, blob.perimeter as f64, 0.0);
        rp.compare_values(1.0, (blob.bounds() == Box::new_unchecked(x, y, 2, 2)) as u8 as f64, 0.0);
        rp.compare_values(1.0, (blob.centroid() == (x, y)) as u8 as f64, 0.0);
    }

    assert!(rp.cleanup(), "blob regression test failed");
}

#[test]
fn blob_area_reg() {
    let mut rp = RegParams::new("blob_area");

    // Dark disks on a bright background, thresholded by the mean
    let centers = [(12i32, 10i32, 5i32), (35, 14, 7), (20, 30, 4)];
    let scene = gray_from_fn(48, 40, |x, y| {
        let inside = centers.iter().any(|&(cx, cy, r)| {
            let (dx, dy) = (x as i32 - cx, y as i32 - cy);
            dx * dx + dy * dy <= r * r
        });
        if inside { 200 } else { 30 }
    });
    let binary = threshold_mean(&scene).unwrap();
    let labeling = analyze_blobs(&binary).unwrap();
    rp.compare_values(3.0, labeling.count() as f64, 0.0);

    // Areas add up to the foreground, which never touches the border
    let total: u32 = labeling.blobs().iter().map(|b| b.area).sum();
    rp.compare_values(count_foreground(&binary) as f64, total as f64, 0.0);

    // Every centroid is its disk's centre
    for (blob, &(cx, cy, _)) in labeling.blobs().iter().zip(centers.iter()) {
        rp.compare_values(1.0, (blob.centroid() == (cx, cy)) as u8 as f64, 0.0);
    }

    let largest = largest_blob(labeling.blobs()).unwrap();
    rp.compare_values(1.0, (largest.centroid() == (35, 14)) as u8 as f64, 0.0);
    let small = filter_by_area(labeling.blobs(), 1, 100).unwrap();
    rp.compare_values(2.0, small.len() as f64, 0.0);

    assert!(rp.cleanup(), "blob area regression test failed");
}

#[test]
fn blob_pipeline_reg() {
    let mut rp = RegParams::new("blob_pipeline");

    // A one-pixel-wide ring is all boundary
    let ring = binary_from_rows(&[
        "..........",
        ".#######..",
        ".#.....#..",
        ".#.....#..",
        ".#.....#..",
        ".###.###..",
        "..........",
    ]);
    let open_ring = analyze_blobs(&ring).unwrap();
    rp.compare_values(1.0, open_ring.count() as f64, 0.0);
    let ring_blob = open_ring.blobs()[0];
    let ring_box = ring_blob.bounds() == Box::new_unchecked(1, 1, 7, 5);
    rp.compare_values(1.0, ring_box as u8 as f64, 0.0);
    rp.compare_values(ring_blob.area as f64, ring_blob.perimeter as f64, 0.0);

    // Closing bridges the gap between two squares
    let gapped = binary_from_rows(&[
        "..........",
        ".###.###..",
        ".###.###..",
        ".###.###..",
        "..........",
    ]);
    rp.compare_values(2.0, label_blobs(&gapped).unwrap().count() as f64, 0.0);
    let closed = close(&gapped, 3).unwrap();
    let bin = threshold_global(&closed, 128).unwrap();
    let labeling = label_blobs(&bin).unwrap();
    rp.compare_values(1.0, labeling.count() as f64, 0.0);

    // Measuring twice gives the same answer
    let mut blobs = labeling.blobs.clone().unwrap();
    blob_info(&labeling.labels, &mut blobs).unwrap();
    let first = blobs.clone();
    blob_info(&labeling.labels, &mut blobs).unwrap();
    rp.compare_values(1.0, (first == blobs) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "blob pipeline regression test failed");
}
