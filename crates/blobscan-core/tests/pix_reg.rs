//! Image buffer regression test
//!
//! Exercises the buffer invariants (stride, length, ownership) together
//! with the arithmetic and histogram helpers on synthesized images.

use blobscan_core::{Box, Error, Pix, PixMut};
use blobscan_test::{RegParams, gray_from_fn};

// ============================================================================
// Geometry and ownership
// ============================================================================

#[test]
fn pix_reg() {
    let mut rp = RegParams::new("pix");

    for &(w, h, c) in &[(1u32, 1u32, 1u32), (17, 5, 1), (9, 13, 3)] {
        let pix = Pix::new(w, h, c, 255).unwrap();
        rp.compare_values((w * c) as f64, pix.stride() as f64, 0.0);
        rp.compare_values((h * w * c) as f64, pix.data().len() as f64, 0.0);
    }

    let gray = gray_from_fn(16, 8, |x, y| (x * 16 + y) as u8);
    let shared = gray.clone();
    rp.compare_values(2.0, gray.ref_count() as f64, 0.0);
    drop(shared);

    let mut edited = gray.to_mut();
    edited.set_pixel(3, 3, 0).unwrap();
    let edited: Pix = edited.into();
    rp.compare_values(51.0, gray.get_pixel(3, 3).unwrap() as f64, 0.0);
    rp.compare_values(0.0, edited.get_pixel(3, 3).unwrap() as f64, 0.0);

    let relevelled = gray.with_levels(100).unwrap();
    rp.compare_values(100.0, relevelled.levels() as f64, 0.0);
    rp.compare_pix(&gray, &relevelled);

    assert!(rp.cleanup(), "pix regression test failed");
}

#[test]
fn test_bad_levels_rejected() {
    assert!(matches!(
        PixMut::new(4, 4, 1, 300),
        Err(Error::InvalidLevels(300))
    ));
    let pix = Pix::new(4, 4, 1, 255).unwrap();
    assert!(pix.with_levels(0).is_err());
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn pix_arith_reg() {
    let mut rp = RegParams::new("pix_arith");

    let frame = gray_from_fn(10, 10, |x, _| 100 + x as u8);
    let background = gray_from_fn(10, 10, |_, _| 100);
    let diff = frame.subtract(&background).unwrap();
    let expected = gray_from_fn(10, 10, |x, _| x as u8);
    rp.compare_pix(&expected, &diff);

    // Subtracting an image from itself leaves nothing.
    let zero = frame.subtract(&frame).unwrap();
    rp.compare_values(0.0, zero.data().iter().map(|&v| v as f64).sum(), 0.0);

    let mask = gray_from_fn(10, 10, |x, y| if x < 5 && y < 5 { 255 } else { 0 });
    let kept = mask.mask_fill(&frame).unwrap();
    rp.compare_values(104.0, kept.get_pixel(4, 4).unwrap() as f64, 0.0);
    rp.compare_values(0.0, kept.get_pixel(5, 4).unwrap() as f64, 0.0);

    let twice = frame.invert().invert();
    rp.compare_pix(&frame, &twice);

    assert!(rp.cleanup(), "pix_arith regression test failed");
}

// ============================================================================
// Histogram
// ============================================================================

#[test]
fn pix_histogram_reg() {
    let mut rp = RegParams::new("pix_histogram");

    // Ramp with every value 0..=255 appearing exactly once per row.
    let ramp = gray_from_fn(256, 4, |x, _| x as u8);
    let hist = ramp.gray_histogram().unwrap();
    rp.compare_values(4.0, hist[0] as f64, 0.0);
    rp.compare_values(4.0, hist[255] as f64, 0.0);
    rp.compare_values(1024.0, hist.iter().sum::<u32>() as f64, 0.0);
    rp.compare_values(127.0, ramp.mean_value().unwrap() as f64, 0.0);

    // Equalizing a ramp is (almost) the identity.
    let eq = ramp.equalize_histogram().unwrap();
    let max_shift = ramp
        .data()
        .iter()
        .zip(eq.data())
        .map(|(&a, &b)| (a as i32 - b as i32).abs())
        .max()
        .unwrap();
    rp.compare_values(0.0, max_shift as f64, 1.0);

    // A flat histogram gives full-height bars in every column.
    let plot = ramp.histogram_plot().unwrap();
    rp.compare_values(256.0, plot.width() as f64, 0.0);
    rp.compare_values(255.0, plot.get_pixel(128, 1).unwrap() as f64, 0.0);
    rp.compare_values(0.0, plot.get_pixel(128, 0).unwrap() as f64, 0.0);
    rp.write_pix_and_check(&plot).unwrap();

    assert!(rp.cleanup(), "pix_histogram regression test failed");
}

#[test]
fn test_box_geometry() {
    let b = Box::from_extremes(2, 3, 5, 3);
    assert_eq!((b.x, b.y, b.w, b.h), (2, 3, 4, 1));
    assert!(!b.is_empty());
    assert_eq!(Box::from_extremes(5, 3, 2, 3), b);
}
