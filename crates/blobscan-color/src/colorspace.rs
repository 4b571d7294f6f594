//! Color space conversion
//!
//! - RGB -> Grayscale (BT.601 weights)
//! - RGB -> HSV, stored as three 0..=255 samples
//! - HSV range segmentation

use crate::error::{ColorResult, require_channels};
use blobscan_core::{BACKGROUND, FOREGROUND, Pix};

/// Convert RGB to grayscale using ITU-R BT.601 coefficients
///
/// Formula: gray = 0.299*R + 0.587*G + 0.114*B, truncated.
///
/// # Example
///
/// ```
/// use blobscan_color::rgb_to_gray;
///
/// assert_eq!(rgb_to_gray(255, 255, 255), 255);
/// assert_eq!(rgb_to_gray(100, 0, 0), 29);
/// ```
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    ((299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) / 1000) as u8
}

/// Convert a 3-channel RGB image to a 1-channel grayscale image.
///
/// # Errors
///
/// Returns [`crate::ColorError::UnsupportedChannels`] unless the input has
/// three channels.
pub fn pix_rgb_to_gray(src: &Pix) -> ColorResult<Pix> {
    require_channels(src.channels(), 3)?;
    let mut dst = src.create_template_with(1, src.levels())?;
    for (d, rgb) in dst.data_mut().iter_mut().zip(src.data().chunks_exact(3)) {
        *d = rgb_to_gray(rgb[0], rgb[1], rgb[2]);
    }
    Ok(dst.into())
}

/// Convert RGB values to HSV scaled into bytes.
///
/// Returns `(h, s, v)` where `h` maps 0..360 degrees onto 0..=255, and `s`
/// and `v` are 0..=255. Black has hue and saturation 0; grays have hue 0.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let value = max;

    let (hue, saturation) = if value == 0.0 {
        (0.0, 0.0)
    } else {
        let delta = max - min;
        let saturation = delta / max * 255.0;
        let hue = if saturation == 0.0 {
            0.0
        } else if max == r && g >= b {
            60.0 * (g - b) / delta
        } else if max == r {
            360.0 + 60.0 * (g - b) / delta
        } else if max == g {
            120.0 + 60.0 * (b - r) / delta
        } else {
            240.0 + 60.0 * (r - g) / delta
        };
        (hue, saturation)
    };

    ((hue / 360.0 * 255.0) as u8, saturation as u8, value as u8)
}

/// Convert an RGB image to HSV representation
///
/// The resulting image stores H, S, V in the R, G, B channels respectively,
/// scaled to [0, 255] as in [`rgb_to_hsv`].
pub fn pix_rgb_to_hsv(src: &Pix) -> ColorResult<Pix> {
    require_channels(src.channels(), 3)?;
    let mut dst = src.create_template();
    for (d, s) in dst
        .data_mut()
        .chunks_exact_mut(3)
        .zip(src.data().chunks_exact(3))
    {
        let (h, sat, v) = rgb_to_hsv(s[0], s[1], s[2]);
        d.copy_from_slice(&[h, sat, v]);
    }
    Ok(dst.into())
}

/// Hue/saturation/value window for [`hsv_segmentation`].
///
/// Hue is in degrees (0..=360) and is half-open: a pixel matches when
/// `hue_min < h <= hue_max`. Saturation and value are percentages
/// (0..=100) and inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub hue_min: i32,
    pub hue_max: i32,
    pub sat_min: i32,
    pub sat_max: i32,
    pub val_min: i32,
    pub val_max: i32,
}

impl HsvRange {
    /// Create a range from degree and percentage bounds.
    pub fn new(hue: (i32, i32), sat: (i32, i32), val: (i32, i32)) -> Self {
        Self {
            hue_min: hue.0,
            hue_max: hue.1,
            sat_min: sat.0,
            sat_max: sat.1,
            val_min: val.0,
            val_max: val.1,
        }
    }

    /// Check an HSV-encoded pixel (as produced by [`rgb_to_hsv`]).
    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        let h = (f32::from(h) / 255.0 * 360.0) as i32;
        let s = (f32::from(s) / 255.0 * 100.0) as i32;
        let v = (f32::from(v) / 255.0 * 100.0) as i32;
        h > self.hue_min
            && h <= self.hue_max
            && (self.sat_min..=self.sat_max).contains(&s)
            && (self.val_min..=self.val_max).contains(&v)
    }
}

/// Segment an HSV image by a color window.
///
/// `src` must hold HSV samples as produced by [`pix_rgb_to_hsv`]. Matching
/// pixels become (255, 255, 255), all others (0, 0, 0).
pub fn hsv_segmentation(src: &Pix, range: &HsvRange) -> ColorResult<Pix> {
    require_channels(src.channels(), 3)?;
    let mut dst = src.create_template();
    let mut matched = 0usize;
    for (d, s) in dst
        .data_mut()
        .chunks_exact_mut(3)
        .zip(src.data().chunks_exact(3))
    {
        let v = if range.contains(s[0], s[1], s[2]) {
            matched += 1;
            FOREGROUND
        } else {
            BACKGROUND
        };
        d.fill(v);
    }
    log::debug!("hsv segmentation: {matched} pixel(s) in {range:?}");
    Ok(dst.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobscan_core::PixMut;

    #[test]
    fn test_rgb_to_gray() {
        assert_eq!(rgb_to_gray(0, 0, 0), 0);
        assert_eq!(rgb_to_gray(255, 255, 255), 255);
        assert_eq!(rgb_to_gray(0, 255, 0), 149);
        assert_eq!(rgb_to_gray(0, 0, 255), 29);
    }

    #[test]
    fn test_pix_rgb_to_gray() {
        let mut pix = PixMut::new(2, 1, 3, 255).unwrap();
        pix.set_rgb(0, 0, 255, 0, 0).unwrap();
        pix.set_rgb(1, 0, 10, 10, 10).unwrap();
        let gray = pix_rgb_to_gray(&pix.into()).unwrap();
        assert_eq!(gray.channels(), 1);
        assert_eq!(gray.data(), &[76, 10]);

        let already_gray = Pix::new(2, 2, 1, 255).unwrap();
        assert!(pix_rgb_to_gray(&already_gray).is_err());
    }

    #[test]
    fn test_rgb_to_hsv_primaries() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0, 255, 255));
        assert_eq!(rgb_to_hsv(0, 255, 0), (85, 255, 255));
        assert_eq!(rgb_to_hsv(0, 0, 255), (170, 255, 255));
        assert_eq!(rgb_to_hsv(0, 0, 0), (0, 0, 0));
        assert_eq!(rgb_to_hsv(90, 90, 90), (0, 0, 90));
    }

    #[test]
    fn test_hsv_magenta_wraps() {
        // max == r and b > g: 360 + 60 * (0 - 255) / 255 = 300 degrees
        let (h, _, _) = rgb_to_hsv(255, 0, 255);
        assert_eq!(h, 212);
    }

    #[test]
    fn test_hsv_range() {
        let green = HsvRange::new((100, 140), (50, 100), (50, 100));
        assert!(green.contains(85, 255, 255));
        assert!(!green.contains(0, 255, 255));
        assert!(!green.contains(85, 50, 255));

        // Lower hue bound is exclusive
        let red = HsvRange::new((0, 30), (0, 100), (0, 100));
        assert!(!red.contains(0, 255, 255));
    }

    #[test]
    fn test_hsv_segmentation() {
        let mut pix = PixMut::new(2, 1, 3, 255).unwrap();
        pix.set_rgb(0, 0, 0, 200, 0).unwrap();
        pix.set_rgb(1, 0, 0, 0, 200).unwrap();
        let hsv = pix_rgb_to_hsv(&pix.into()).unwrap();
        let range = HsvRange::new((90, 150), (50, 100), (30, 100));
        let seg = hsv_segmentation(&hsv, &range).unwrap();
        assert_eq!(seg.data(), &[255, 255, 255, 0, 0, 0]);
    }
}
