//! Binary thresholding
//!
//! Converts a single-channel grayscale image into a binary image with
//! foreground 255 and background 0:
//!
//! - Fixed threshold, inclusive (`>= t`)
//! - Fixed threshold, strict (`> t`)
//! - Mean threshold (`> floor(mean)`)
//! - Local midpoint threshold (`> (max + min) / 2` over a square window)
//!
//! Every function comes in a returning form and an `_into` form that
//! writes into a caller-provided destination of the same size.

use crate::error::{ColorError, ColorResult, require_channels};
use blobscan_core::{BACKGROUND, FOREGROUND, Pix, PixMut};
use std::fmt;
use std::str::FromStr;

/// Thresholding strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdMethod {
    /// Foreground where the sample is `>= t`
    Global(u8),
    /// Foreground where the sample is `> t`
    Strict(u8),
    /// Foreground where the sample is above the floored image mean
    #[default]
    Mean,
    /// Foreground where the sample is above the midpoint of the local
    /// minimum and maximum in a `kernel x kernel` window
    Midpoint { kernel: u32 },
}

impl ThresholdMethod {
    /// Binarize `src` with this strategy.
    pub fn apply(&self, src: &Pix) -> ColorResult<Pix> {
        let mut dst = src.create_template();
        self.apply_into(src, &mut dst)?;
        Ok(dst.into())
    }

    /// Binarize `src` into `dst` with this strategy.
    pub fn apply_into(&self, src: &Pix, dst: &mut PixMut) -> ColorResult<()> {
        match *self {
            Self::Global(t) => threshold_global_into(src, dst, t),
            Self::Strict(t) => threshold_strict_into(src, dst, t),
            Self::Mean => threshold_mean_into(src, dst),
            Self::Midpoint { kernel } => threshold_midpoint_into(src, dst, kernel),
        }
    }
}

impl fmt::Display for ThresholdMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global(t) => write!(f, "global:{t}"),
            Self::Strict(t) => write!(f, "strict:{t}"),
            Self::Mean => write!(f, "mean"),
            Self::Midpoint { kernel } => write!(f, "midpoint:{kernel}"),
        }
    }
}

impl FromStr for ThresholdMethod {
    type Err = ColorError;

    /// Parse `global:T`, `strict:T`, `mean` or `midpoint:K`.
    fn from_str(s: &str) -> ColorResult<Self> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };
        let bad = || ColorError::InvalidParameters(format!("bad threshold method {s:?}"));
        match (name.to_ascii_lowercase().as_str(), arg) {
            ("mean", None) => Ok(Self::Mean),
            ("global", Some(t)) => Ok(Self::Global(t.parse().map_err(|_| bad())?)),
            ("strict", Some(t)) => Ok(Self::Strict(t.parse().map_err(|_| bad())?)),
            ("midpoint", Some(k)) => {
                let kernel: u32 = k.parse().map_err(|_| bad())?;
                if kernel == 0 {
                    return Err(bad());
                }
                Ok(Self::Midpoint { kernel })
            }
            _ => Err(bad()),
        }
    }
}

/// Validate a gray source and a gray destination of the same size.
fn check_pair(src: &Pix, dst: &mut PixMut) -> ColorResult<()> {
    require_channels(src.channels(), 1)?;
    require_channels(dst.channels(), 1)?;
    dst.check_pair(src)?;
    dst.set_levels(255)?;
    Ok(())
}

/// Classify every sample with `is_foreground`.
fn binarize_into(src: &Pix, dst: &mut PixMut, is_foreground: impl Fn(u8) -> bool) {
    for (d, &s) in dst.data_mut().iter_mut().zip(src.data()) {
        *d = if is_foreground(s) { FOREGROUND } else { BACKGROUND };
    }
}

/// Convert a grayscale image to binary using a fixed threshold
///
/// Pixels `>= threshold` become foreground (255), all others 0.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedChannels`] for multi-channel input.
///
/// # Example
///
/// ```
/// use blobscan_core::Pix;
/// use blobscan_color::threshold_global;
///
/// let pix = Pix::from_raw(3, 1, 1, 255, vec![99, 100, 101]).unwrap();
/// let bin = threshold_global(&pix, 100).unwrap();
/// assert_eq!(bin.data(), &[0, 255, 255]);
/// ```
pub fn threshold_global(src: &Pix, threshold: u8) -> ColorResult<Pix> {
    let mut dst = src.create_template();
    threshold_global_into(src, &mut dst, threshold)?;
    Ok(dst.into())
}

/// [`threshold_global`] into an existing destination.
///
/// # Errors
///
/// - [`ColorError::UnsupportedChannels`] if either image is multi-channel
/// - [`ColorError::Core`] wrapping a dimension mismatch
pub fn threshold_global_into(src: &Pix, dst: &mut PixMut, threshold: u8) -> ColorResult<()> {
    check_pair(src, dst)?;
    binarize_into(src, dst, |v| v >= threshold);
    Ok(())
}

/// Convert a grayscale image to binary with a strict comparison
///
/// Pixels `> threshold` become foreground (255), all others 0.
pub fn threshold_strict(src: &Pix, threshold: u8) -> ColorResult<Pix> {
    let mut dst = src.create_template();
    threshold_strict_into(src, &mut dst, threshold)?;
    Ok(dst.into())
}

/// [`threshold_strict`] into an existing destination.
pub fn threshold_strict_into(src: &Pix, dst: &mut PixMut, threshold: u8) -> ColorResult<()> {
    check_pair(src, dst)?;
    binarize_into(src, dst, |v| v > threshold);
    Ok(())
}

/// Compute the mean threshold of a grayscale image
///
/// Returns `floor(sum / count)` over all samples.
pub fn compute_mean_threshold(src: &Pix) -> ColorResult<u8> {
    require_channels(src.channels(), 1)?;
    Ok(src.mean_value()?)
}

/// Convert a grayscale image to binary using the image mean
///
/// Pixels strictly above the floored mean become foreground. A uniform
/// image therefore produces an all-background result.
pub fn threshold_mean(src: &Pix) -> ColorResult<Pix> {
    let mut dst = src.create_template();
    threshold_mean_into(src, &mut dst)?;
    Ok(dst.into())
}

/// [`threshold_mean`] into an existing destination.
pub fn threshold_mean_into(src: &Pix, dst: &mut PixMut) -> ColorResult<()> {
    check_pair(src, dst)?;
    let threshold = compute_mean_threshold(src)?;
    log::debug!("mean threshold: {threshold}");
    binarize_into(src, dst, |v| v > threshold);
    Ok(())
}

/// Apply local midpoint thresholding
///
/// For every pixel the window of side `2 * ((kernel - 1) / 2) + 1`
/// centered on it is scanned; neighbors outside the image are skipped,
/// not padded. The pixel becomes foreground if its value is strictly
/// greater than `(max + min) / 2` of that window.
///
/// # Arguments
///
/// * `src` - Single-channel grayscale image
/// * `kernel` - Window side (must be > 0)
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] if `kernel` is 0.
pub fn threshold_midpoint(src: &Pix, kernel: u32) -> ColorResult<Pix> {
    let mut dst = src.create_template();
    threshold_midpoint_into(src, &mut dst, kernel)?;
    Ok(dst.into())
}

/// [`threshold_midpoint`] into an existing destination.
pub fn threshold_midpoint_into(src: &Pix, dst: &mut PixMut, kernel: u32) -> ColorResult<()> {
    if kernel == 0 {
        return Err(ColorError::InvalidParameters(
            "midpoint kernel must be positive".into(),
        ));
    }
    check_pair(src, dst)?;

    let offset = (kernel - 1) / 2;
    let (width, height) = (src.width(), src.height());
    log::debug!("midpoint threshold: kernel {kernel}, offset {offset}");

    for y in 0..height {
        let y0 = y.saturating_sub(offset);
        let y1 = (y + offset).min(height - 1);
        for x in 0..width {
            let x0 = x.saturating_sub(offset);
            let x1 = (x + offset).min(width - 1);

            let (mut min, mut max) = (u8::MAX, u8::MIN);
            for wy in y0..=y1 {
                for &v in &src.row(wy)[x0 as usize..=x1 as usize] {
                    min = min.min(v);
                    max = max.max(v);
                }
            }

            let local = ((u16::from(max) + u16::from(min)) / 2) as u8;
            let v = src.get_pixel_unchecked(x, y);
            dst.set_pixel_unchecked(x, y, if v > local { FOREGROUND } else { BACKGROUND });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, data: Vec<u8>) -> Pix {
        let height = data.len() as u32 / width;
        Pix::from_raw(width, height, 1, 255, data).unwrap()
    }

    #[test]
    fn test_global_inclusive() {
        let pix = gray(4, vec![0, 127, 128, 255]);
        let bin = threshold_global(&pix, 128).unwrap();
        assert_eq!(bin.data(), &[0, 0, 255, 255]);
        assert_eq!(bin.levels(), 255);
    }

    #[test]
    fn test_strict() {
        let pix = gray(4, vec![0, 127, 128, 255]);
        let bin = threshold_strict(&pix, 128).unwrap();
        assert_eq!(bin.data(), &[0, 0, 0, 255]);
    }

    #[test]
    fn test_mean_uniform_is_empty() {
        let pix = gray(3, vec![77; 9]);
        assert_eq!(compute_mean_threshold(&pix).unwrap(), 77);
        let bin = threshold_mean(&pix).unwrap();
        assert!(bin.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_mean_split() {
        // mean = (10 + 10 + 200 + 200) / 4 = 105
        let pix = gray(2, vec![10, 200, 10, 200]);
        let bin = threshold_mean(&pix).unwrap();
        assert_eq!(bin.data(), &[0, 255, 0, 255]);
    }

    #[test]
    fn test_midpoint_local() {
        // Left half dark with a brighter speck, right half uniform bright.
        let pix = gray(
            6,
            vec![
                10, 10, 10, 200, 200, 200, //
                10, 40, 10, 200, 200, 200, //
                10, 10, 10, 200, 200, 200,
            ],
        );
        let bin = threshold_midpoint(&pix, 3).unwrap();
        // (1,1): window min 10 max 40 -> t = 25, 40 > 25
        assert_eq!(bin.get_pixel(1, 1), Some(255));
        // (0,0): window min 10 max 40 -> 10 is not above 25
        assert_eq!(bin.get_pixel(0, 0), Some(0));
        // (5,0): uniform window, strict comparison fails
        assert_eq!(bin.get_pixel(5, 0), Some(0));
        // (3,0): window spans 10..200 -> t = 105
        assert_eq!(bin.get_pixel(3, 0), Some(255));
    }

    #[test]
    fn test_midpoint_kernel_one_is_identity_window() {
        let pix = gray(3, vec![0, 128, 255]);
        let bin = threshold_midpoint(&pix, 1).unwrap();
        assert!(bin.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_midpoint_kernel_zero() {
        let pix = gray(2, vec![0; 4]);
        assert!(matches!(
            threshold_midpoint(&pix, 0),
            Err(ColorError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_into_validation() {
        let pix = gray(4, vec![0; 8]);
        let mut wrong_size = PixMut::new(4, 3, 1, 255).unwrap();
        assert!(matches!(
            threshold_global_into(&pix, &mut wrong_size, 1),
            Err(ColorError::Core(blobscan_core::Error::DimensionMismatch { .. }))
        ));

        let mut rgb_dst = PixMut::new(4, 2, 3, 255).unwrap();
        assert!(matches!(
            threshold_global_into(&pix, &mut rgb_dst, 1),
            Err(ColorError::UnsupportedChannels { .. })
        ));

        let rgb = Pix::new(4, 2, 3, 255).unwrap();
        assert!(threshold_mean(&rgb).is_err());
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("mean".parse::<ThresholdMethod>().unwrap(), ThresholdMethod::Mean);
        assert_eq!(
            "global:100".parse::<ThresholdMethod>().unwrap(),
            ThresholdMethod::Global(100)
        );
        assert_eq!(
            "midpoint:5".parse::<ThresholdMethod>().unwrap(),
            ThresholdMethod::Midpoint { kernel: 5 }
        );
        assert!("midpoint:0".parse::<ThresholdMethod>().is_err());
        assert!("global".parse::<ThresholdMethod>().is_err());
        assert!("global:300".parse::<ThresholdMethod>().is_err());
        assert!("otsu".parse::<ThresholdMethod>().is_err());
        let m = ThresholdMethod::Strict(9);
        assert_eq!(m.to_string().parse::<ThresholdMethod>().unwrap(), m);
    }

    #[test]
    fn test_method_apply_matches_functions() {
        let pix = gray(4, vec![5, 50, 150, 250]);
        let a = ThresholdMethod::Global(50).apply(&pix).unwrap();
        let b = threshold_global(&pix, 50).unwrap();
        assert!(a.equals(&b));
    }
}
