//! Grayscale morphological operations
//!
//! Implements erosion, dilation, opening, and closing with a square
//! structuring element. Any channel count is accepted; each channel is
//! filtered independently.
//!
//! # Algorithm
//!
//! - **Dilation**: maximum sample value in the neighborhood
//! - **Erosion**: minimum sample value in the neighborhood
//! - **Opening**: erosion followed by dilation (removes small bright features)
//! - **Closing**: dilation followed by erosion (fills small dark features)
//!
//! Neighbors outside the image are excluded from the extremum, so the
//! window shrinks near the borders. A clipped square window is the
//! product of a clipped row span and a clipped column span, so the
//! extremum is computed in a horizontal pass followed by a vertical pass.

use crate::{MorphResult, Sel};
use blobscan_core::{Pix, PixMut};

#[derive(Debug, Clone, Copy)]
enum Extremum {
    Max,
    Min,
}

impl Extremum {
    #[inline]
    fn identity(self) -> u8 {
        match self {
            Extremum::Max => u8::MIN,
            Extremum::Min => u8::MAX,
        }
    }

    #[inline]
    fn pick(self, a: u8, b: u8) -> u8 {
        match self {
            Extremum::Max => a.max(b),
            Extremum::Min => a.min(b),
        }
    }
}

fn filter_into(src: &Pix, dst: &mut PixMut, sel: &Sel, op: Extremum) -> MorphResult<()> {
    dst.check_pair(src)?;
    dst.set_levels(src.levels())?;

    let (width, height) = (src.width(), src.height());
    let channels = src.channels() as usize;
    let stride = src.stride() as usize;

    // Horizontal pass
    let mut rows = vec![0u8; src.data().len()];
    for (y, out) in rows.chunks_exact_mut(stride).enumerate() {
        let line = src.row(y as u32);
        for x in 0..width {
            let span = sel.window(x, width);
            for c in 0..channels {
                let acc = span.clone().fold(op.identity(), |acc, wx| {
                    op.pick(acc, line[wx as usize * channels + c])
                });
                out[x as usize * channels + c] = acc;
            }
        }
    }

    // Vertical pass
    for y in 0..height {
        let span = sel.window(y, height);
        for (i, out) in dst.row_mut(y).iter_mut().enumerate() {
            *out = span.clone().fold(op.identity(), |acc, wy| {
                op.pick(acc, rows[wy as usize * stride + i])
            });
        }
    }

    Ok(())
}

fn filter(src: &Pix, kernel: u32, op: Extremum) -> MorphResult<Pix> {
    let sel = Sel::square(kernel)?;
    let mut dst = src.create_template();
    filter_into(src, &mut dst, &sel, op)?;
    Ok(dst.into())
}

/// Dilate an image with a square structuring element
///
/// Each output sample is the maximum over the in-bounds `kernel x kernel`
/// neighborhood (including the center), which expands bright regions.
///
/// # Errors
///
/// Returns [`crate::MorphError::InvalidSel`] if `kernel` is 0.
///
/// # Example
///
/// ```
/// use blobscan_core::Pix;
/// use blobscan_morph::dilate;
///
/// let pix = Pix::from_raw(3, 1, 1, 255, vec![0, 9, 0]).unwrap();
/// assert_eq!(dilate(&pix, 3).unwrap().data(), &[9, 9, 9]);
/// ```
pub fn dilate(src: &Pix, kernel: u32) -> MorphResult<Pix> {
    filter(src, kernel, Extremum::Max)
}

/// Erode an image with a square structuring element
///
/// Each output sample is the minimum over the in-bounds neighborhood,
/// which shrinks bright regions.
pub fn erode(src: &Pix, kernel: u32) -> MorphResult<Pix> {
    filter(src, kernel, Extremum::Min)
}

/// [`dilate`] into an existing destination.
///
/// # Errors
///
/// - [`crate::MorphError::InvalidSel`] if `kernel` is 0
/// - [`crate::MorphError::Core`] if `dst` differs from `src` in width,
///   height or channel count
pub fn dilate_into(src: &Pix, dst: &mut PixMut, kernel: u32) -> MorphResult<()> {
    filter_into(src, dst, &Sel::square(kernel)?, Extremum::Max)
}

/// [`erode`] into an existing destination.
pub fn erode_into(src: &Pix, dst: &mut PixMut, kernel: u32) -> MorphResult<()> {
    filter_into(src, dst, &Sel::square(kernel)?, Extremum::Min)
}

/// Open an image (erosion followed by dilation)
///
/// Opening removes bright features smaller than the structuring element.
pub fn open(src: &Pix, kernel: u32) -> MorphResult<Pix> {
    dilate(&erode(src, kernel)?, kernel)
}

/// Close an image (dilation followed by erosion)
///
/// Closing fills dark features smaller than the structuring element.
pub fn close(src: &Pix, kernel: u32) -> MorphResult<Pix> {
    erode(&dilate(src, kernel)?, kernel)
}
