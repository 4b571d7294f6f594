//! Image arithmetic operations
//!
//! Sample-wise combination of two images of identical geometry:
//!
//! - Subtraction (`subtract`), wrapping on underflow
//! - Masked copy (`mask_fill`), keeping samples under a binary mask
//! - Inversion (`invert`)

use super::{FOREGROUND, Pix, PixMut};
use crate::error::{Error, Result};

impl Pix {
    /// Subtract another image from this one: self - other
    ///
    /// Each output sample is the difference of the corresponding samples,
    /// computed modulo 256 (a darker minuend wraps around). This is the
    /// background-removal step used to isolate objects that differ from a
    /// reference frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the images differ in width, height or channels.
    ///
    /// # Example
    ///
    /// ```
    /// use blobscan_core::Pix;
    ///
    /// let a = Pix::from_raw(2, 1, 1, 255, vec![200, 10]).unwrap();
    /// let b = Pix::from_raw(2, 1, 1, 255, vec![50, 20]).unwrap();
    /// let d = a.subtract(&b).unwrap();
    /// assert_eq!(d.data(), &[150, 246]);
    /// ```
    pub fn subtract(&self, other: &Pix) -> Result<Pix> {
        let mut out = self.create_template();
        out.check_pair(other)?;
        for ((d, &a), &b) in out
            .data_mut()
            .iter_mut()
            .zip(self.data())
            .zip(other.data())
        {
            *d = a.wrapping_sub(b);
        }
        Ok(out.into())
    }

    /// Keep the samples of `src` where this mask is foreground.
    ///
    /// `self` is a single-channel binary mask; every pixel whose mask value
    /// is 255 copies `src`, all others become 0.
    ///
    /// # Errors
    ///
    /// - [`Error::DimensionMismatch`] if the images differ in size
    /// - [`Error::ChannelMismatch`] if the mask or `src` is multi-channel
    pub fn mask_fill(&self, src: &Pix) -> Result<Pix> {
        if self.channels() != 1 {
            return Err(Error::ChannelMismatch {
                expected: 1,
                actual: self.channels(),
            });
        }
        let mut out = src.create_template();
        out.check_pair(self)?;
        for ((d, &m), &s) in out
            .data_mut()
            .iter_mut()
            .zip(self.data())
            .zip(src.data())
        {
            *d = if m == FOREGROUND { s } else { 0 };
        }
        Ok(out.into())
    }

    /// Invert every sample against the declared level depth.
    ///
    /// Each sample `v` becomes `levels - v` (saturating at 0).
    pub fn invert(&self) -> Pix {
        let mut out = self.to_mut();
        out.invert_inplace();
        out.into()
    }
}

impl PixMut {
    /// Invert every sample in place against the declared level depth.
    pub fn invert_inplace(&mut self) {
        let levels = self.levels() as u8;
        for v in self.data_mut() {
            *v = levels.saturating_sub(*v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtract_wraps() {
        let a = Pix::from_raw(3, 1, 1, 255, vec![10, 100, 0]).unwrap();
        let b = Pix::from_raw(3, 1, 1, 255, vec![5, 100, 1]).unwrap();
        let d = a.subtract(&b).unwrap();
        assert_eq!(d.data(), &[5, 0, 255]);
    }

    #[test]
    fn test_subtract_mismatch() {
        let a = Pix::new(3, 1, 1, 255).unwrap();
        let b = Pix::new(3, 2, 1, 255).unwrap();
        assert!(matches!(
            a.subtract(&b),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_mask_fill() {
        let mask = Pix::from_raw(4, 1, 1, 255, vec![255, 0, 255, 1]).unwrap();
        let src = Pix::from_raw(4, 1, 1, 255, vec![9, 8, 7, 6]).unwrap();
        let out = mask.mask_fill(&src).unwrap();
        assert_eq!(out.data(), &[9, 0, 7, 0]);
    }

    #[test]
    fn test_invert() {
        let pix = Pix::from_raw(3, 1, 1, 255, vec![0, 55, 255]).unwrap();
        assert_eq!(pix.invert().data(), &[255, 200, 0]);

        let bits = Pix::from_raw(2, 1, 1, 1, vec![0, 1]).unwrap();
        assert_eq!(bits.invert().data(), &[1, 0]);
    }
}
