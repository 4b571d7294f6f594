//! Histogram generation for Pix images
//!
//! Functions to compute and use the intensity distribution of a
//! single-channel image.

use super::{FOREGROUND, Pix, PixMut};
use crate::error::{Error, Result};

/// Side length of the square image produced by [`Pix::histogram_plot`].
pub const HISTOGRAM_PLOT_SIZE: u32 = 256;

impl Pix {
    fn require_single_channel(&self) -> Result<()> {
        if self.channels() != 1 {
            return Err(Error::ChannelMismatch {
                expected: 1,
                actual: self.channels(),
            });
        }
        Ok(())
    }

    /// Get the grayscale histogram of the image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] for multi-channel images.
    ///
    /// # Example
    ///
    /// ```
    /// use blobscan_core::Pix;
    ///
    /// let pix = Pix::from_raw(3, 1, 1, 255, vec![0, 7, 7]).unwrap();
    /// let hist = pix.gray_histogram().unwrap();
    /// assert_eq!(hist[0], 1);
    /// assert_eq!(hist[7], 2);
    /// ```
    pub fn gray_histogram(&self) -> Result<[u32; 256]> {
        self.require_single_channel()?;
        let mut hist = [0u32; 256];
        for &v in self.data() {
            hist[v as usize] += 1;
        }
        Ok(hist)
    }

    /// Mean sample value, rounded down.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] for multi-channel images.
    pub fn mean_value(&self) -> Result<u8> {
        self.require_single_channel()?;
        let sum: u64 = self.data().iter().map(|&v| u64::from(v)).sum();
        let count = self.data().len() as u64;
        Ok((sum / count) as u8)
    }

    /// Histogram equalization.
    ///
    /// Each sample `v` maps to `floor(cdf(v) * 255)`, where `cdf` is the
    /// normalised cumulative histogram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] for multi-channel images.
    pub fn equalize_histogram(&self) -> Result<Pix> {
        let hist = self.gray_histogram()?;
        let total = self.data().len() as u64;

        let mut lut = [0u8; 256];
        let mut cumulative = 0u64;
        for (entry, &count) in lut.iter_mut().zip(hist.iter()) {
            cumulative += u64::from(count);
            *entry = (cumulative * 255 / total) as u8;
        }

        let mut out = self.create_template();
        for (d, &s) in out.data_mut().iter_mut().zip(self.data()) {
            *d = lut[s as usize];
        }
        Ok(out.into())
    }

    /// Render the histogram as a 256x256 bar chart.
    ///
    /// Column `x` holds a bar for intensity `x`, scaled so that the most
    /// frequent intensity spans the full height. Bars are 255 on a 0
    /// background and grow upwards from the bottom row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] for multi-channel images.
    pub fn histogram_plot(&self) -> Result<Pix> {
        let hist = self.gray_histogram()?;
        let peak = u64::from(hist.iter().copied().max().unwrap_or(0)).max(1);

        let size = HISTOGRAM_PLOT_SIZE;
        let mut plot = PixMut::new(size, size, 1, 255)?;
        for (x, &count) in hist.iter().enumerate() {
            let bar = (u64::from(count) * 255 / peak) as u32;
            for y in (size - bar)..size {
                plot.row_mut(y)[x] = FOREGROUND;
            }
        }
        Ok(plot.into())
    }
}
