//! PIX - The main image container
//!
//! `Pix` is the single image type shared by every pipeline stage.
//!
//! # Pixel layout
//!
//! - One byte per sample, rows stored contiguously (row-major)
//! - `stride` (bytes per line) is always `width * channels`
//! - The buffer length is always exactly `height * stride`
//! - Multi-channel images interleave samples (`RGBRGB...`)
//!
//! # Levels
//!
//! `levels` is the maximum sample value the image is declared to hold:
//! 1 for a bitmap (samples 0/1), up to 255 for gray or RGB images.
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.
//! Dropping the last handle releases the buffer.

mod access;
pub mod arith;
pub mod histogram;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Sample value of a foreground pixel in a binary (0/255) image.
pub const FOREGROUND: u8 = 255;

/// Sample value of a background pixel.
pub const BACKGROUND: u8 = 0;

/// Internal PIX data
#[derive(Debug, Clone)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples per pixel (1 for binary/gray, 3 for RGB)
    channels: u32,
    /// Maximum sample value (1 for binary, up to 255 otherwise)
    levels: u32,
    /// Bytes per line (width * channels)
    stride: u32,
    /// The image data, `height * stride` bytes
    data: Vec<u8>,
}

impl PixData {
    /// Validate geometry and reserve a zeroed buffer.
    ///
    /// The reservation is fallible so an oversized request surfaces as
    /// [`Error::AllocationFailed`] instead of aborting the process.
    fn alloc(width: u32, height: u32, channels: u32, levels: u32) -> Result<Self> {
        let stride = Self::validate(width, height, channels, levels)?;
        let len = (stride as usize)
            .checked_mul(height as usize)
            .ok_or(Error::AllocationFailed)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::AllocationFailed)?;
        data.resize(len, 0);

        Ok(Self {
            width,
            height,
            channels,
            levels,
            stride,
            data,
        })
    }

    /// Check the header fields and return the stride.
    fn validate(width: u32, height: u32, channels: u32, levels: u32) -> Result<u32> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if channels != 1 && channels != 3 {
            return Err(Error::InvalidChannels(channels));
        }
        if levels == 0 || levels > 255 {
            return Err(Error::InvalidLevels(levels));
        }
        width
            .checked_mul(channels)
            .ok_or(Error::AllocationFailed)
    }

    #[inline]
    fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride as usize;
        &self.data[start..start + self.stride as usize]
    }
}

/// PIX - Main image container
///
/// # Examples
///
/// ```
/// use blobscan_core::Pix;
///
/// // Create a new 8-bit grayscale image
/// let pix = Pix::new(640, 480, 1, 255).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.stride(), 640);
/// assert_eq!(pix.data().len(), 640 * 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified geometry.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels (must be > 0)
    /// * `height` - Height in pixels (must be > 0)
    /// * `channels` - Samples per pixel (1 or 3)
    /// * `levels` - Maximum sample value (1..=255)
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] if width or height is 0
    /// - [`Error::InvalidChannels`] if channels is not 1 or 3
    /// - [`Error::InvalidLevels`] if levels is outside 1..=255
    /// - [`Error::AllocationFailed`] if the buffer cannot be reserved
    pub fn new(width: u32, height: u32, channels: u32, levels: u32) -> Result<Self> {
        let inner = PixData::alloc(width, height, channels, levels)?;
        Ok(Pix {
            inner: Arc::new(inner),
        })
    }

    /// Wrap an existing buffer.
    ///
    /// # Errors
    ///
    /// Same header checks as [`Pix::new`], plus [`Error::BufferLength`] if
    /// `data.len() != height * width * channels`.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u32,
        levels: u32,
        data: Vec<u8>,
    ) -> Result<Self> {
        let stride = PixData::validate(width, height, channels, levels)?;
        let expected = stride as usize * height as usize;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                channels,
                levels,
                stride,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.inner.channels
    }

    /// Get the maximum sample value.
    #[inline]
    pub fn levels(&self) -> u32 {
        self.inner.levels
    }

    /// Get the bytes per line.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.inner.stride
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the number of strong references to this PIX.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get the samples of one row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        self.inner.row(y)
    }

    /// Create a zeroed image with the same geometry.
    pub fn create_template(&self) -> PixMut {
        let mut inner = self.inner.clone_header();
        inner.data = vec![0u8; self.inner.data.len()];
        PixMut { inner }
    }

    /// Create a zeroed image with the same width and height but a
    /// different channel count and level depth.
    ///
    /// # Errors
    ///
    /// Same header checks as [`Pix::new`].
    pub fn create_template_with(&self, channels: u32, levels: u32) -> Result<PixMut> {
        let inner = PixData::alloc(self.inner.width, self.inner.height, channels, levels)?;
        Ok(PixMut { inner })
    }

    /// Check if two PIX have the same width, height, and channel count.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.channels == other.inner.channels
    }

    /// Check if two PIX hold identical geometry and samples.
    ///
    /// Level depth is not compared.
    pub fn equals(&self, other: &Pix) -> bool {
        self.sizes_equal(other) && self.inner.data == other.inner.data
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new((*self.inner).clone()),
        }
    }

    /// Copy this image with a different declared level depth.
    ///
    /// Samples are not rescaled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLevels`] if `levels` is outside 1..=255.
    pub fn with_levels(&self, levels: u32) -> Result<Pix> {
        let mut out = self.to_mut();
        out.set_levels(levels)?;
        Ok(out.into())
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

impl PixData {
    /// Copy every header field, leaving the sample buffer empty.
    fn clone_header(&self) -> PixData {
        PixData {
            width: self.width,
            height: self.height,
            channels: self.channels,
            levels: self.levels,
            stride: self.stride,
            data: Vec::new(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new zeroed mutable image.
    ///
    /// See [`Pix::new`] for the accepted geometry.
    pub fn new(width: u32, height: u32, channels: u32, levels: u32) -> Result<Self> {
        Ok(PixMut {
            inner: PixData::alloc(width, height, channels, levels)?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get samples per pixel.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.inner.channels
    }

    /// Get the maximum sample value.
    #[inline]
    pub fn levels(&self) -> u32 {
        self.inner.levels
    }

    /// Get the bytes per line.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.inner.stride
    }

    /// Set the declared level depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLevels`] if `levels` is outside 1..=255.
    pub fn set_levels(&mut self, levels: u32) -> Result<()> {
        if levels == 0 || levels > 255 {
            return Err(Error::InvalidLevels(levels));
        }
        self.inner.levels = levels;
        Ok(())
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get the samples of one row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        self.inner.row(y)
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.inner.stride as usize;
        let start = y as usize * stride;
        &mut self.inner.data[start..start + stride]
    }

    /// Set every sample to `value`.
    pub fn fill(&mut self, value: u8) {
        self.inner.data.fill(value);
    }

    /// Check that `src` can be paired with this image as a source.
    ///
    /// # Errors
    ///
    /// - [`Error::DimensionMismatch`] if width or height differ
    /// - [`Error::ChannelMismatch`] if the channel counts differ
    pub fn check_pair(&self, src: &Pix) -> Result<()> {
        if src.width() != self.inner.width || src.height() != self.inner.height {
            return Err(Error::DimensionMismatch {
                expected: (src.width(), src.height()),
                actual: (self.inner.width, self.inner.height),
            });
        }
        if src.channels() != self.inner.channels {
            return Err(Error::ChannelMismatch {
                expected: src.channels(),
                actual: self.inner.channels,
            });
        }
        Ok(())
    }
}

impl From<PixMut> for Pix {
    fn from(pix: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200, 1, 255).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.channels(), 1);
        assert_eq!(pix.levels(), 255);
        assert_eq!(pix.stride(), 100);
        assert_eq!(pix.data().len(), 100 * 200);
        assert!(pix.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_rgb_stride() {
        let pix = Pix::new(10, 4, 3, 255).unwrap();
        assert_eq!(pix.stride(), 30);
        assert_eq!(pix.data().len(), 120);
        assert_eq!(pix.row(3).len(), 30);
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(matches!(
            Pix::new(0, 10, 1, 255),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            Pix::new(10, 0, 1, 255),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            Pix::new(10, 10, 2, 255),
            Err(Error::InvalidChannels(2))
        ));
        assert!(matches!(
            Pix::new(10, 10, 1, 0),
            Err(Error::InvalidLevels(0))
        ));
        assert!(matches!(
            Pix::new(10, 10, 1, 256),
            Err(Error::InvalidLevels(256))
        ));
    }

    #[test]
    fn test_allocation_failure() {
        let result = Pix::new(u32::MAX / 3, u32::MAX, 3, 255);
        assert!(matches!(result, Err(Error::AllocationFailed)));
    }

    #[test]
    fn test_from_raw() {
        let pix = Pix::from_raw(3, 2, 1, 255, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(pix.row(1), &[4, 5, 6]);

        let err = Pix::from_raw(3, 2, 1, 255, vec![0; 5]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferLength {
                expected: 6,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_pix_clone_shares_data() {
        let pix1 = Pix::new(10, 10, 1, 255).unwrap();
        let pix2 = pix1.clone();
        assert_eq!(pix1.ref_count(), 2);
        assert_eq!(pix2.ref_count(), 2);
    }

    #[test]
    fn test_pix_deep_clone() {
        let pix1 = Pix::new(10, 10, 1, 255).unwrap();
        let pix2 = pix1.deep_clone();
        assert_eq!(pix1.ref_count(), 1);
        assert_eq!(pix2.ref_count(), 1);
        assert!(pix1.equals(&pix2));
    }

    #[test]
    fn test_try_into_mut() {
        let pix = Pix::new(10, 10, 1, 255).unwrap();
        let mut pix_mut = pix.try_into_mut().unwrap();
        pix_mut.fill(7);
        let pix: Pix = pix_mut.into();
        assert!(pix.data().iter().all(|&v| v == 7));

        let shared = pix.clone();
        assert!(pix.try_into_mut().is_err());
        drop(shared);
    }

    #[test]
    fn test_template_and_pair_check() {
        let pix = Pix::new(8, 6, 1, 255).unwrap();
        let template = pix.create_template();
        assert_eq!(template.width(), 8);
        assert_eq!(template.height(), 6);
        assert!(template.check_pair(&pix).is_ok());

        let other = PixMut::new(8, 7, 1, 255).unwrap();
        assert!(matches!(
            other.check_pair(&pix),
            Err(Error::DimensionMismatch { .. })
        ));

        let rgb = pix.create_template_with(3, 255).unwrap();
        assert!(matches!(
            rgb.check_pair(&pix),
            Err(Error::ChannelMismatch {
                expected: 1,
                actual: 3
            })
        ));
    }
}
