//! Pixel access functions
//!
//! Stride-aware getters and setters for individual samples. The checked
//! variants return `None` / [`Error::IndexOutOfBounds`]; the `_unchecked`
//! variants panic on out-of-range coordinates through slice indexing.
//!
//! A sample lives at `y * stride + x * channels + c`.

use super::{Pix, PixData, PixMut};
use crate::error::{Error, Result};

impl PixData {
    /// Offset of sample `c` of pixel (x, y), if in range.
    #[inline]
    fn offset(&self, x: u32, y: u32, c: u32) -> Option<usize> {
        if x >= self.width || y >= self.height || c >= self.channels {
            return None;
        }
        Some(y as usize * self.stride as usize + x as usize * self.channels as usize + c as usize)
    }

    #[inline]
    fn offset_unchecked(&self, x: u32, y: u32, c: u32) -> usize {
        assert!(
            x < self.width && y < self.height && c < self.channels,
            "pixel ({x}, {y}, {c}) out of range for {}x{}x{}",
            self.width,
            self.height,
            self.channels
        );
        y as usize * self.stride as usize + x as usize * self.channels as usize + c as usize
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> Error {
        Error::IndexOutOfBounds {
            index: y as usize * self.width as usize + x as usize,
            len: self.width as usize * self.height as usize,
        }
    }

    fn rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.channels != 3 {
            return None;
        }
        let i = self.offset(x, y, 0)?;
        Some((self.data[i], self.data[i + 1], self.data[i + 2]))
    }
}

impl Pix {
    /// Get the first sample of pixel (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        self.get_sample(x, y, 0)
    }

    /// Get sample `c` of pixel (x, y).
    pub fn get_sample(&self, x: u32, y: u32, c: u32) -> Option<u8> {
        self.inner.offset(x, y, c).map(|i| self.inner.data[i])
    }

    /// Get the first sample without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.inner.data[self.inner.offset_unchecked(x, y, 0)]
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 3-channel images.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.inner.rgb(x, y)
    }
}

impl PixMut {
    /// Get the first sample of pixel (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        self.get_sample(x, y, 0)
    }

    /// Get sample `c` of pixel (x, y).
    pub fn get_sample(&self, x: u32, y: u32, c: u32) -> Option<u8> {
        self.inner.offset(x, y, c).map(|i| self.inner.data[i])
    }

    /// Get the first sample without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.inner.data[self.inner.offset_unchecked(x, y, 0)]
    }

    /// Get RGB values at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.inner.rgb(x, y)
    }

    /// Set the first sample of pixel (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        self.set_sample(x, y, 0, val)
    }

    /// Set sample `c` of pixel (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinates or the channel
    /// are out of range.
    pub fn set_sample(&mut self, x: u32, y: u32, c: u32, val: u8) -> Result<()> {
        match self.inner.offset(x, y, c) {
            Some(i) => {
                self.inner.data[i] = val;
                Ok(())
            }
            None => Err(self.inner.out_of_bounds(x, y)),
        }
    }

    /// Set the first sample without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u8) {
        let i = self.inner.offset_unchecked(x, y, 0);
        self.inner.data[i] = val;
    }

    /// Set an RGB pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for images without 3 channels and
    /// [`Error::IndexOutOfBounds`] for coordinates outside the image.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.inner.channels != 3 {
            return Err(Error::InvalidParameter(format!(
                "set_rgb requires 3 channels, image has {}",
                self.inner.channels
            )));
        }
        let i = self
            .inner
            .offset(x, y, 0)
            .ok_or_else(|| self.inner.out_of_bounds(x, y))?;
        self.inner.data[i..i + 3].copy_from_slice(&[r, g, b]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_access() {
        let mut pix = PixMut::new(5, 4, 1, 255).unwrap();
        pix.set_pixel(2, 3, 200).unwrap();
        assert_eq!(pix.get_pixel(2, 3), Some(200));
        assert_eq!(pix.data()[3 * 5 + 2], 200);
        assert_eq!(pix.get_pixel(5, 0), None);
        assert!(matches!(
            pix.set_pixel(0, 4, 1),
            Err(Error::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_rgb_access() {
        let mut pix = PixMut::new(4, 2, 3, 255).unwrap();
        pix.set_rgb(1, 1, 10, 20, 30).unwrap();
        let pix: Pix = pix.into();
        assert_eq!(pix.get_rgb(1, 1), Some((10, 20, 30)));
        assert_eq!(pix.get_sample(1, 1, 2), Some(30));
        assert_eq!(pix.get_sample(1, 1, 3), None);
        assert_eq!(pix.row(1)[3..6], [10, 20, 30]);
    }

    #[test]
    fn test_set_rgb_on_gray_fails() {
        let mut pix = PixMut::new(4, 2, 1, 255).unwrap();
        assert!(pix.set_rgb(0, 0, 1, 2, 3).is_err());
        assert_eq!(pix.get_rgb(0, 0), None);
    }

    #[test]
    #[should_panic]
    fn test_unchecked_panics() {
        let pix = Pix::new(3, 3, 1, 255).unwrap();
        let _ = pix.get_pixel_unchecked(3, 0);
    }
}
