//! Structuring Element (SEL) for morphological operations
//!
//! Only square elements are used: every position of a `kernel x kernel`
//! block is a hit, with the origin at `kernel / 2`.

use crate::{MorphError, MorphResult};
use std::ops::RangeInclusive;

/// Square structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sel {
    size: u32,
    offset: u32,
}

impl Sel {
    /// Create a square structuring element of side `kernel`.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] if `kernel` is 0.
    pub fn square(kernel: u32) -> MorphResult<Self> {
        if kernel == 0 {
            return Err(MorphError::InvalidSel("kernel size must be > 0".into()));
        }
        Ok(Self {
            size: kernel,
            offset: kernel / 2,
        })
    }

    /// Get the side length
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Get the distance from the origin to the window edge
    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Window of coordinates around `center`, clipped to `0..len`.
    ///
    /// Positions outside the image are dropped, not padded, so the window
    /// shrinks near the borders.
    pub fn window(&self, center: u32, len: u32) -> RangeInclusive<u32> {
        let start = center.saturating_sub(self.offset);
        let end = center.saturating_add(self.offset).min(len - 1);
        start..=end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square() {
        let sel = Sel::square(3).unwrap();
        assert_eq!(sel.size(), 3);
        assert_eq!(sel.offset(), 1);
        assert_eq!(Sel::square(4).unwrap().offset(), 2);
        assert!(matches!(Sel::square(0), Err(MorphError::InvalidSel(_))));
    }

    #[test]
    fn test_window_clipping() {
        let sel = Sel::square(5).unwrap();
        assert_eq!(sel.window(0, 10), 0..=2);
        assert_eq!(sel.window(5, 10), 3..=7);
        assert_eq!(sel.window(9, 10), 7..=9);
        assert_eq!(sel.window(0, 1), 0..=0);
    }
}
