//! Box - Rectangle regions
//!
//! Axis-aligned rectangles used for blob bounding boxes.

use crate::error::{Error, Result};

/// A rectangle region
///
/// A small `Copy` type; `x`/`y` is the top-left corner and `w`/`h` the
/// extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={w}, h={h}"
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create the box spanning two inclusive pixel extremes.
    ///
    /// `from_extremes(3, 3, 3, 3)` is the single pixel at (3, 3) with
    /// width and height 1.
    pub fn from_extremes(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Self {
        let (x0, x1) = (xmin.min(xmax), xmin.max(xmax));
        let (y0, y1) = (ymin.min(ymax), ymin.max(ymax));
        Self {
            x: x0,
            y: y0,
            w: x1 - x0 + 1,
            h: y1 - y0 + 1,
        }
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_creation() {
        let b = Box::new(10, 20, 100, 50).unwrap();
        assert_eq!(b, Box::new_unchecked(10, 20, 100, 50));
        assert!(!b.is_empty());
        assert!(Box::new(0, 0, -1, 5).is_err());
        assert!(Box::default().is_empty());
    }

    #[test]
    fn test_from_extremes() {
        let single = Box::from_extremes(3, 3, 3, 3);
        assert_eq!(single, Box::new_unchecked(3, 3, 1, 1));

        let b = Box::from_extremes(6, 7, 1, 2);
        assert_eq!(b, Box::new_unchecked(1, 2, 6, 6));
    }
}
