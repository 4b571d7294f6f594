//! blobscan-test - Regression test framework for blobscan
//!
//! Every `tests/*_reg.rs` file drives its checks through [`RegParams`],
//! which supports three modes:
//!
//! - **Generate**: Write golden files for later comparison
//! - **Compare**: Compare results with golden files (default)
//! - **Display**: Run tests without comparison
//!
//! # Usage
//!
//! ```ignore
//! use blobscan_test::RegParams;
//!
//! let mut rp = RegParams::new("label");
//! rp.compare_values(2.0, labeling.count() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use blobscan_core::{BACKGROUND, FOREGROUND, Pix, PixMut};

/// Build a binary image from ASCII art.
///
/// Every row must have the same length. `#` becomes a foreground (255)
/// pixel, anything else background.
///
/// # Panics
///
/// Panics on an empty picture or ragged rows.
pub fn binary_from_rows(rows: &[&str]) -> Pix {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    let mut pix = PixMut::new(width, height, 1, 255).expect("valid picture size");
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.len() as u32, width, "ragged row {y}");
        for (x, c) in row.bytes().enumerate() {
            let v = if c == b'#' { FOREGROUND } else { BACKGROUND };
            pix.set_pixel(x as u32, y as u32, v).expect("in bounds");
        }
    }
    pix.into()
}

/// Build a single-channel image whose sample at (x, y) is `f(x, y)`.
///
/// # Panics
///
/// Panics if the geometry is invalid.
pub fn gray_from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> Pix {
    let mut pix = PixMut::new(width, height, 1, 255).expect("valid geometry");
    for y in 0..height {
        for x in 0..width {
            pix.set_pixel_unchecked(x, y, f(x, y));
        }
    }
    pix.into()
}

/// Count foreground (255) samples.
pub fn count_foreground(pix: &Pix) -> usize {
    pix.data().iter().filter(|&&v| v == FOREGROUND).count()
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    // blobscan-test is at crates/blobscan-test
    format!("{}/../..", env!("CARGO_MANIFEST_DIR"))
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_from_rows() {
        let pix = binary_from_rows(&["#..", ".#.", "..."]);
        assert_eq!(pix.width(), 3);
        assert_eq!(pix.height(), 3);
        assert_eq!(pix.get_pixel(0, 0), Some(255));
        assert_eq!(pix.get_pixel(1, 1), Some(255));
        assert_eq!(pix.get_pixel(2, 2), Some(0));
        assert_eq!(count_foreground(&pix), 2);
    }

    #[test]
    fn test_gray_from_fn() {
        let pix = gray_from_fn(4, 2, |x, y| (x + 10 * y) as u8);
        assert_eq!(pix.get_pixel(3, 1), Some(13));
    }
}
