//! blobscan-color - Thresholding and color conversion
//!
//! This crate turns raw images into the binary input of the labeller:
//!
//! - **Thresholding** ([`threshold`]): global, strict, mean and local
//!   midpoint binarization
//! - **Color space conversion** ([`colorspace`]): RGB -> gray, RGB -> HSV,
//!   HSV range segmentation
//! - **Pseudo-color** ([`pseudocolor`]): gray -> false-color RGB for display

pub mod colorspace;
pub mod error;
pub mod pseudocolor;
pub mod threshold;

// Re-export error types
pub use error::{ColorError, ColorResult};

// Re-export color space types and functions
pub use colorspace::{
    // Types
    HsvRange,
    // Pixel-level conversions
    rgb_to_gray,
    rgb_to_hsv,
    // Image-level conversions
    hsv_segmentation,
    pix_rgb_to_gray,
    pix_rgb_to_hsv,
};

pub use pseudocolor::{gray_to_pseudo_color, pseudo_color};

// Re-export threshold functions
pub use threshold::{
    // Types
    ThresholdMethod,
    // Functions
    compute_mean_threshold,
    threshold_global,
    threshold_global_into,
    threshold_mean,
    threshold_mean_into,
    threshold_midpoint,
    threshold_midpoint_into,
    threshold_strict,
    threshold_strict_into,
};
