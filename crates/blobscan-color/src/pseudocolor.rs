//! Pseudo-color rendering of grayscale images
//!
//! Maps intensity onto a four-band blue -> cyan -> green -> yellow -> red
//! ramp for visual inspection of gray or label images.

use crate::error::{ColorResult, require_channels};
use blobscan_core::Pix;

/// Map one gray value to an RGB triple.
///
/// | gray       | red            | green            | blue             |
/// |------------|----------------|------------------|------------------|
/// | 0..=64     | 0              | 4v               | 255              |
/// | 65..=128   | 0              | 255              | 255 - 4(v - 64)  |
/// | 129..=192  | 4(v - 128)     | 255              | 0                |
/// | 193..=255  | 255            | 255 - 4(v - 192) | 0                |
///
/// Each component is clamped to 0..=255.
pub fn pseudo_color(v: u8) -> (u8, u8, u8) {
    let v = i32::from(v);
    let clamp = |c: i32| c.clamp(0, 255) as u8;
    match v {
        0..=64 => (0, clamp(4 * v), 255),
        65..=128 => (0, 255, clamp(255 - 4 * (v - 64))),
        129..=192 => (clamp(4 * (v - 128)), 255, 0),
        _ => (255, clamp(255 - 4 * (v - 192)), 0),
    }
}

/// Render a single-channel image as a 3-channel pseudo-color image.
///
/// # Errors
///
/// Returns [`crate::ColorError::UnsupportedChannels`] for multi-channel
/// input.
pub fn gray_to_pseudo_color(src: &Pix) -> ColorResult<Pix> {
    require_channels(src.channels(), 1)?;
    let mut dst = src.create_template_with(3, 255)?;
    for (d, &s) in dst.data_mut().chunks_exact_mut(3).zip(src.data()) {
        let (r, g, b) = pseudo_color(s);
        d.copy_from_slice(&[r, g, b]);
    }
    Ok(dst.into())
}
