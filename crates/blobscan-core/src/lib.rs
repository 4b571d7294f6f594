//! blobscan core - Basic data structures for blob analysis
//!
//! This crate provides the fundamental data structures shared by every
//! pipeline stage:
//!
//! - [`Pix`] / [`PixMut`] - The image container (immutable / mutable)
//! - [`Box`] - Rectangle regions (blob bounding boxes)
//!
//! Per-pixel arithmetic (`subtract`, `mask_fill`, `invert`) and histogram
//! utilities (`gray_histogram`, `equalize_histogram`, `histogram_plot`) are
//! methods on [`Pix`].

pub mod box_;
pub mod error;
pub mod pix;

pub use box_::Box;
pub use error::{Error, Result};
pub use pix::{BACKGROUND, FOREGROUND, Pix, PixMut};
