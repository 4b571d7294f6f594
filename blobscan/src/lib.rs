//! blobscan - Blob detection on grayscale images
//!
//! Binarizes an image, cleans it up with square-kernel morphology, labels
//! the 8-connected foreground regions and measures each one.
//!
//! The stages live in separate crates, re-exported here as modules:
//!
//! - [`io`] - NetPBM reading and writing
//! - [`color`] - Thresholding and color conversion
//! - [`morph`] - Dilation, erosion, opening, closing
//! - [`region`] - Labelling and blob metrics
//!
//! [`BlobPipeline`] chains them.
//!
//! # Example
//!
//! ```
//! use blobscan::{PipelineOptions, Pix, detect_blobs};
//!
//! let pix = Pix::new(64, 48, 1, 255).unwrap();
//! let output = detect_blobs(&pix, &PipelineOptions::default()).unwrap();
//! assert_eq!(output.count(), 0);
//! ```

pub mod error;
pub mod pipeline;

// Re-export core types (primary data structures used everywhere)
pub use blobscan_core::*;

// Re-export stage crates as modules to avoid name conflicts
pub use blobscan_color as color;
pub use blobscan_io as io;
pub use blobscan_morph as morph;
pub use blobscan_region as region;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::{BlobPipeline, PipelineOptions, PipelineOutput, detect_blobs};
