//! blobscan-region - Blob labelling and measurement
//!
//! This crate groups the foreground of a binary image into 8-connected
//! blobs and measures them:
//!
//! - Two-pass labelling with an equivalence table ([`label_blobs`])
//! - Per-blob area, bounding box, centroid and perimeter ([`blob_info`])
//! - Area filtering and selection helpers
//!
//! # Example
//!
//! ```
//! use blobscan_core::PixMut;
//! use blobscan_region::analyze_blobs;
//!
//! let mut pix = PixMut::new(9, 9, 1, 255).unwrap();
//! for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2), (6, 6)] {
//!     pix.set_pixel(x, y, 255).unwrap();
//! }
//! let labeling = analyze_blobs(&pix.into()).unwrap();
//! assert_eq!(labeling.count(), 2);
//! assert_eq!(labeling.blobs()[0].area, 4);
//! ```

pub mod blob;
pub mod error;
pub mod label;

pub use blob::{Blob, analyze_blobs, blob_info, filter_by_area, largest_blob};
pub use error::{RegionError, RegionResult};
pub use label::{
    EquivalenceTable, Labeling, MAX_LABELS, label_blobs, label_blobs_into, labels_to_binary,
};
