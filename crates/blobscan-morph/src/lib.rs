//! blobscan-morph - Morphological operations
//!
//! Square-kernel cleanup applied between thresholding and labelling:
//!
//! - **Structuring element** ([`sel`]): the square `kernel x kernel` window
//! - **Grayscale morphology** ([`grayscale`]): dilate, erode, open, close
//! - **Sequences** ([`sequence`]): ordered lists of operations, parsed from
//!   strings such as `"o3 + d5"`

pub mod error;
pub mod grayscale;
pub mod sel;
pub mod sequence;

pub use error::{MorphError, MorphResult};
pub use grayscale::{close, dilate, dilate_into, erode, erode_into, open};
pub use sel::Sel;
pub use sequence::{MorphOp, MorphSequence, apply_sequence, morph_sequence};
