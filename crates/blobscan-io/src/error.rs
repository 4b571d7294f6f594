//! I/O error types
//!
//! Provides a unified error type for all image I/O operations, so that
//! callers only need to handle one error type.

use thiserror::Error;

/// Error type for image I/O operations.
///
/// Wraps decoding/encoding errors as well as standard I/O and
/// core-library errors.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a supported NetPBM variant
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The image data is structurally invalid
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// The image cannot be represented in any NetPBM variant
    #[error("encode error: {0}")]
    EncodeError(String),

    /// An error from the core library (e.g. invalid geometry)
    #[error("core error: {0}")]
    Core(#[from] blobscan_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
