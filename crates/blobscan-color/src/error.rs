//! Error types for blobscan-color

use thiserror::Error;

/// Errors that can occur during color and threshold operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error (geometry mismatch, allocation failure, ...)
    #[error("core error: {0}")]
    Core(#[from] blobscan_core::Error),

    /// The image has the wrong number of channels for this operation
    #[error("unsupported channel count: expected {expected}, got {actual}")]
    UnsupportedChannels { expected: u32, actual: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;

/// Require a given channel count.
pub(crate) fn require_channels(channels: u32, expected: u32) -> ColorResult<()> {
    if channels != expected {
        return Err(ColorError::UnsupportedChannels {
            expected,
            actual: channels,
        });
    }
    Ok(())
}
