//! Error types for blobscan-morph

use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobscan_core::Error),

    /// Invalid structuring element
    #[error("invalid structuring element: {0}")]
    InvalidSel(String),

    /// Invalid sequence format
    #[error("invalid sequence: {0}")]
    InvalidSequence(String),
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
