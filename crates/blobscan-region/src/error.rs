//! Error types for blobscan-region

use thiserror::Error;

/// Errors that can occur during labelling and blob analysis
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] blobscan_core::Error),

    /// The image has the wrong number of channels for this operation
    #[error("unsupported channel count: expected {expected}, got {actual}")]
    UnsupportedChannels { expected: u32, actual: u32 },

    /// More provisional labels were needed than the label table can hold
    #[error("label capacity exceeded: more than {max} provisional labels")]
    CapacityExceeded { max: usize },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
