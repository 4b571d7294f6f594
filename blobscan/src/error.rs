//! Error type for the end-to-end pipeline

use thiserror::Error;

/// Errors raised by any stage of the blob pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] blobscan_core::Error),

    #[error(transparent)]
    Io(#[from] blobscan_io::IoError),

    #[error(transparent)]
    Color(#[from] blobscan_color::ColorError),

    #[error(transparent)]
    Morph(#[from] blobscan_morph::MorphError),

    #[error(transparent)]
    Region(#[from] blobscan_region::RegionError),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
