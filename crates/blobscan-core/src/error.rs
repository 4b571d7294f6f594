//! Error types for blobscan-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// blobscan core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid channel count
    #[error("invalid channel count: {0} (expected 1 or 3)")]
    InvalidChannels(u32),

    /// Invalid level depth
    #[error("invalid level depth: {0} (expected 1..=255)")]
    InvalidLevels(u32),

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Image dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Channel count mismatch between paired images
    #[error("channel mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: u32, actual: u32 },

    /// Buffer length does not match the declared geometry
    #[error("buffer length {actual} does not match geometry ({expected} expected)")]
    BufferLength { expected: usize, actual: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Memory allocation failed
    #[error("memory allocation failed")]
    AllocationFailed,
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
