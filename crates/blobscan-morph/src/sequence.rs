//! Morphological sequence operations
//!
//! A cleanup pass between thresholding and labelling is zero or more
//! square-kernel operations applied in order. Sequences can be built as
//! a slice of [`MorphOp`] or parsed from a string.
//!
//! # Sequence String Format
//!
//! Operations are separated by `+` and whitespace is ignored.
//! Each operation is a case-insensitive letter followed by the kernel:
//!
//! - `d<k>` - Dilation with a k x k square
//! - `e<k>` - Erosion with a k x k square
//! - `o<k>` - Opening with a k x k square
//! - `c<k>` - Closing with a k x k square
//!
//! # Examples
//!
//! ```
//! use blobscan_core::Pix;
//! use blobscan_morph::sequence::{MorphSequence, apply_sequence};
//!
//! let seq = MorphSequence::parse("o3 + d5").unwrap();
//! assert_eq!(seq.len(), 2);
//!
//! let pix = Pix::new(20, 20, 1, 255).unwrap();
//! let result = apply_sequence(&pix, seq.ops()).unwrap();
//! ```

use crate::{MorphError, MorphResult, close, dilate, erode, open};
use blobscan_core::Pix;
use std::fmt;

/// A single morphological operation with its square kernel size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphOp {
    /// Dilation (local maximum)
    Dilate(u32),
    /// Erosion (local minimum)
    Erode(u32),
    /// Opening (erosion followed by dilation)
    Open(u32),
    /// Closing (dilation followed by erosion)
    Close(u32),
}

impl MorphOp {
    /// Get the kernel size of the operation
    pub fn kernel(&self) -> u32 {
        match *self {
            MorphOp::Dilate(k) | MorphOp::Erode(k) | MorphOp::Open(k) | MorphOp::Close(k) => k,
        }
    }

    /// Apply this operation to an image.
    pub fn apply(&self, src: &Pix) -> MorphResult<Pix> {
        match *self {
            MorphOp::Dilate(k) => dilate(src, k),
            MorphOp::Erode(k) => erode(src, k),
            MorphOp::Open(k) => open(src, k),
            MorphOp::Close(k) => close(src, k),
        }
    }
}

impl fmt::Display for MorphOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            MorphOp::Dilate(_) => 'd',
            MorphOp::Erode(_) => 'e',
            MorphOp::Open(_) => 'o',
            MorphOp::Close(_) => 'c',
        };
        write!(f, "{}{}", letter, self.kernel())
    }
}

/// A parsed morphological sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MorphSequence {
    /// The operations in the sequence
    ops: Vec<MorphOp>,
}

impl MorphSequence {
    /// Parse a sequence string into a MorphSequence
    ///
    /// # Arguments
    ///
    /// * `sequence` - The sequence string (e.g., "o5 + e3")
    ///
    /// # Returns
    ///
    /// A parsed MorphSequence, or an error if the sequence is invalid.
    pub fn parse(sequence: &str) -> MorphResult<Self> {
        if sequence.trim().is_empty() {
            return Err(MorphError::InvalidSequence("empty sequence".to_string()));
        }

        let ops = sequence
            .split('+')
            .enumerate()
            .map(|(i, part)| Self::parse_operation(part, i + 1))
            .collect::<MorphResult<Vec<_>>>()?;

        Ok(MorphSequence { ops })
    }

    /// Parse a single operation string
    fn parse_operation(part: &str, position: usize) -> MorphResult<MorphOp> {
        let op_str: String = part.chars().filter(|c| !c.is_whitespace()).collect();

        let mut chars = op_str.chars();
        let Some(first) = chars.next() else {
            return Err(MorphError::InvalidSequence(format!(
                "empty operation at position {}",
                position
            )));
        };

        let rest = chars.as_str();
        let kernel: u32 = rest.parse().map_err(|_| {
            MorphError::InvalidSequence(format!("invalid kernel '{}' in '{}'", rest, op_str))
        })?;
        if kernel == 0 {
            return Err(MorphError::InvalidSequence(format!(
                "kernel must be > 0 in '{}'",
                op_str
            )));
        }

        match first.to_ascii_lowercase() {
            'd' => Ok(MorphOp::Dilate(kernel)),
            'e' => Ok(MorphOp::Erode(kernel)),
            'o' => Ok(MorphOp::Open(kernel)),
            'c' => Ok(MorphOp::Close(kernel)),
            other => Err(MorphError::InvalidSequence(format!(
                "unknown operation '{}' in '{}'",
                other, op_str
            ))),
        }
    }

    /// Get the operations in this sequence
    pub fn ops(&self) -> &[MorphOp] {
        &self.ops
    }

    /// Get the number of operations in the sequence
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl From<Vec<MorphOp>> for MorphSequence {
    fn from(ops: Vec<MorphOp>) -> Self {
        MorphSequence { ops }
    }
}

impl fmt::Display for MorphSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

/// Apply a sequence of operations in order
///
/// An empty sequence returns a shared handle to `src`.
///
/// # Errors
///
/// Stops at and returns the first failing operation's error.
pub fn apply_sequence(src: &Pix, ops: &[MorphOp]) -> MorphResult<Pix> {
    let mut current = src.clone();
    for op in ops {
        log::debug!("morphology: {op}");
        current = op.apply(&current)?;
    }
    Ok(current)
}

/// Parse and apply a sequence string
pub fn morph_sequence(src: &Pix, sequence: &str) -> MorphResult<Pix> {
    let seq = MorphSequence::parse(sequence)?;
    apply_sequence(src, seq.ops())
}
