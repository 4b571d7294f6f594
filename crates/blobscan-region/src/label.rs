//! Two-pass connected-component labelling
//!
//! Foreground pixels (any nonzero sample) are grouped into 8-connected
//! blobs. The first pass scans the interior in raster order and looks at the
//! four already-visited neighbours
//!
//! ```text
//!   A B C
//!   D x
//! ```
//!
//! assigning a fresh provisional label when all four are background, or the
//! smallest canonical label among them otherwise. Disagreeing neighbours are
//! merged in an [`EquivalenceTable`]. The distinct canonical labels are then
//! numbered 1..=n in ascending order, and the second pass rewrites every
//! provisional label with that final number.
//!
//! The one-pixel border of the image is always background in the output.
//! Labels are stored in an 8-bit image, so at most [`MAX_LABELS`]
//! provisional labels can be issued; value 255 is reserved for unlabelled
//! foreground during the first pass.

use crate::blob::Blob;
use crate::error::{RegionError, RegionResult};
use blobscan_core::{BACKGROUND, FOREGROUND, Pix, PixMut};

/// Maximum number of provisional labels a single image may use.
pub const MAX_LABELS: usize = 254;

/// Equivalence table mapping provisional labels to canonical labels.
///
/// Index 0 is background and never issued. Every entry points directly at
/// its canonical label (the smallest provisional label of its class), so
/// lookups never chase chains; merging sweeps the whole table instead.
#[derive(Debug, Clone)]
pub struct EquivalenceTable {
    table: Vec<u8>,
}

impl Default for EquivalenceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl EquivalenceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        let mut table = Vec::with_capacity(MAX_LABELS + 1);
        table.push(BACKGROUND);
        Self { table }
    }

    /// Number of provisional labels issued so far.
    pub fn len(&self) -> usize {
        self.table.len() - 1
    }

    /// Check whether no label has been issued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Issue the next provisional label, initially its own canonical label.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::CapacityExceeded`] once [`MAX_LABELS`] labels
    /// have been issued.
    pub fn new_label(&mut self) -> RegionResult<u8> {
        let next = self.table.len();
        if next > MAX_LABELS {
            return Err(RegionError::CapacityExceeded { max: MAX_LABELS });
        }
        let label = next as u8;
        self.table.push(label);
        Ok(label)
    }

    /// Canonical label of a provisional label.
    ///
    /// Labels that were never issued map to background.
    #[inline]
    pub fn canonical(&self, label: u8) -> u8 {
        self.table
            .get(usize::from(label))
            .copied()
            .unwrap_or(BACKGROUND)
    }

    /// Redirect every label whose canonical label is `from` to `into`.
    ///
    /// Returns the number of entries rewritten.
    pub fn merge(&mut self, from: u8, into: u8) -> usize {
        if from == into || from == BACKGROUND {
            return 0;
        }
        let mut rewritten = 0;
        for entry in self.table.iter_mut().skip(1) {
            if *entry == from {
                *entry = into;
                rewritten += 1;
            }
        }
        rewritten
    }

    /// Distinct canonical labels in ascending order.
    pub fn canonical_labels(&self) -> Vec<u8> {
        let mut seen = [false; 256];
        let mut labels = Vec::new();
        for &entry in self.table.iter().skip(1) {
            if entry != BACKGROUND && !seen[usize::from(entry)] {
                seen[usize::from(entry)] = true;
                labels.push(entry);
            }
        }
        labels
    }

    /// Final label for every provisional label, indexed by provisional
    /// label.
    ///
    /// Canonical labels are numbered 1..=n in ascending order, so the final
    /// labels are contiguous. Index 0 maps to background.
    pub fn compact(&self) -> Vec<u8> {
        let mut rank = [BACKGROUND; 256];
        for (i, &label) in self.canonical_labels().iter().enumerate() {
            rank[usize::from(label)] = (i + 1) as u8;
        }
        self.table
            .iter()
            .map(|&entry| rank[usize::from(entry)])
            .collect()
    }
}

/// Result of labelling a binary image.
#[derive(Debug, Clone)]
pub struct Labeling {
    /// Label image: 1 channel, each blob pixel holds its blob's label
    pub labels: Pix,
    /// One entry per blob in ascending label order, `None` if there are no
    /// blobs. Only `label` is filled in until [`crate::blob_info`] runs.
    pub blobs: Option<Vec<Blob>>,
}

impl Labeling {
    /// Number of blobs found.
    pub fn count(&self) -> usize {
        self.blobs.as_ref().map_or(0, Vec::len)
    }

    /// Blobs as a slice, empty when none were found.
    pub fn blobs(&self) -> &[Blob] {
        self.blobs.as_deref().unwrap_or(&[])
    }
}

/// Label the connected foreground regions of a binary image.
///
/// # Errors
///
/// - [`RegionError::UnsupportedChannels`] unless `src` has one channel
/// - [`RegionError::CapacityExceeded`] if more than [`MAX_LABELS`]
///   provisional labels are needed
///
/// # Example
///
/// ```
/// use blobscan_core::PixMut;
/// use blobscan_region::label_blobs;
///
/// let mut pix = PixMut::new(7, 7, 1, 255).unwrap();
/// pix.set_pixel(3, 3, 255).unwrap();
/// let labeling = label_blobs(&pix.into()).unwrap();
/// assert_eq!(labeling.count(), 1);
/// assert_eq!(labeling.labels.get_pixel(3, 3), Some(1));
/// ```
pub fn label_blobs(src: &Pix) -> RegionResult<Labeling> {
    let mut dst = src.create_template();
    let blobs = label_blobs_into(src, &mut dst)?;
    Ok(Labeling {
        labels: dst.into(),
        blobs,
    })
}

/// Label `src` into a caller-supplied destination of the same geometry.
///
/// The destination's contents are replaced and its levels set to 255. On
/// error the destination holds a partially labelled image.
pub fn label_blobs_into(src: &Pix, dst: &mut PixMut) -> RegionResult<Option<Vec<Blob>>> {
    if src.channels() != 1 {
        return Err(RegionError::UnsupportedChannels {
            expected: 1,
            actual: src.channels(),
        });
    }
    dst.check_pair(src)?;
    dst.set_levels(255)?;

    let width = src.width() as usize;
    let height = src.height() as usize;
    let stride = dst.stride() as usize;

    for y in 0..src.height() {
        let row = dst.row_mut(y);
        for (d, &s) in row.iter_mut().zip(src.row(y)) {
            *d = if s != BACKGROUND { FOREGROUND } else { BACKGROUND };
        }
    }
    clear_border(dst);

    let data = dst.data_mut();
    let mut table = EquivalenceTable::new();
    let mut merges = 0usize;

    // Pass 1: provisional labels and equivalences
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let pos = y * stride + x;
            if data[pos] == BACKGROUND {
                continue;
            }
            let above = pos - stride;
            let neighbors = [data[above - 1], data[above], data[above + 1], data[pos - 1]];

            if neighbors.iter().all(|&n| n == BACKGROUND) {
                data[pos] = match table.new_label() {
                    Ok(label) => label,
                    Err(e) => {
                        log::warn!("labelling aborted at ({x}, {y}): {e}");
                        return Err(e);
                    }
                };
                continue;
            }

            let num = neighbors
                .iter()
                .filter(|&&n| n != BACKGROUND)
                .map(|&n| table.canonical(n))
                .fold(u8::MAX, u8::min);
            data[pos] = num;

            for n in neighbors {
                if n == BACKGROUND {
                    continue;
                }
                let canonical = table.canonical(n);
                if canonical != num {
                    table.merge(canonical, num);
                    merges += 1;
                }
            }
        }
    }

    // Pass 2: provisional -> final labels
    let lookup = table.compact();
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let pos = y * stride + x;
            if data[pos] != BACKGROUND {
                data[pos] = lookup[usize::from(data[pos])];
            }
        }
    }

    let count = lookup.iter().copied().max().unwrap_or(BACKGROUND);
    log::debug!(
        "labelling {width}x{height}: {} provisional label(s), {merges} merge(s), {count} blob(s)",
        table.len()
    );

    if count == BACKGROUND {
        return Ok(None);
    }
    Ok(Some((1..=count).map(Blob::with_label).collect()))
}

/// Set the outermost rows and columns to background.
fn clear_border(pix: &mut PixMut) {
    let (width, height) = (pix.width(), pix.height());
    pix.row_mut(0).fill(BACKGROUND);
    pix.row_mut(height - 1).fill(BACKGROUND);
    for y in 0..height {
        let row = pix.row_mut(y);
        row[0] = BACKGROUND;
        row[width as usize - 1] = BACKGROUND;
    }
}

/// Re-binarize a label image: every labelled pixel becomes foreground.
pub fn labels_to_binary(labels: &Pix) -> RegionResult<Pix> {
    if labels.channels() != 1 {
        return Err(RegionError::UnsupportedChannels {
            expected: 1,
            actual: labels.channels(),
        });
    }
    let mut dst = labels.create_template();
    dst.set_levels(255)?;
    for (d, &s) in dst.data_mut().iter_mut().zip(labels.data()) {
        *d = if s != BACKGROUND { FOREGROUND } else { BACKGROUND };
    }
    Ok(dst.into())
}
