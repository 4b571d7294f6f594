//! Blob metrics
//!
//! Area, bounding box, centroid and perimeter for each labelled blob.

use crate::error::{RegionError, RegionResult};
use crate::label::{Labeling, MAX_LABELS, label_blobs};
use blobscan_core::{Box, Pix};

/// A labelled blob and its measurements.
///
/// Coordinates are in pixels. The perimeter counts blob pixels with at least
/// one 4-neighbour outside the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Blob {
    /// Label value of the blob's pixels in the label image
    pub label: u8,
    /// Left edge of the bounding box
    pub x: i32,
    /// Top edge of the bounding box
    pub y: i32,
    /// Bounding box width
    pub width: i32,
    /// Bounding box height
    pub height: i32,
    /// Number of pixels
    pub area: u32,
    /// Centroid x (integer mean of pixel x coordinates)
    pub xc: i32,
    /// Centroid y
    pub yc: i32,
    /// Number of boundary pixels
    pub perimeter: u32,
}

impl Blob {
    /// A blob with only its label set.
    pub fn with_label(label: u8) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }

    /// Bounding box.
    pub fn bounds(&self) -> Box {
        Box::new_unchecked(self.x, self.y, self.width, self.height)
    }

    /// Centroid as `(xc, yc)`.
    pub fn centroid(&self) -> (i32, i32) {
        (self.xc, self.yc)
    }
}

#[derive(Debug, Clone, Copy)]
struct Accumulator {
    area: u32,
    sum_x: u64,
    sum_y: u64,
    xmin: u32,
    ymin: u32,
    xmax: u32,
    ymax: u32,
    perimeter: u32,
}

impl Accumulator {
    const EMPTY: Self = Self {
        area: 0,
        sum_x: 0,
        sum_y: 0,
        xmin: u32::MAX,
        ymin: u32::MAX,
        xmax: 0,
        ymax: 0,
        perimeter: 0,
    };

    fn add(&mut self, x: u32, y: u32, boundary: bool) {
        self.area += 1;
        self.sum_x += u64::from(x);
        self.sum_y += u64::from(y);
        self.xmin = self.xmin.min(x);
        self.ymin = self.ymin.min(y);
        self.xmax = self.xmax.max(x);
        self.ymax = self.ymax.max(y);
        if boundary {
            self.perimeter += 1;
        }
    }

    fn store(&self, blob: &mut Blob) {
        blob.area = self.area;
        blob.perimeter = self.perimeter;
        if self.area == 0 {
            blob.x = 0;
            blob.y = 0;
            blob.width = 0;
            blob.height = 0;
            blob.xc = 0;
            blob.yc = 0;
            return;
        }
        let bounds = Box::from_extremes(
            self.xmin as i32,
            self.ymin as i32,
            self.xmax as i32,
            self.ymax as i32,
        );
        blob.x = bounds.x;
        blob.y = bounds.y;
        blob.width = bounds.w;
        blob.height = bounds.h;
        blob.xc = (self.sum_x / u64::from(self.area)) as i32;
        blob.yc = (self.sum_y / u64::from(self.area)) as i32;
    }
}

/// Fill in the measurements of `blobs` from a label image.
///
/// Only the interior of `labels` (everything but the outermost rows and
/// columns) is scanned, matching what [`label_blobs`] writes. A blob whose
/// label does not occur, or lies outside `1..=MAX_LABELS`, gets area 0, an
/// empty bounding box and centroid (0, 0). Background pixels are never
/// measured.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedChannels`] unless `labels` has one
/// channel.
pub fn blob_info(labels: &Pix, blobs: &mut [Blob]) -> RegionResult<()> {
    if labels.channels() != 1 {
        return Err(RegionError::UnsupportedChannels {
            expected: 1,
            actual: labels.channels(),
        });
    }

    let mut wanted = [false; 256];
    for blob in blobs.iter().filter(|b| (1..=MAX_LABELS).contains(&usize::from(b.label))) {
        wanted[usize::from(blob.label)] = true;
    }

    let (width, height) = (labels.width(), labels.height());
    let mut acc = [Accumulator::EMPTY; 256];
    for y in 1..height.saturating_sub(1) {
        let (above, row, below) = (labels.row(y - 1), labels.row(y), labels.row(y + 1));
        for x in 1..width.saturating_sub(1) {
            let xi = x as usize;
            let v = row[xi];
            if !wanted[usize::from(v)] {
                continue;
            }
            let boundary =
                above[xi] != v || below[xi] != v || row[xi - 1] != v || row[xi + 1] != v;
            acc[usize::from(v)].add(x, y, boundary);
        }
    }

    for blob in blobs.iter_mut() {
        acc[usize::from(blob.label)].store(blob);
    }
    Ok(())
}

/// Label a binary image and measure every blob.
///
/// # Example
///
/// ```
/// use blobscan_region::analyze_blobs;
/// use blobscan_core::PixMut;
///
/// let mut pix = PixMut::new(7, 7, 1, 255).unwrap();
/// pix.set_pixel(3, 3, 255).unwrap();
/// let labeling = analyze_blobs(&pix.into()).unwrap();
/// let blob = labeling.blobs()[0];
/// assert_eq!((blob.area, blob.perimeter), (1, 1));
/// assert_eq!(blob.centroid(), (3, 3));
/// ```
pub fn analyze_blobs(src: &Pix) -> RegionResult<Labeling> {
    let mut labeling = label_blobs(src)?;
    if let Some(blobs) = labeling.blobs.as_mut() {
        blob_info(&labeling.labels, blobs)?;
        log::debug!("measured {} blob(s)", blobs.len());
    }
    Ok(labeling)
}

/// Keep the blobs whose area lies in `min_area..=max_area`.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] if `min_area > max_area`.
pub fn filter_by_area(blobs: &[Blob], min_area: u32, max_area: u32) -> RegionResult<Vec<Blob>> {
    if min_area > max_area {
        return Err(RegionError::InvalidParameters(format!(
            "min_area {min_area} exceeds max_area {max_area}"
        )));
    }
    Ok(blobs
        .iter()
        .filter(|b| (min_area..=max_area).contains(&b.area))
        .copied()
        .collect())
}

/// The blob with the largest area; the first one on ties.
pub fn largest_blob(blobs: &[Blob]) -> Option<&Blob> {
    blobs.iter().rev().max_by_key(|b| b.area)
}
