//! End-to-end blob detection
//!
//! gray conversion -> threshold -> morphology -> labelling -> metrics ->
//! area filter.

use crate::error::PipelineResult;
use blobscan_color::{ThresholdMethod, pix_rgb_to_gray};
use blobscan_core::Pix;
use blobscan_morph::{MorphOp, apply_sequence};
use blobscan_region::{Blob, analyze_blobs, filter_by_area};

/// Options for [`BlobPipeline`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// How the gray image is binarized
    pub threshold: ThresholdMethod,
    /// Cleanup passes applied to the binary image, in order
    pub morphology: Vec<MorphOp>,
    /// Smallest blob area kept (inclusive)
    pub min_area: u32,
    /// Largest blob area kept (inclusive)
    pub max_area: u32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            threshold: ThresholdMethod::default(),
            morphology: Vec::new(),
            min_area: 0,
            max_area: u32::MAX,
        }
    }
}

impl PipelineOptions {
    /// Set the threshold method
    pub fn with_threshold(mut self, threshold: ThresholdMethod) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the morphology passes
    pub fn with_morphology(mut self, ops: impl Into<Vec<MorphOp>>) -> Self {
        self.morphology = ops.into();
        self
    }

    /// Append one morphology pass
    pub fn with_op(mut self, op: MorphOp) -> Self {
        self.morphology.push(op);
        self
    }

    /// Set the minimum blob area
    pub fn with_min_area(mut self, min_area: u32) -> Self {
        self.min_area = min_area;
        self
    }

    /// Set the maximum blob area
    pub fn with_max_area(mut self, max_area: u32) -> Self {
        self.max_area = max_area;
        self
    }
}

/// Everything the pipeline produced
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Binary image after thresholding and morphology
    pub binary: Pix,
    /// Label image
    pub labels: Pix,
    /// Every labelled blob, in label order
    pub all_blobs: Vec<Blob>,
    /// Blobs that passed the area filter
    pub blobs: Vec<Blob>,
}

impl PipelineOutput {
    /// Number of blobs that passed the area filter.
    pub fn count(&self) -> usize {
        self.blobs.len()
    }
}

/// A configured blob detector
///
/// # Example
///
/// ```
/// use blobscan::{BlobPipeline, PipelineOptions, PixMut};
/// use blobscan::color::ThresholdMethod;
///
/// let mut pix = PixMut::new(9, 9, 1, 255).unwrap();
/// for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
///     pix.set_pixel(x, y, 200).unwrap();
/// }
/// let pipeline = BlobPipeline::new(
///     PipelineOptions::default().with_threshold(ThresholdMethod::Global(128)),
/// );
/// let output = pipeline.run(&pix.into()).unwrap();
/// assert_eq!(output.count(), 1);
/// assert_eq!(output.blobs[0].area, 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BlobPipeline {
    options: PipelineOptions,
}

impl BlobPipeline {
    /// Create a pipeline with the given options.
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// The pipeline's options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run every stage on `src`.
    ///
    /// Three-channel input is converted to gray first.
    pub fn run(&self, src: &Pix) -> PipelineResult<PipelineOutput> {
        let opts = &self.options;
        let gray = if src.channels() == 3 {
            log::debug!("converting {}x{} RGB input to gray", src.width(), src.height());
            pix_rgb_to_gray(src)?
        } else {
            src.clone()
        };

        log::info!("threshold: {}", opts.threshold);
        let binary = opts.threshold.apply(&gray)?;
        let binary = apply_sequence(&binary, &opts.morphology)?;

        let labeling = analyze_blobs(&binary)?;
        let all_blobs = labeling.blobs.unwrap_or_default();
        let blobs = filter_by_area(&all_blobs, opts.min_area, opts.max_area)?;
        log::info!(
            "{} blob(s) labelled, {} within area {}..={}",
            all_blobs.len(),
            blobs.len(),
            opts.min_area,
            opts.max_area
        );

        Ok(PipelineOutput {
            binary,
            labels: labeling.labels,
            all_blobs,
            blobs,
        })
    }
}

/// Run the pipeline once with `options`.
pub fn detect_blobs(src: &Pix, options: &PipelineOptions) -> PipelineResult<PipelineOutput> {
    BlobPipeline::new(options.clone()).run(src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobscan_core::PixMut;

    #[test]
    fn test_options_builder() {
        let opts = PipelineOptions::default()
            .with_threshold(ThresholdMethod::Global(10))
            .with_op(MorphOp::Close(3))
            .with_op(MorphOp::Open(3))
            .with_min_area(2)
            .with_max_area(50);
        assert_eq!(opts.threshold, ThresholdMethod::Global(10));
        assert_eq!(opts.morphology, vec![MorphOp::Close(3), MorphOp::Open(3)]);
        assert_eq!((opts.min_area, opts.max_area), (2, 50));
        assert_eq!(
            opts.with_morphology(vec![MorphOp::Erode(1)]).morphology,
            vec![MorphOp::Erode(1)]
        );
    }

    #[test]
    fn test_rgb_input() {
        let mut pix = PixMut::new(6, 6, 3, 255).unwrap();
        pix.set_rgb(2, 2, 255, 255, 255).unwrap();
        pix.set_rgb(3, 2, 255, 255, 255).unwrap();
        let opts = PipelineOptions::default().with_threshold(ThresholdMethod::Global(128));
        let output = detect_blobs(&pix.into(), &opts).unwrap();
        assert_eq!(output.binary.channels(), 1);
        assert_eq!(output.count(), 1);
        assert_eq!(output.blobs[0].area, 2);
    }

    #[test]
    fn test_empty_scene() {
        let pix = Pix::new(8, 8, 1, 255).unwrap();
        let output = detect_blobs(&pix, &PipelineOptions::default()).unwrap();
        assert_eq!(output.count(), 0);
        assert!(output.all_blobs.is_empty());
    }

    #[test]
    fn test_bad_area_range() {
        let mut pix = PixMut::new(5, 5, 1, 255).unwrap();
        pix.set_pixel(2, 2, 255).unwrap();
        let opts = PipelineOptions::default().with_min_area(10).with_max_area(1);
        assert!(detect_blobs(&pix.into(), &opts).is_err());
    }
}
