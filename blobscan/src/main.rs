//! Command-line blob detector.
//!
//! Reads a PGM or PPM image, runs the blob pipeline and prints one line per
//! blob:
//!
//! ```text
//! label=1 area=4 bbox=1,1,2,2 centroid=1,1 perimeter=4
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use blobscan::color::ThresholdMethod;
use blobscan::morph::{MorphError, MorphOp, MorphSequence};
use blobscan::region::Blob;
use blobscan::{BlobPipeline, PipelineOptions, PipelineResult};
use clap::{ArgAction, Parser};

/// Detect and measure blobs in a grayscale image
#[derive(Parser, Debug)]
#[command(name = "blobscan")]
#[command(about = "Threshold, clean up, label and measure blobs in a NetPBM image")]
#[command(version)]
struct Args {
    /// Input image (PBM, PGM or PPM)
    input: PathBuf,

    /// Threshold method: global:T, strict:T, mean or midpoint:K
    #[arg(short, long, default_value = "mean")]
    threshold: ThresholdMethod,

    /// Opening kernel size
    #[arg(long, value_name = "K")]
    open: Option<u32>,

    /// Closing kernel size
    #[arg(long, value_name = "K")]
    close: Option<u32>,

    /// Dilation kernel size
    #[arg(long, value_name = "K")]
    dilate: Option<u32>,

    /// Erosion kernel size
    #[arg(long, value_name = "K")]
    erode: Option<u32>,

    /// Explicit morphology sequence, e.g. "o3 + d5"
    #[arg(
        long,
        value_name = "SEQ",
        value_parser = parse_sequence,
        conflicts_with_all = ["open", "close", "dilate", "erode"]
    )]
    morph: Option<MorphSequence>,

    /// Minimum blob area to report
    #[arg(long, default_value_t = 0)]
    min_area: u32,

    /// Maximum blob area to report
    #[arg(long)]
    max_area: Option<u32>,

    /// Write the label image to this path
    #[arg(long)]
    labels_out: Option<PathBuf>,

    /// Write the binary image to this path
    #[arg(long)]
    binary_out: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_sequence(s: &str) -> Result<MorphSequence, MorphError> {
    MorphSequence::parse(s)
}

impl Args {
    /// Individual flags run in the order open, close, dilate, erode.
    fn morphology(&self) -> Vec<MorphOp> {
        if let Some(seq) = &self.morph {
            return seq.ops().to_vec();
        }
        [
            self.open.map(MorphOp::Open),
            self.close.map(MorphOp::Close),
            self.dilate.map(MorphOp::Dilate),
            self.erode.map(MorphOp::Erode),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn options(&self) -> PipelineOptions {
        PipelineOptions::default()
            .with_threshold(self.threshold)
            .with_morphology(self.morphology())
            .with_min_area(self.min_area)
            .with_max_area(self.max_area.unwrap_or(u32::MAX))
    }
}

fn format_blob(blob: &Blob) -> String {
    let b = blob.bounds();
    let (xc, yc) = blob.centroid();
    format!(
        "label={} area={} bbox={},{},{},{} centroid={},{} perimeter={}",
        blob.label, blob.area, b.x, b.y, b.w, b.h, xc, yc, blob.perimeter
    )
}

fn run(args: &Args) -> PipelineResult<()> {
    let pix = blobscan::io::read_image(&args.input)?;
    let pipeline = BlobPipeline::new(args.options());
    let output = pipeline.run(&pix)?;

    if let Some(path) = &args.binary_out {
        blobscan::io::write_image(&output.binary, path)?;
    }
    if let Some(path) = &args.labels_out {
        blobscan::io::write_image(&output.labels, path)?;
    }

    for blob in &output.blobs {
        println!("{}", format_blob(blob));
    }
    println!("{} blob(s)", output.count());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("blobscan: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "blobscan",
            "in.pgm",
            "--threshold",
            "global:90",
            "--erode",
            "3",
            "--open",
            "5",
            "--min-area",
            "4",
        ])
        .unwrap();
        let opts = args.options();
        assert_eq!(opts.threshold, ThresholdMethod::Global(90));
        assert_eq!(opts.morphology, vec![MorphOp::Open(5), MorphOp::Erode(3)]);
        assert_eq!((opts.min_area, opts.max_area), (4, u32::MAX));
    }

    #[test]
    fn test_parse_sequence() {
        let args = Args::try_parse_from(["blobscan", "in.pgm", "--morph", "c3 + d5"]).unwrap();
        assert_eq!(args.morphology(), vec![MorphOp::Close(3), MorphOp::Dilate(5)]);
        assert_eq!(args.threshold, ThresholdMethod::Mean);

        let conflicting = ["blobscan", "in.pgm", "--morph", "c3", "--open", "3"];
        assert!(Args::try_parse_from(conflicting).is_err());
        assert!(Args::try_parse_from(["blobscan", "in.pgm", "--morph", "x3"]).is_err());
        assert!(Args::try_parse_from(["blobscan", "in.pgm", "-t", "midpoint:0"]).is_err());
    }

    #[test]
    fn test_format_blob() {
        let blob = Blob {
            label: 2,
            x: 6,
            y: 6,
            width: 2,
            height: 2,
            area: 4,
            xc: 6,
            yc: 6,
            perimeter: 4,
        };
        assert_eq!(
            format_blob(&blob),
            "label=2 area=4 bbox=6,6,2,2 centroid=6,6 perimeter=4"
        );
    }
}
