//! blobscan-io - NetPBM image I/O
//!
//! Reads PBM, PGM and PPM files (ASCII and binary) into [`Pix`] and
//! writes them back in the binary variants.
//!
//! # Example
//!
//! ```
//! use blobscan_core::Pix;
//! use blobscan_io::{read_image_mem, write_image_mem};
//!
//! let pix = Pix::from_raw(2, 2, 1, 255, vec![0, 64, 128, 255]).unwrap();
//! let bytes = write_image_mem(&pix).unwrap();
//! let back = read_image_mem(&bytes).unwrap();
//! assert!(pix.equals(&back));
//! ```

pub mod error;
pub mod pnm;

pub use error::{IoError, IoResult};
pub use pnm::{PnmFormat, read_pnm, write_pnm};

use blobscan_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read an image from a file path.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a valid
/// NetPBM image.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let pix = read_pnm(BufReader::new(file))?;
    log::info!(
        "read {} ({}x{}, {} channel(s), levels {})",
        path.display(),
        pix.width(),
        pix.height(),
        pix.channels(),
        pix.levels()
    );
    Ok(pix)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    read_pnm(data)
}

/// Write an image to a file path.
///
/// The variant (P4/P5/P6) follows the image; see [`write_pnm`].
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_pnm(pix, BufWriter::new(file))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Encode an image into a new buffer.
pub fn write_image_mem(pix: &Pix) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_pnm(pix, &mut out)?;
    Ok(out)
}
