//! PNM (Portable Any Map) format support
//!
//! Reads PBM (P1 ASCII, P4 binary), PGM (P2 ASCII, P5 binary) and
//! PPM (P3 ASCII, P6 binary). Writes the binary variants only.
//!
//! Header tokens are separated by whitespace; a `#` starts a comment that
//! runs to the end of the line. Exactly one whitespace byte separates the
//! last header token from a binary raster.
//!
//! Bitmaps decode to channels 1 / levels 1 with sample 1 for a white
//! pixel and 0 for a black one (a set bit in the file is black).

use crate::{IoError, IoResult};
use blobscan_core::{Pix, PixMut};
use std::io::{BufRead, ErrorKind, Read, Write};

/// The six NetPBM variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PnmFormat {
    /// P1: ASCII bitmap
    PbmAscii,
    /// P2: ASCII graymap
    PgmAscii,
    /// P3: ASCII pixmap
    PpmAscii,
    /// P4: packed binary bitmap
    Pbm,
    /// P5: binary graymap
    Pgm,
    /// P6: binary pixmap
    Ppm,
}

impl PnmFormat {
    /// Parse a magic token such as `"P5"`.
    pub fn from_magic(magic: &str) -> Option<Self> {
        Some(match magic {
            "P1" => Self::PbmAscii,
            "P2" => Self::PgmAscii,
            "P3" => Self::PpmAscii,
            "P4" => Self::Pbm,
            "P5" => Self::Pgm,
            "P6" => Self::Ppm,
            _ => return None,
        })
    }

    /// The binary variant used to store `pix`.
    ///
    /// Level depth 1 selects P4, otherwise the channel count picks P5 or P6.
    pub fn for_pix(pix: &Pix) -> Self {
        if pix.levels() == 1 && pix.channels() == 1 {
            Self::Pbm
        } else if pix.channels() == 3 {
            Self::Ppm
        } else {
            Self::Pgm
        }
    }

    /// The magic token written at the start of the file.
    pub fn magic(self) -> &'static str {
        match self {
            Self::PbmAscii => "P1",
            Self::PgmAscii => "P2",
            Self::PpmAscii => "P3",
            Self::Pbm => "P4",
            Self::Pgm => "P5",
            Self::Ppm => "P6",
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::PbmAscii | Self::Pbm => "pbm",
            Self::PgmAscii | Self::Pgm => "pgm",
            Self::PpmAscii | Self::Ppm => "ppm",
        }
    }

    fn channels(self) -> u32 {
        match self {
            Self::PpmAscii | Self::Ppm => 3,
            _ => 1,
        }
    }

    fn is_bitmap(self) -> bool {
        matches!(self, Self::PbmAscii | Self::Pbm)
    }

    fn is_ascii(self) -> bool {
        matches!(self, Self::PbmAscii | Self::PgmAscii | Self::PpmAscii)
    }
}

/// Byte-level tokenizer over the header and ASCII rasters.
struct Tokens<R> {
    reader: R,
}

impl<R: BufRead> Tokens<R> {
    fn peek(&mut self) -> IoResult<Option<u8>> {
        Ok(self.reader.fill_buf()?.first().copied())
    }

    fn next_byte(&mut self) -> IoResult<Option<u8>> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }

    /// Skip whitespace and comments, leaving the next token byte unread.
    fn skip_separators(&mut self) -> IoResult<()> {
        while let Some(b) = self.peek()? {
            if b == b'#' {
                while let Some(c) = self.next_byte()? {
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.reader.consume(1);
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Next whitespace-delimited token; the delimiter is consumed.
    fn token(&mut self) -> IoResult<String> {
        self.skip_separators()?;
        let mut token = String::new();
        while let Some(b) = self.next_byte()? {
            if b.is_ascii_whitespace() {
                break;
            }
            if b == b'#' {
                // A comment glued to a token still ends the token.
                while let Some(c) = self.next_byte()? {
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
                break;
            }
            token.push(b as char);
        }
        if token.is_empty() {
            return Err(IoError::InvalidData("unexpected end of header".into()));
        }
        Ok(token)
    }

    fn number(&mut self, what: &str) -> IoResult<u32> {
        let token = self.token()?;
        token
            .parse()
            .map_err(|_| IoError::InvalidData(format!("bad {what}: {token:?}")))
    }

    /// Next raster sample of an ASCII graymap or pixmap.
    fn sample(&mut self) -> IoResult<u32> {
        self.skip_separators()?;
        if self.peek()?.is_none() {
            return Err(truncated());
        }
        self.number("sample")
    }

    /// Next non-separator byte (P1 rasters may omit spaces between bits).
    fn bit(&mut self) -> IoResult<u8> {
        self.skip_separators()?;
        match self.next_byte()? {
            Some(b'0') => Ok(0),
            Some(b'1') => Ok(1),
            Some(b) => Err(IoError::InvalidData(format!(
                "bad bitmap sample {:?}",
                b as char
            ))),
            None => Err(truncated()),
        }
    }

    fn into_inner(self) -> R {
        self.reader
    }
}

fn truncated() -> IoError {
    IoError::InvalidData("truncated raster".into())
}

fn read_exact_raster<R: Read>(reader: &mut R, buf: &mut [u8]) -> IoResult<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => truncated(),
        _ => IoError::Io(e),
    })
}

/// Read a PNM image (P1-P6) from a buffered reader.
///
/// # Arguments
/// * `reader` - A buffered reader positioned at the magic number
///
/// # Returns
/// A `Pix` with channels 1 / levels 1 (PBM), channels 1 / levels = maxval
/// (PGM) or channels 3 / levels = maxval (PPM).
///
/// # Errors
/// - [`IoError::UnsupportedFormat`] for an unknown magic number or a
///   maxval above 255
/// - [`IoError::InvalidData`] for malformed headers or truncated rasters
pub fn read_pnm<R: BufRead>(reader: R) -> IoResult<Pix> {
    let mut tokens = Tokens { reader };

    let magic = tokens.token()?;
    let format = PnmFormat::from_magic(&magic)
        .ok_or_else(|| IoError::UnsupportedFormat(format!("magic number {magic:?}")))?;

    let width = tokens.number("width")?;
    let height = tokens.number("height")?;
    let maxval = if format.is_bitmap() {
        1
    } else {
        tokens.number("maxval")?
    };
    if maxval == 0 {
        return Err(IoError::InvalidData("maxval must be positive".into()));
    }
    if maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "maxval {maxval} needs 16-bit samples"
        )));
    }

    let mut pix = PixMut::new(width, height, format.channels(), maxval)?;
    log::debug!(
        "pnm: decoding {} {}x{} maxval {}",
        format.magic(),
        width,
        height,
        maxval
    );

    if format.is_ascii() {
        read_ascii_raster(&mut tokens, &mut pix, format, maxval)?;
    } else {
        let mut reader = tokens.into_inner();
        if format == PnmFormat::Pbm {
            read_packed_bitmap(&mut reader, &mut pix)?;
        } else {
            read_exact_raster(&mut reader, pix.data_mut())?;
        }
    }

    Ok(pix.into())
}

fn read_packed_bitmap<R: Read>(reader: &mut R, pix: &mut PixMut) -> IoResult<()> {
    let width = pix.width() as usize;
    let mut packed = vec![0u8; width.div_ceil(8)];
    for y in 0..pix.height() {
        read_exact_raster(reader, &mut packed)?;
        let row = pix.row_mut(y);
        for (x, sample) in row.iter_mut().enumerate() {
            let bit = (packed[x / 8] >> (7 - x % 8)) & 1;
            *sample = bit ^ 1;
        }
    }
    Ok(())
}

fn read_ascii_raster<R: BufRead>(
    tokens: &mut Tokens<R>,
    pix: &mut PixMut,
    format: PnmFormat,
    maxval: u32,
) -> IoResult<()> {
    for sample in pix.data_mut() {
        *sample = if format.is_bitmap() {
            tokens.bit()? ^ 1
        } else {
            let value = tokens.sample()?;
            if value > maxval {
                return Err(IoError::InvalidData(format!(
                    "sample {value} exceeds maxval {maxval}"
                )));
            }
            value as u8
        };
    }
    Ok(())
}

/// Write a `Pix` as binary PNM to a writer.
///
/// Chooses P4 (levels 1), P5 (one channel) or P6 (three channels); the
/// image's level depth is written as maxval.
///
/// # Errors
/// Returns [`IoError::EncodeError`] for a three-channel bitmap, which has
/// no NetPBM representation.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    if pix.levels() == 1 && pix.channels() != 1 {
        return Err(IoError::EncodeError(
            "bitmap images must have one channel".into(),
        ));
    }
    let format = PnmFormat::for_pix(pix);
    let (width, height) = (pix.width(), pix.height());
    log::debug!("pnm: encoding {} {}x{}", format.magic(), width, height);

    if format == PnmFormat::Pbm {
        writeln!(writer, "{}\n{} {}", format.magic(), width, height)?;
        let mut packed = vec![0u8; (width as usize).div_ceil(8)];
        for y in 0..height {
            packed.fill(0);
            for (x, &sample) in pix.row(y).iter().enumerate() {
                if sample == 0 {
                    packed[x / 8] |= 0x80 >> (x % 8);
                }
            }
            writer.write_all(&packed)?;
        }
    } else {
        writeln!(
            writer,
            "{}\n{} {}\n{}",
            format.magic(),
            width,
            height,
            pix.levels()
        )?;
        writer.write_all(pix.data())?;
    }
    writer.flush()?;
    Ok(())
}
