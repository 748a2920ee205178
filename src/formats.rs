//! CAFF container format module
//!
//! This module decodes the CAFF block stream: the 9-byte block framing, the
//! container header payload, and the scan loop that seeks past credits blocks
//! and streams the first animation payload out to a sink. All multi-byte
//! fields are 8-byte little-endian values decoded field-by-field from raw
//! byte slices; nothing relies on in-memory struct layout.

use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use thiserror::Error;

/// Errors that can occur while walking a CAFF container
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Truncated stream while reading {0}")]
    TruncatedStream(&'static str),
    #[error("Wrong container signature")]
    InvalidMagic,
    #[error("Invalid block type {0:#04x}")]
    InvalidBlockType(u8),
}

/// Block tag carried by the container header block
pub const HEADER_BLOCK: u8 = 0x01;
/// Block tag for credits blocks, skipped without inspection
pub const CREDITS_BLOCK: u8 = 0x02;
/// Block tag for the animation block carrying the embedded image
pub const ANIMATION_BLOCK: u8 = 0x03;

/// Expected signature of the container header payload, not null-terminated
pub const CAFF_MAGIC: &[u8; 4] = b"CAFF";

/// Fixed sub-header length at the front of an animation payload. Opaque to
/// the extractor; seeked past, never copied.
pub const ANIMATION_SUBHEADER_LEN: u64 = 8;

/// Per-block framing: a 1-byte tag followed by the payload length.
///
/// `size` counts the payload bytes following the framing, including any fixed
/// sub-header the payload itself carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub tag: u8,
    pub size: u64,
}

impl BlockHeader {
    /// Encoded length of the framing: tag + size
    pub const LEN: usize = 9;

    /// Decode the framing at the reader's current position.
    fn read_from<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut raw = [0u8; Self::LEN];
        reader.read_exact(&mut raw)?;
        Ok(Self {
            tag: raw[0],
            size: u64::from_le_bytes(raw[1..9].try_into().unwrap()),
        })
    }
}

/// Payload of the leading header block.
///
/// `header_size` and `block_count` are declared values only. The scan loop
/// relies on end-of-stream instead of `block_count` and never cross-checks
/// `header_size` against bytes consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaffHeader {
    pub header_size: u64,
    pub block_count: u64,
}

impl CaffHeader {
    /// Encoded length of the payload: magic + header_size + block_count
    pub const LEN: usize = 20;

    /// Decode the header payload at the reader's current position, verifying
    /// the 4-byte signature.
    fn read_from<R: Read>(reader: &mut R) -> Result<Self, FormatError> {
        let mut raw = [0u8; Self::LEN];
        reader
            .read_exact(&mut raw)
            .map_err(|e| truncated(e, "container header"))?;
        if &raw[0..4] != CAFF_MAGIC {
            return Err(FormatError::InvalidMagic);
        }
        Ok(Self {
            header_size: u64::from_le_bytes(raw[4..12].try_into().unwrap()),
            block_count: u64::from_le_bytes(raw[12..20].try_into().unwrap()),
        })
    }
}

/// Outcome of a successful container walk.
#[derive(Debug, Clone, Copy)]
pub struct Extraction {
    /// Declared header fields, as stored
    pub header: CaffHeader,
    /// Number of image bytes streamed to the sink, or `None` when the block
    /// sequence ended without an animation block. Callers deciding whether an
    /// absent image is acceptable must check this.
    pub image_bytes: Option<u64>,
}

/// Walk the block sequence and stream the first animation payload to `output`.
///
/// The leading block framing is read but its tag is not enforced; the
/// container header payload must follow it directly and carry the `CAFF`
/// signature. Credits blocks are seeked past without buffering. The scan
/// stops at the first animation block; later blocks are never read. Running
/// out of blocks before an animation block is the normal end of the scan,
/// not an error.
///
/// Image bytes are written incrementally as they are copied. Nothing is
/// written before the copy starts, which is where every fatal condition
/// fires.
pub fn extract_first_animation<R, W>(input: &mut R, output: &mut W) -> Result<Extraction, FormatError>
where
    R: Read + Seek,
    W: Write,
{
    // Leading block framing. Tag and declared size are both ignored, the
    // header payload follows immediately either way.
    if let Err(e) = BlockHeader::read_from(input) {
        return Err(truncated(e, "block header"));
    }

    let header = CaffHeader::read_from(input)?;

    loop {
        let block = match BlockHeader::read_from(input) {
            Ok(block) => block,
            // Running out of bytes mid-framing is the normal end of the scan,
            // distinct from the fatal bad-tag case below.
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Ok(Extraction {
                    header,
                    image_bytes: None,
                });
            }
            Err(e) => return Err(FormatError::Io(e)),
        };

        match block.tag {
            CREDITS_BLOCK => {
                let offset = i64::try_from(block.size)
                    .map_err(|_| FormatError::TruncatedStream("credits payload"))?;
                input.seek(SeekFrom::Current(offset))?;
            }
            ANIMATION_BLOCK => {
                if block.size < ANIMATION_SUBHEADER_LEN {
                    return Err(FormatError::TruncatedStream("animation payload"));
                }
                input.seek(SeekFrom::Current(ANIMATION_SUBHEADER_LEN as i64))?;
                let image_len = block.size - ANIMATION_SUBHEADER_LEN;
                let copied = std::io::copy(&mut input.by_ref().take(image_len), output)?;
                if copied != image_len {
                    return Err(FormatError::TruncatedStream("animation payload"));
                }
                return Ok(Extraction {
                    header,
                    image_bytes: Some(copied),
                });
            }
            other => return Err(FormatError::InvalidBlockType(other)),
        }
    }
}

/// Fold a short `read_exact` into the structure-level error; anything else
/// stays an IO error.
fn truncated(err: std::io::Error, what: &'static str) -> FormatError {
    if err.kind() == ErrorKind::UnexpectedEof {
        FormatError::TruncatedStream(what)
    } else {
        FormatError::Io(err)
    }
}
