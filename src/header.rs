//! The fixed 36 byte RIFF + `fmt ` aggregate at the start of every file.

use crate::chunk::{read_u32_le, tag_at, ChunkTag, CHUNK_HEADER_LEN};
use crate::error::{Error, Result};
use crate::fmt::{Fmt, FMT_LEN, PCM};

/// Length of the RIFF chunk plus the `fmt ` chunk.
pub const HEADER_LEN: usize = 12 + CHUNK_HEADER_LEN + FMT_LEN;

/// Length of the `data` chunk header that follows the aggregate.
pub const DATA_HEADER_LEN: usize = CHUNK_HEADER_LEN;

/// Full header length of a written file, samples start here.
pub const OUTPUT_HEADER_LEN: usize = HEADER_LEN + DATA_HEADER_LEN;

/// Offset of the RIFF size field (file length - 8).
pub const RIFF_SIZE_OFFSET: u64 = 4;

/// Offset of the `data` chunk size field in a written file.
pub const DATA_SIZE_OFFSET: u64 = HEADER_LEN as u64 + 4;

/// RIFF chunk plus `fmt ` chunk, as laid out at the start of the file.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Header {
    /// RIFF size field, total file length minus 8
    pub riff_size: u32,
    /// Declared size of the `fmt ` chunk payload
    pub fmt_size: u32,
    /// Contents of the `fmt ` chunk
    pub fmt: Fmt,
}

impl Header {
    /// Header for a freshly created output file.
    ///
    /// The RIFF size covers the aggregate only; it is corrected by the first append.
    pub fn for_output(fmt: Fmt) -> Self {
        Header {
            riff_size: (HEADER_LEN - 8) as u32,
            fmt_size: FMT_LEN as u32,
            fmt,
        }
    }

    /// Validate and decode the aggregate, reporting the first check that fails.
    pub fn parse(bytes: &[u8; HEADER_LEN]) -> Result<Self> {
        if ChunkTag::from_bytes(&tag_at(bytes, 0)) != ChunkTag::Riff {
            return Err(Error::NotRiff);
        }

        if ChunkTag::from_bytes(&tag_at(bytes, 8)) != ChunkTag::Wave {
            return Err(Error::NotWave);
        }

        if ChunkTag::from_bytes(&tag_at(bytes, 12)) != ChunkTag::Fmt {
            return Err(Error::MissingFormatChunk);
        }

        let mut fmt_bytes = [0; FMT_LEN];
        fmt_bytes.copy_from_slice(&bytes[20..HEADER_LEN]);
        let fmt = Fmt::from_bytes(&fmt_bytes);

        if fmt.compression != PCM {
            return Err(Error::UnsupportedCompression(fmt.compression));
        }

        let fmt_size = read_u32_le(bytes, 16);

        if fmt_size != FMT_LEN as u32 {
            return Err(Error::UnsupportedExtendedFormat(fmt_size));
        }

        if fmt.sample_byte_width() == 0 {
            return Err(Error::UnsupportedBitDepth(fmt.bit_depth));
        }

        Ok(Header {
            riff_size: read_u32_le(bytes, 4),
            fmt_size,
            fmt,
        })
    }

    /// Encode the aggregate.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0; HEADER_LEN];

        bytes[0..4].copy_from_slice(&ChunkTag::Riff.to_bytes());
        bytes[4..8].copy_from_slice(&self.riff_size.to_le_bytes());
        bytes[8..12].copy_from_slice(&ChunkTag::Wave.to_bytes());
        bytes[12..16].copy_from_slice(&ChunkTag::Fmt.to_bytes());
        bytes[16..20].copy_from_slice(&self.fmt_size.to_le_bytes());
        bytes[20..HEADER_LEN].copy_from_slice(&self.fmt.to_bytes());

        bytes
    }
}
