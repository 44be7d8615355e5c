/// Length in bytes of a chunk header: 4 byte tag plus 4 byte size.
pub const CHUNK_HEADER_LEN: usize = 8;

/// RIFF chunks are tagged with 4 byte identifiers.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ChunkTag {
    /// Root level "chunk"
    Riff,
    /// Mandatory chunk for WAV files, contains data such as the sample rate, bit depth, and number of channels.
    Fmt,
    /// Mandatory chunk for WAV files, contains the (interleaved) samples.
    Data,
    /// File identifier, should be located right after the RIFF tag and chunk size
    Wave,
    /// Unknown/unhandled chunk tag, e.g. `LIST` or `JUNK` chunks skipped while looking for samples.
    Unknown([u8; 4]),
}

impl ChunkTag {
    pub(crate) fn from_bytes(bytes: &[u8; 4]) -> Self {
        match bytes {
            b"RIFF" => ChunkTag::Riff,
            b"fmt " => ChunkTag::Fmt,
            b"data" => ChunkTag::Data,
            b"WAVE" => ChunkTag::Wave,
            _ => ChunkTag::Unknown(*bytes),
        }
    }

    pub(crate) fn to_bytes(self) -> [u8; 4] {
        match self {
            ChunkTag::Riff => *b"RIFF",
            ChunkTag::Fmt => *b"fmt ",
            ChunkTag::Data => *b"data",
            ChunkTag::Wave => *b"WAVE",
            ChunkTag::Unknown(bytes) => bytes,
        }
    }
}

/// The 8 byte header that precedes the payload of every RIFF chunk.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ChunkHeader {
    /// Chunk tag
    pub id: ChunkTag,
    /// Payload size in bytes, excluding this header and any padding byte
    pub size: u32,
}

impl ChunkHeader {
    pub(crate) fn new(id: ChunkTag, size: u32) -> Self {
        ChunkHeader { id, size }
    }

    pub(crate) fn from_bytes(bytes: &[u8; CHUNK_HEADER_LEN]) -> Self {
        ChunkHeader {
            id: ChunkTag::from_bytes(&tag_at(bytes, 0)),
            size: read_u32_le(bytes, 4),
        }
    }

    pub(crate) fn to_bytes(self) -> [u8; CHUNK_HEADER_LEN] {
        let mut bytes = [0; CHUNK_HEADER_LEN];

        bytes[0..4].copy_from_slice(&self.id.to_bytes());
        bytes[4..8].copy_from_slice(&self.size.to_le_bytes());

        bytes
    }

    /// Number of payload bytes to skip to reach the next chunk.
    ///
    /// Chunks always occupy an even number of bytes, an odd sized payload is
    /// followed by a single padding byte.
    pub fn padded_len(&self) -> u64 {
        let size = u64::from(self.size);
        size + (size & 1)
    }
}

pub(crate) fn tag_at(bytes: &[u8], offset: usize) -> [u8; 4] {
    let mut tag = [0; 4];
    tag.copy_from_slice(&bytes[offset..offset + 4]);
    tag
}

pub(crate) fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

pub(crate) fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
