use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::chunk::{ChunkHeader, ChunkTag, CHUNK_HEADER_LEN};
use crate::config::TailPolicy;
use crate::error::{Error, Result};
use crate::fmt::Fmt;
use crate::header::{Header, HEADER_LEN};

/// Streaming reader over the sample payload of a PCM wav file.
///
/// Opening validates the header and positions the stream at the first sample
/// byte; [`WavReader::next_slice`] then hands out fixed size slices until the
/// end of the file.
///
/// ```no_run
/// use wavpipe::WavReader;
///
/// let mut reader = WavReader::open("input.wav")?;
/// let width = reader.sample_byte_width();
///
/// while let Some(slice) = reader.next_slice(1024)? {
///     assert_eq!(slice.len(), 1024 * width as usize);
/// }
/// # Ok::<(), wavpipe::Error>(())
/// ```
#[derive(Debug)]
pub struct WavReader {
    path: PathBuf,
    stream: BufReader<File>,
    header: Header,
    data: ChunkHeader,
    data_offset: u64,
    tail_policy: TailPolicy,
}

impl WavReader {
    /// Open `path` and validate its header.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// existence, open, `RIFF` tag, `WAVE` tag, `fmt ` tag, PCM compression,
    /// `fmt ` size, bit depth of at least 8 and finally the scan for the
    /// `data` chunk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let mut stream = BufReader::new(File::open(path)?);

        // A file shorter than the header leaves zeros behind, which fail the tag checks.
        let mut bytes = [0; HEADER_LEN];
        read_full(&mut stream, &mut bytes)?;
        let header = Header::parse(&bytes)?;

        let data = find_data_chunk(&mut stream)?;
        let data_offset = stream.stream_position()?;

        debug!(
            path = %path.display(),
            sample_rate = header.fmt.sample_rate,
            channels = header.fmt.num_channels,
            bit_depth = header.fmt.bit_depth,
            data_offset,
            declared_len = data.size,
            "opened input"
        );

        Ok(WavReader {
            path: path.to_path_buf(),
            stream,
            header,
            data,
            data_offset,
            tail_policy: TailPolicy::default(),
        })
    }

    /// Read the next `sample_count` samples as raw little endian bytes.
    ///
    /// Returns `None` once the stream is at end of file. The check happens
    /// before reading, so a slice that ends exactly at end of file is still
    /// returned and the following call yields `None`.
    ///
    /// A slice that runs past end of file is handled according to the
    /// [`TailPolicy`]; with the default [`TailPolicy::Pad`] it keeps its full
    /// length and the missing bytes are zero.
    ///
    /// A `sample_count` whose byte length overflows `usize` is rejected with
    /// [`Error::SliceTooLarge`] before anything is read.
    pub fn next_slice(&mut self, sample_count: usize) -> Result<Option<Vec<u8>>> {
        if self.stream.fill_buf()?.is_empty() {
            trace!(path = %self.path.display(), "end of input");
            return Ok(None);
        }

        let len = sample_count
            .checked_mul(usize::from(self.sample_byte_width()))
            .ok_or(Error::SliceTooLarge(sample_count))?;

        // grows with what is actually read, only padding allocates the full length
        let mut slice = Vec::new();
        let read = (&mut self.stream)
            .take(len as u64)
            .read_to_end(&mut slice)?;

        if read < len {
            trace!(requested = len, read, policy = ?self.tail_policy, "short read at end of input");

            if self.tail_policy == TailPolicy::Pad {
                slice.resize(len, 0);
            }
        }

        Ok(Some(slice))
    }

    /// Width of a single sample in bytes, `bits_per_sample / 8`.
    pub fn sample_byte_width(&self) -> u16 {
        self.header.fmt.sample_byte_width()
    }

    /// Contents of the `fmt ` chunk.
    pub fn format(&self) -> &Fmt {
        &self.header.fmt
    }

    /// The parsed RIFF + `fmt ` header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Size field of the `data` chunk as stored in the file.
    ///
    /// Slices are served until end of file regardless of this value, a file
    /// that is still being written may declare less than it holds. Chunks
    /// stored after the samples are read as samples too.
    pub fn declared_data_len(&self) -> u32 {
        self.data.size
    }

    /// File offset of the first sample byte.
    pub fn data_offset(&self) -> u64 {
        self.data_offset
    }

    /// Change how a slice running past end of file is returned.
    pub fn set_tail_policy(&mut self, policy: TailPolicy) {
        self.tail_policy = policy;
    }
}

/// Walk the chunk list after the header until a `data` chunk header is found.
///
/// Every other chunk is skipped by its declared size, including the padding
/// byte of odd sized chunks. Running out of bytes, even halfway through a
/// chunk header, means there is no `data` chunk.
fn find_data_chunk<R: BufRead + Seek>(stream: &mut R) -> Result<ChunkHeader> {
    loop {
        let mut bytes = [0; CHUNK_HEADER_LEN];

        if read_full(stream, &mut bytes)? < CHUNK_HEADER_LEN {
            return Err(Error::MissingDataChunk);
        }

        let chunk = ChunkHeader::from_bytes(&bytes);

        if chunk.id == ChunkTag::Data {
            return Ok(chunk);
        }

        warn!(tag = ?chunk.id, size = chunk.size, "skipping chunk before data");
        stream.seek(io::SeekFrom::Current(chunk.padded_len() as i64))?;
    }
}

/// Fill `buf` as far as the stream allows, returning the number of bytes read.
fn read_full<R: Read>(stream: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match stream.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}
