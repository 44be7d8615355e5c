use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::chunk::{ChunkHeader, ChunkTag};
use crate::config::OutputFormat;
use crate::error::{Error, Result};
use crate::fmt::Fmt;
use crate::header::{Header, DATA_SIZE_OFFSET, OUTPUT_HEADER_LEN, RIFF_SIZE_OFFSET};

/// Size written into the `data` header on creation, replaced by the first append.
const DATA_SIZE_PLACEHOLDER: u32 = 8;

/// Incremental writer for stereo 16 bit PCM wav files.
///
/// Every [`WavWriter::write`] appends its bytes and then rewrites the RIFF and
/// `data` size fields, so the file on disk is a valid wav file after each call.
/// The writer can be shared between threads; appends are serialized.
///
/// ```no_run
/// use wavpipe::{OutputFormat, WavWriter};
///
/// let writer = WavWriter::create("out.wav", OutputFormat::default())?;
/// writer.write(&[0x01, 0x02, 0x03, 0x04], true)?;
/// writer.close()?;
/// # Ok::<(), wavpipe::Error>(())
/// ```
#[derive(Debug)]
pub struct WavWriter {
    path: PathBuf,
    header: Header,
    output: Mutex<Option<Output>>,
}

#[derive(Debug)]
struct Output {
    stream: BufWriter<File>,
    /// Current file length, the write cursor rests here between appends
    end: u64,
}

impl WavWriter {
    /// Create `path` and write the header followed by an empty `data` chunk.
    ///
    /// Fails with [`Error::AlreadyExists`] rather than overwriting a file.
    pub fn create<P: AsRef<Path>>(path: P, format: OutputFormat) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            return Err(Error::AlreadyExists(path.to_path_buf()));
        }

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => Error::AlreadyExists(path.to_path_buf()),
                _ => Error::Io(e),
            })?;

        let header = Header::for_output(Fmt::stereo_pcm16(format.slice_rate, format.byte_rate));
        let data = ChunkHeader::new(ChunkTag::Data, DATA_SIZE_PLACEHOLDER);

        let mut stream = BufWriter::new(file);
        stream.write_all(&header.to_bytes())?;
        stream.write_all(&data.to_bytes())?;
        stream.flush()?;

        debug!(
            path = %path.display(),
            slice_rate = format.slice_rate,
            byte_rate = format.byte_rate,
            "opened output"
        );

        Ok(WavWriter {
            path: path.to_path_buf(),
            header,
            output: Mutex::new(Some(Output {
                stream,
                end: OUTPUT_HEADER_LEN as u64,
            })),
        })
    }

    /// Append `data` and patch both size fields.
    ///
    /// The append, the two size field rewrites and the seek back to the end
    /// happen under one lock, so concurrent callers never observe or produce
    /// a half-updated header. With `flush` set the bytes are pushed through to
    /// storage before returning.
    ///
    /// An I/O failure part way through leaves the file in an unknown state,
    /// so the writer closes itself and later writes fail with
    /// [`Error::OutputClosed`].
    pub fn write(&self, data: &[u8], flush: bool) -> Result<()> {
        let mut guard = self.output.lock();
        let output = guard.as_mut().ok_or(Error::OutputClosed)?;

        let end = output.end + data.len() as u64;
        let riff_size = u32::try_from(end - 8).map_err(|_| Error::FileTooLarge(end))?;
        let data_size = (end - OUTPUT_HEADER_LEN as u64) as u32;

        if let Err(e) = output.append(data, riff_size, data_size, flush) {
            warn!(path = %self.path.display(), error = %e, "append failed, closing output");
            *guard = None;
            return Err(e.into());
        }

        output.end = end;
        trace!(len = data.len(), end, riff_size, data_size, flush, "appended");

        Ok(())
    }

    /// Flush and close the file. Calling this again is a no-op.
    pub fn close(&self) -> Result<()> {
        if let Some(mut output) = self.output.lock().take() {
            output.stream.flush()?;
            debug!(path = %self.path.display(), len = output.end, "closed output");
        }

        Ok(())
    }

    /// Whether [`WavWriter::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.output.lock().is_none()
    }

    /// Number of sample bytes appended so far.
    pub fn bytes_written(&self) -> u64 {
        self.output
            .lock()
            .as_ref()
            .map_or(0, |output| output.end - OUTPUT_HEADER_LEN as u64)
    }

    /// Path of the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `fmt ` chunk written to the file.
    pub fn format(&self) -> &Fmt {
        &self.header.fmt
    }
}

impl Output {
    fn append(&mut self, data: &[u8], riff_size: u32, data_size: u32, flush: bool) -> io::Result<()> {
        self.stream.write_all(data)?;

        self.stream.seek(SeekFrom::Start(RIFF_SIZE_OFFSET))?;
        self.stream.write_all(&riff_size.to_le_bytes())?;

        self.stream.seek(SeekFrom::Start(DATA_SIZE_OFFSET))?;
        self.stream.write_all(&data_size.to_le_bytes())?;

        self.stream.seek(SeekFrom::End(0))?;

        if flush {
            self.stream.flush()?;
            self.stream.get_ref().sync_data()?;
        }

        Ok(())
    }
}

#[cfg(test)]
impl WavWriter {
    /// Swap the underlying stream, used to inject failing handles.
    pub(crate) fn replace_stream(&self, stream: BufWriter<File>) {
        if let Some(output) = self.output.lock().as_mut() {
            output.stream = stream;
        }
    }
}

impl Drop for WavWriter {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(path = %self.path.display(), error = %e, "failed to close output");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::read_u32_le;
    use std::fs;

    #[test]
    fn create_writes_placeholder_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");

        let writer = WavWriter::create(&path, OutputFormat::default()).unwrap();
        writer.close().unwrap();

        let bytes = fs::read(&path).unwrap();

        assert_eq!(bytes.len(), 44);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(read_u32_le(&bytes, 4), 28);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(read_u32_le(&bytes, 40), 8);
    }

    #[test]
    fn write_patches_size_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");

        let writer = WavWriter::create(&path, OutputFormat::default()).unwrap();
        writer.write(&[0x01, 0x02, 0x03, 0x04], true).unwrap();

        let bytes = fs::read(&path).unwrap();

        assert_eq!(bytes.len(), 48);
        assert_eq!(read_u32_le(&bytes, 4), 40);
        assert_eq!(read_u32_le(&bytes, 40), 4);
        assert_eq!(&bytes[44..], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(writer.bytes_written(), 4);
    }

    #[test]
    fn write_after_close_fails() {
        let dir = tempfile::tempdir().unwrap();
        let writer = WavWriter::create(dir.path().join("out.wav"), OutputFormat::default()).unwrap();

        writer.close().unwrap();

        assert!(writer.is_closed());
        assert!(matches!(writer.write(&[0; 4], false), Err(Error::OutputClosed)));
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taken.wav");
        fs::write(&path, b"precious").unwrap();

        assert!(matches!(
            WavWriter::create(&path, OutputFormat::default()),
            Err(Error::AlreadyExists(p)) if p == path
        ));
        assert_eq!(fs::read(&path).unwrap(), b"precious");
    }

    #[test]
    fn append_past_riff_limit_is_rejected_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");

        let writer = WavWriter::create(&path, OutputFormat::default()).unwrap();
        writer.output.lock().as_mut().unwrap().end = u64::from(u32::MAX);

        assert!(matches!(
            writer.write(&[0; 16], true),
            Err(Error::FileTooLarge(end)) if end == u64::from(u32::MAX) + 16
        ));
        assert!(!writer.is_closed());

        let bytes = fs::read(&path).unwrap();

        assert_eq!(bytes.len(), 44);
        assert_eq!(read_u32_le(&bytes, 4), 28);
        assert_eq!(read_u32_le(&bytes, 40), 8);
    }

    #[test]
    fn failed_append_closes_the_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");

        let writer = WavWriter::create(&path, OutputFormat::default()).unwrap();
        writer.write(&[0x01, 0x02, 0x03, 0x04], true).unwrap();

        // read only handle, the first seek flushes the buffered samples and fails
        writer.replace_stream(BufWriter::new(File::open(&path).unwrap()));

        assert!(matches!(writer.write(&[0x05, 0x06, 0x07, 0x08], false), Err(Error::Io(_))));
        assert!(writer.is_closed());
        assert_eq!(writer.bytes_written(), 0);
        assert!(matches!(writer.write(&[0; 4], false), Err(Error::OutputClosed)));

        let bytes = fs::read(&path).unwrap();

        assert_eq!(bytes.len(), 48);
        assert_eq!(read_u32_le(&bytes, 40), 4);
    }
}
