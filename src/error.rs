use std::path::PathBuf;
use thiserror::Error;

/// Result type used throughout `wavpipe`.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for opening, parsing, reading and writing wav files
#[derive(Debug, Error)]
pub enum Error {
    /// Input file does not exist
    #[error("input file does not exist: {0}")]
    FileNotFound(PathBuf),
    /// Underlying stream failed to open, read, seek or write
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Output file exists already, it is never overwritten
    #[error("output file already exists, refusing to overwrite: {0}")]
    AlreadyExists(PathBuf),
    /// No RIFF tag at the start of the file
    #[error("input file is not a RIFF file")]
    NotRiff,
    /// RIFF file whose format tag is not WAVE
    #[error("input file is not a RIFF/WAVE file")]
    NotWave,
    /// No `fmt ` chunk right after the RIFF header
    #[error("could not find format information in input file")]
    MissingFormatChunk,
    /// Compression code other than PCM
    #[error("only uncompressed RIFF/WAVE is supported, found compression code {0}")]
    UnsupportedCompression(u16),
    /// `fmt ` chunk carrying extension bytes
    #[error("RIFF/WAVE with extra format data is not supported (fmt chunk size {0})")]
    UnsupportedExtendedFormat(u32),
    /// Samples narrower than a byte, slices of them would be empty
    #[error("unsupported bit depth {0}, samples must be at least 8 bits")]
    UnsupportedBitDepth(u16),
    /// Stream ended before a `data` chunk header was found
    #[error("could not find data chunk in input file")]
    MissingDataChunk,
    /// Read requested while no input is open
    #[error("read requested, although no input file is open")]
    UninitializedRead,
    /// Requested slice length does not fit in memory addressing
    #[error("slice of {0} samples is too large")]
    SliceTooLarge(usize),
    /// Write requested while no output is open
    #[error("write requested, although no output file is open")]
    UninitializedWrite,
    /// Write requested on a writer that has been closed
    #[error("output file has been closed")]
    OutputClosed,
    /// Append would push the file past what the 32 bit RIFF size field can describe
    #[error("output would grow to {0} bytes, beyond the RIFF size limit")]
    FileTooLarge(u64),
}
