//! Streaming reader and incremental writer for uncompressed RIFF/WAVE files.
//!
//! The reader validates a PCM wav header, finds the `data` chunk and serves the
//! raw sample bytes in fixed size slices. The writer creates a stereo 16 bit
//! file and appends slices to it, rewriting the RIFF and `data` size fields
//! after every append so the file is playable at any point.
//!
//! **NOTE!** no padding is added while writing: if the total number of bytes is
//! not a whole number of frames the output may click at the very end.
//!
//! ```rust,no_run
//! use wavpipe::{OutputFormat, WavTransceiver};
//!
//! fn main() -> Result<(), wavpipe::Error> {
//!     let mut wt = WavTransceiver::new();
//!     wt.open_input("test.wav")?;
//!     wt.open_output("out.wav", OutputFormat::default())?;
//!
//!     println!("sample width: {} bytes", wt.sample_byte_width()?);
//!
//!     let mut slices = 0;
//!     while let Some(slice) = wt.read_slice(1)? {
//!         wt.write_slice(&slice, false)?;
//!         slices += 1;
//!     }
//!
//!     println!("read / wrote {} slices", slices);
//!     wt.close_output()
//! }
//! ```

#![warn(missing_docs)]

mod chunk;
mod config;
mod error;
mod fmt;
mod header;
mod reader;
mod transceiver;
mod writer;

pub use chunk::{ChunkHeader, ChunkTag};
pub use config::{OutputFormat, TailPolicy};
pub use error::{Error, Result};
pub use fmt::Fmt;
pub use header::{
    Header, DATA_HEADER_LEN, DATA_SIZE_OFFSET, HEADER_LEN, OUTPUT_HEADER_LEN, RIFF_SIZE_OFFSET,
};
pub use reader::WavReader;
pub use transceiver::WavTransceiver;
pub use writer::WavWriter;
