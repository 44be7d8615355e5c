/// Rates written into the `fmt ` chunk of an output file.
///
/// Channel count, block alignment and bit depth are fixed to stereo 16 bit.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct OutputFormat {
    /// Samples per second; playback pitch changes if this does not match the source
    pub slice_rate: u32,
    /// Declared bytes per second
    pub byte_rate: u32,
}

impl OutputFormat {
    /// Default slice rate in Hz.
    pub const DEFAULT_SLICE_RATE: u32 = 48_000;
    /// Default byte rate.
    pub const DEFAULT_BYTE_RATE: u32 = 176_400;

    /// Output format with the given rates.
    pub fn new(slice_rate: u32, byte_rate: u32) -> Self {
        OutputFormat {
            slice_rate,
            byte_rate,
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SLICE_RATE, Self::DEFAULT_BYTE_RATE)
    }
}

/// What the reader hands out when the last slice runs past end of file.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum TailPolicy {
    /// Keep the requested length, unread bytes are left zero.
    ///
    /// Writing these slices out unchanged adds a short run of silence at the
    /// end of the stream.
    #[default]
    Pad,
    /// Shorten the slice to the bytes actually read.
    Truncate,
}
