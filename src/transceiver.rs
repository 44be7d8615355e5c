use std::path::Path;

use tracing::{debug, warn};

use crate::config::{OutputFormat, TailPolicy};
use crate::error::{Error, Result};
use crate::reader::WavReader;
use crate::writer::WavWriter;

/// Owns at most one input and one output file.
///
/// The two sides are independent: either can be opened, replaced or closed
/// without touching the other. Dropping the transceiver closes both.
///
/// ```no_run
/// use wavpipe::WavTransceiver;
///
/// let mut wt = WavTransceiver::with_files("test.wav", "out.wav")?;
///
/// while let Some(slice) = wt.read_slice(1)? {
///     wt.write_slice(&slice, false)?;
/// }
///
/// wt.close_output()?;
/// # Ok::<(), wavpipe::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct WavTransceiver {
    input: Option<WavReader>,
    output: Option<WavWriter>,
    tail_policy: TailPolicy,
}

impl WavTransceiver {
    /// Transceiver with neither side open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `input` and then create `output` with the default [`OutputFormat`].
    pub fn with_files<I, O>(input: I, output: O) -> Result<Self>
    where
        I: AsRef<Path>,
        O: AsRef<Path>,
    {
        let mut wt = Self::new();
        wt.open_input(input)?;
        wt.open_output(output, OutputFormat::default())?;
        Ok(wt)
    }

    /// Open a new input, closing the current one first.
    ///
    /// On failure no input is left open.
    pub fn open_input<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.close_input();

        let mut reader = WavReader::open(path)?;
        reader.set_tail_policy(self.tail_policy);
        self.input = Some(reader);

        Ok(())
    }

    /// Create a new output file.
    ///
    /// A currently open output is closed only once the new one exists, so a
    /// failed open leaves it in place. Once the new output is installed the
    /// call succeeds; a failure to flush the previous one is only logged.
    pub fn open_output<P: AsRef<Path>>(&mut self, path: P, format: OutputFormat) -> Result<()> {
        let writer = WavWriter::create(path, format)?;

        if let Some(previous) = self.output.replace(writer) {
            if let Err(e) = previous.close() {
                warn!(path = %previous.path().display(), error = %e, "failed to close replaced output");
            }
        }

        Ok(())
    }

    /// Next `sample_count` samples from the input, `None` at end of stream.
    pub fn read_slice(&mut self, sample_count: usize) -> Result<Option<Vec<u8>>> {
        self.input
            .as_mut()
            .ok_or(Error::UninitializedRead)?
            .next_slice(sample_count)
    }

    /// Append `data` to the output, see [`WavWriter::write`].
    pub fn write_slice(&self, data: &[u8], flush: bool) -> Result<()> {
        self.output
            .as_ref()
            .ok_or(Error::UninitializedWrite)?
            .write(data, flush)
    }

    /// Byte width of one input sample.
    pub fn sample_byte_width(&self) -> Result<u16> {
        self.input
            .as_ref()
            .map(WavReader::sample_byte_width)
            .ok_or(Error::UninitializedRead)
    }

    /// Copy slices of `samples_per_slice` samples from input to output until
    /// the input runs out. Returns the number of slices written.
    ///
    /// The output stays open; call [`WavTransceiver::close_output`] afterwards.
    pub fn transfer(&mut self, samples_per_slice: usize, flush: bool) -> Result<u64> {
        if self.output.is_none() {
            return Err(Error::UninitializedWrite);
        }

        let mut slices = 0;

        while let Some(slice) = self.read_slice(samples_per_slice)? {
            // zero width samples never advance the input
            if slice.is_empty() {
                break;
            }

            self.write_slice(&slice, flush)?;
            slices += 1;
        }

        debug!(slices, "transfer finished");

        Ok(slices)
    }

    /// Close the input. Safe to call when nothing is open.
    pub fn close_input(&mut self) {
        self.input = None;
    }

    /// Flush and close the output. Safe to call when nothing is open.
    pub fn close_output(&mut self) -> Result<()> {
        match self.output.take() {
            Some(writer) => writer.close(),
            None => Ok(()),
        }
    }

    /// Set how slices running past the end of the input are returned,
    /// for the current input and any opened later.
    pub fn set_tail_policy(&mut self, policy: TailPolicy) {
        self.tail_policy = policy;

        if let Some(reader) = self.input.as_mut() {
            reader.set_tail_policy(policy);
        }
    }

    /// Whether an input is open.
    pub fn is_input_open(&self) -> bool {
        self.input.is_some()
    }

    /// Whether an output is open.
    pub fn is_output_open(&self) -> bool {
        self.output.is_some()
    }

    /// The open input, if any.
    pub fn input(&self) -> Option<&WavReader> {
        self.input.as_ref()
    }

    /// The open output, if any.
    pub fn output(&self) -> Option<&WavWriter> {
        self.output.as_ref()
    }
}

impl Drop for WavTransceiver {
    fn drop(&mut self) {
        self.close_input();

        if let Err(e) = self.close_output() {
            warn!(error = %e, "failed to close output on drop");
        }
    }
}
