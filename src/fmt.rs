use crate::chunk::{read_u16_le, read_u32_le};

/// Size of the `fmt ` chunk payload for plain PCM, no extension bytes.
pub const FMT_LEN: usize = 16;

/// Compression code for uncompressed PCM.
pub const PCM: u16 = 1;

/// Struct representing the payload of the `fmt ` section of a WAV file
///
/// for more information see [`here`]
///
/// [`here`]: http://soundfile.sapp.org/doc/WaveFormat/
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Fmt {
    /// compression code, `1` for PCM
    pub compression: u16,
    /// number of audio channels in the sample data, channels are interleaved
    pub num_channels: u16,
    /// sample ("slice") rate, typical values are `44_100`, `48_000` or `96_000`
    pub sample_rate: u32,
    /// bytes per second as declared by the file
    pub byte_rate: u32,
    /// bytes per frame across all channels
    pub block_align: u16,
    /// bit depth for each sample, typical values are `16` or `24`
    pub bit_depth: u16,
}

impl Fmt {
    /// Format written for every output file: stereo 16 bit PCM with a fixed
    /// block alignment of 4. The byte rate is taken as given, it is not
    /// derived from the slice rate.
    pub fn stereo_pcm16(sample_rate: u32, byte_rate: u32) -> Self {
        Fmt {
            compression: PCM,
            num_channels: 2,
            sample_rate,
            byte_rate,
            block_align: 4,
            bit_depth: 16,
        }
    }

    /// Width of a single sample in bytes.
    pub fn sample_byte_width(&self) -> u16 {
        self.bit_depth / 8
    }

    pub(crate) fn from_bytes(bytes: &[u8; FMT_LEN]) -> Self {
        Fmt {
            compression: read_u16_le(bytes, 0),
            num_channels: read_u16_le(bytes, 2),
            sample_rate: read_u32_le(bytes, 4),
            byte_rate: read_u32_le(bytes, 8),
            block_align: read_u16_le(bytes, 12),
            bit_depth: read_u16_le(bytes, 14),
        }
    }

    pub(crate) fn to_bytes(self) -> [u8; FMT_LEN] {
        let mut bytes = [0; FMT_LEN];

        bytes[0..2].copy_from_slice(&self.compression.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.num_channels.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.sample_rate.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.byte_rate.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.block_align.to_le_bytes());
        bytes[14..16].copy_from_slice(&self.bit_depth.to_le_bytes());

        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes() {
        let bytes: [u8; 16] = [
            0x01, 0x00, // audio format
            0x01, 0x00, // num channels
            0x44, 0xac, 0x00, 0x00, // sample rate
            0x88, 0x58, 0x01, 0x00, // byte rate
            0x02, 0x00, // block align
            0x18, 0x00, // bits per sample
        ];

        let fmt = Fmt::from_bytes(&bytes);

        assert_eq!(fmt.compression, PCM);
        assert_eq!(fmt.num_channels, 1);
        assert_eq!(fmt.sample_rate, 44_100);
        assert_eq!(fmt.byte_rate, 88_200);
        assert_eq!(fmt.block_align, 2);
        assert_eq!(fmt.bit_depth, 24);
        assert_eq!(fmt.sample_byte_width(), 3);
    }

    #[test]
    fn stereo_pcm16_to_bytes() {
        let fmt = Fmt::stereo_pcm16(48_000, 176_400);

        assert_eq!(
            fmt.to_bytes(),
            [
                0x01, 0x00, // audio format
                0x02, 0x00, // num channels
                0x80, 0xbb, 0x00, 0x00, // sample rate
                0x10, 0xb1, 0x02, 0x00, // byte rate
                0x04, 0x00, // block align
                0x10, 0x00, // bits per sample
            ]
        );
        assert_eq!(fmt.sample_byte_width(), 2);
    }
}
