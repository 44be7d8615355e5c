#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Canonical 44 byte header wav file with `data` as its sample payload.
pub fn pcm_wav(num_channels: u16, sample_rate: u32, bit_depth: u16, data: &[u8]) -> Vec<u8> {
    pcm_wav_with_chunks(num_channels, sample_rate, bit_depth, &[], data)
}

/// Same as [`pcm_wav`] with extra chunks between `fmt ` and `data`.
pub fn pcm_wav_with_chunks(
    num_channels: u16,
    sample_rate: u32,
    bit_depth: u16,
    chunks: &[(&[u8; 4], &[u8])],
    data: &[u8],
) -> Vec<u8> {
    let block_align = num_channels * (bit_depth / 8);
    let byte_rate = sample_rate * u32::from(block_align);

    let mut bytes = vec![];
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&[0; 4]);
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&num_channels.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&bit_depth.to_le_bytes());

    for (tag, payload) in chunks {
        bytes.extend_from_slice(*tag);
        bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(payload);
        if payload.len() % 2 == 1 {
            bytes.push(0);
        }
    }

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&(data.len() as u32).to_le_bytes());
    bytes.extend_from_slice(data);

    let riff_size = (bytes.len() - 8) as u32;
    bytes[4..8].copy_from_slice(&riff_size.to_le_bytes());

    bytes
}

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

pub fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Write a 16 bit stereo file with `hound` and return the raw sample bytes.
pub fn hound_stereo_16(path: &Path, sample_rate: u32, frames: usize) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let mut raw = vec![];

    for i in 0..frames {
        let left = (i as i16).wrapping_mul(37);
        let right = -left;
        writer.write_sample(left).unwrap();
        writer.write_sample(right).unwrap();
        raw.extend_from_slice(&left.to_le_bytes());
        raw.extend_from_slice(&right.to_le_bytes());
    }

    writer.finalize().unwrap();
    raw
}
