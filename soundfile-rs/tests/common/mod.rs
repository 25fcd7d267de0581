//! Shared helpers for the integration tests.
//!
//! Test sound files are assembled here instead of being checked in.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// A canonical 16-bit PCM RIFF/WAVE file.
pub fn wav_bytes(channels: u16, samplerate: u32, samples: &[i16]) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let block_align = channels * 2;
    let byte_rate = samplerate * block_align as u32;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&channels.to_le_bytes());
    bytes.extend_from_slice(&samplerate.to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

/// Stereo test signal: frame `i` is `(i * 100, -(i * 100))`.
pub fn stereo_ramp(frames: usize) -> Vec<i16> {
    (0..frames)
        .flat_map(|i| {
            let v = (i * 100) as i16;
            [v, -v]
        })
        .collect()
}

/// Write a stereo 44.1 kHz WAV with `frames` frames of [`stereo_ramp`].
pub fn stereo_wav(dir: &Path, name: &str, frames: usize) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, wav_bytes(2, 44100, &stereo_ramp(frames))).expect("write fixture");
    path
}

/// Write a mono 8 kHz WAV with the given samples.
pub fn mono_wav(dir: &Path, name: &str, samples: &[i16]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, wav_bytes(1, 8000, samples)).expect("write fixture");
    path
}
