//! Integration tests for sfinfo CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get the sfinfo command.
fn sfinfo() -> Command {
    Command::cargo_bin("sfinfo").unwrap()
}

/// Write a 16-bit stereo 44.1 kHz WAV with `frames` frames of a ramp.
fn create_wav(dir: &Path, name: &str, frames: usize) -> PathBuf {
    let samples: Vec<i16> = (0..frames as i16).flat_map(|i| [i * 10, -i * 10]).collect();
    let data_len = (samples.len() * 2) as u32;

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVEfmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&44100u32.to_le_bytes());
    bytes.extend_from_slice(&(44100u32 * 4).to_le_bytes());
    bytes.extend_from_slice(&4u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }

    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_help() {
    sfinfo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inspect and convert sound files"))
        .stdout(predicate::str::contains("--formats"))
        .stdout(predicate::str::contains("--blocksize"))
        .stdout(predicate::str::contains("EXAMPLES"));
}

#[test]
fn test_version() {
    sfinfo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sfinfo"));
}

#[test]
fn test_missing_input() {
    sfinfo()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file is required"));
}

#[test]
fn test_nonexistent_input() {
    sfinfo()
        .arg("/nonexistent/file.wav")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_quiet_and_verbose() {
    sfinfo()
        .args(["--formats", "-q", "-v"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot use both"));
}

// ============================================================================
// Listings
// ============================================================================

#[test]
fn test_list_formats() {
    sfinfo()
        .arg("--formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Major formats"))
        .stdout(predicate::str::contains("WAV"))
        .stdout(predicate::str::contains("AIFF"));
}

#[test]
fn test_list_subtypes_for_format() {
    sfinfo()
        .args(["--subtypes", "wav"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtypes for WAV"))
        .stdout(predicate::str::contains("PCM_16"))
        .stdout(predicate::str::contains("(default)"))
        .stdout(predicate::str::contains("VORBIS").not());
}

#[test]
fn test_list_subtypes_unknown_format() {
    sfinfo()
        .args(["--subtypes", "NOPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format string"));
}

// ============================================================================
// Info
// ============================================================================

#[test]
fn test_info() {
    let temp = TempDir::new().unwrap();
    let input = create_wav(temp.path(), "tone.wav", 100);

    sfinfo()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("44100 Hz"))
        .stdout(predicate::str::contains("2 (stereo)"))
        .stdout(predicate::str::contains("0:00.002"))
        .stdout(predicate::str::contains("[PCM_16]"))
        .stdout(predicate::str::contains("[WAV]"));
}

#[test]
fn test_info_quiet() {
    let temp = TempDir::new().unwrap();
    let input = create_wav(temp.path(), "tone.wav", 10);

    sfinfo()
        .arg("-q")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_info_not_audio() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("notes.wav");
    fs::write(&input, "definitely not audio").unwrap();

    sfinfo()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open sound file"));
}

#[test]
fn test_format_options_need_output() {
    let temp = TempDir::new().unwrap();
    let input = create_wav(temp.path(), "tone.wav", 10);

    sfinfo()
        .arg(&input)
        .args(["--subtype", "FLOAT"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("require an output file"));
}

// ============================================================================
// Conversion
// ============================================================================

#[test]
fn test_convert_to_aiff() {
    let temp = TempDir::new().unwrap();
    let input = create_wav(temp.path(), "tone.wav", 1000);
    let output = temp.path().join("tone.aiff");

    sfinfo()
        .arg(&input)
        .arg(&output)
        .args(["--blocksize", "64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted"))
        .stdout(predicate::str::contains("1,000"));

    sfinfo()
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("[AIFF]"))
        .stdout(predicate::str::contains("1,000"));
}

#[test]
fn test_convert_to_raw_keeps_subtype() {
    let temp = TempDir::new().unwrap();
    let input = create_wav(temp.path(), "tone.wav", 50);
    let output = temp.path().join("tone.raw");

    sfinfo().arg("-q").arg(&input).arg(&output).assert().success();
    assert_eq!(fs::metadata(&output).unwrap().len(), 50 * 2 * 2);

    let floats = temp.path().join("tone_float.raw");
    sfinfo()
        .arg("-q")
        .arg(&input)
        .arg(&floats)
        .args(["--subtype", "FLOAT"])
        .assert()
        .success();
    assert_eq!(fs::metadata(&floats).unwrap().len(), 50 * 2 * 4);
}

#[test]
fn test_convert_refuses_overwrite() {
    let temp = TempDir::new().unwrap();
    let input = create_wav(temp.path(), "tone.wav", 10);
    let output = create_wav(temp.path(), "existing.wav", 1);

    sfinfo()
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    sfinfo()
        .arg("--force")
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    sfinfo()
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Frames:\s+10\n").unwrap());
}

#[test]
fn test_convert_onto_itself() {
    let temp = TempDir::new().unwrap();
    let input = create_wav(temp.path(), "tone.wav", 10);

    sfinfo()
        .arg("--force")
        .arg(&input)
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("same file"));
}

#[test]
fn test_convert_invalid_subtype() {
    let temp = TempDir::new().unwrap();
    let input = create_wav(temp.path(), "tone.wav", 10);
    let output = temp.path().join("tone.flac");

    sfinfo()
        .arg(&input)
        .arg(&output)
        .args(["--subtype", "DOUBLE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create output file"))
        .stderr(predicate::str::contains("caused by"));
}
