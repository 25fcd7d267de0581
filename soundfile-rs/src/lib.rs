//! # soundfile-rs
//!
//! Safe, idiomatic Rust bindings for reading and writing sound files with
//! [libsndfile](https://libsndfile.github.io/libsndfile/).
//!
//! libsndfile does all of the format and codec work (WAV, AIFF, FLAC, OGG
//! and many more). This crate wraps its handles with RAII, turns its error
//! codes into [`Error`] values, and exchanges audio as interleaved
//! `i16`/`i32`/`f32`/`f64` buffers.
//!
//! ## Quick Start
//!
//! ### Reading
//!
//! ```no_run
//! use soundfile_rs::{Result, SoundFile};
//!
//! fn main() -> Result<()> {
//!     let mut file = SoundFile::open("input.wav")?;
//!     println!("{}", file);
//!
//!     let data = file.read::<f32>(None)?;
//!     for frame in data.iter_frames().take(4) {
//!         println!("{:?}", frame);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Writing
//!
//! ```no_run
//! use soundfile_rs::{write, OpenOptions};
//!
//! let sine: Vec<f64> = (0..44100)
//!     .map(|i| (i as f64 * 440.0 * std::f64::consts::TAU / 44100.0).sin() * 0.5)
//!     .collect();
//! write("sine.wav", &sine, 1, 44100, &OpenOptions::new().subtype("PCM_24"))?;
//! # Ok::<(), soundfile_rs::Error>(())
//! ```
//!
//! ### In-memory files
//!
//! Any `Read + Write + Seek` value can stand in for a file through
//! libsndfile's virtual I/O. Read-only streams are wrapped in [`ReadOnly`].
//!
//! ```no_run
//! use std::io::Cursor;
//! use soundfile_rs::OpenOptions;
//!
//! let bytes = std::fs::read("input.ogg")?;
//! let mut file = OpenOptions::new().open_virtual_reader(Cursor::new(&bytes[..]))?;
//! let data = file.read::<i16>(None)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### With ndarray (optional feature)
//!
//! ```no_run
//! # #[cfg(feature = "ndarray")]
//! # fn example() -> soundfile_rs::Result<()> {
//! use soundfile_rs::SoundFile;
//! use ndarray::Array2;
//!
//! let mut file = SoundFile::open("input.wav")?;
//! let array: Array2<f64> = file.read::<f64>(None)?.to_array2()?;
//! println!("Shape: {:?}", array.shape());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `ndarray`: Conversions between [`AudioBuffer`] and `ndarray::Array2`
//! - `bindgen`: Regenerate the `sndfile-sys` declarations from `sndfile.h`
//!
//! ## Thread Safety
//!
//! [`SoundFile`] is `!Send + !Sync`. A handle and the stream behind it are
//! used from the thread that opened them.

#![deny(missing_docs)]

// Modules
mod blocks;
mod buffer;
mod convenience;
mod error;
mod file;
pub mod format;
mod mode;
mod options;
mod sample;
mod tags;
mod version;
mod virtual_io;

// Public exports
pub use blocks::{BlockOptions, Blocks, IntoBlocks};
pub use buffer::AudioBuffer;
pub use convenience::{blocks, info, read, write, SoundFileInfo};
pub use error::{Error, Result};
pub use file::SoundFile;
pub use format::{
    available_formats, available_subtypes, check_format, default_subtype, Endian, MajorFormat,
    Subtype,
};
pub use mode::OpenMode;
pub use options::{OpenOptions, ReadOptions, VIRTUAL_STREAM_NAME};
pub use sample::{Sample, SampleType};
pub use tags::Tag;
pub use version::{library_version, library_version_number};
pub use virtual_io::{ReadOnly, VirtualStream};

// Conditional re-exports
#[cfg(feature = "ndarray")]
pub use ndarray;
