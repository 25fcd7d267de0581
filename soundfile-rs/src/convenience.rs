//! One-call helpers for common tasks.
//!
//! These open a file, do one thing and close it again.

use std::fmt;
use std::path::Path;

use crate::blocks::{BlockOptions, IntoBlocks};
use crate::buffer::AudioBuffer;
use crate::error::Result;
use crate::file::SoundFile;
use crate::options::{OpenOptions, ReadOptions};
use crate::sample::Sample;
use crate::tags::Tag;

/// Read a sound file.
///
/// Returns the data and the sample rate. `open` may carry format arguments
/// for RAW files; its mode is ignored. A non-seekable source, such as a
/// pipe, is read until it ends unless `frames` or `stop` is given.
///
/// # Example
///
/// ```no_run
/// use soundfile_rs::{read, OpenOptions, ReadOptions};
///
/// // Frames 1000..2000 as 16-bit integers
/// let (data, samplerate) = read::<i16>(
///     "input.wav",
///     &ReadOptions::new().start(1000).stop(2000),
///     &OpenOptions::new(),
/// )?;
/// println!("{} frames at {} Hz", data.frames(), samplerate);
/// # Ok::<(), soundfile_rs::Error>(())
/// ```
pub fn read<T: Sample>(
    path: impl AsRef<Path>,
    options: &ReadOptions<T>,
    open: &OpenOptions,
) -> Result<(AudioBuffer<T>, u32)> {
    let mut file = open.clone().mode("r").open(path)?;
    let data = if file.seekable() || options.frames.is_some() || options.stop.is_some() {
        file.read_with(options)?
    } else {
        read_to_end(&mut file, options)?
    };
    let samplerate = file.samplerate();
    file.close()?;
    Ok((data, samplerate))
}

/// Frames per native read when draining a non-seekable file.
const STREAM_CHUNK_FRAMES: usize = 4096;

/// Read a non-seekable file until libsndfile runs out of data.
///
/// Pipes report no usable length, so the data is gathered chunk by chunk.
fn read_to_end<T: Sample>(
    file: &mut SoundFile<'_>,
    options: &ReadOptions<T>,
) -> Result<AudioBuffer<T>> {
    file.ensure_readable("read")?;
    file.prepare_read(options.start.unwrap_or(0), None, None)?;

    let channels = file.channels();
    let mut chunk = vec![T::default(); STREAM_CHUNK_FRAMES * channels];
    let mut samples = Vec::new();
    loop {
        let read = file.read_into(&mut chunk, None)?;
        samples.extend_from_slice(&chunk[..read * channels]);
        if read < STREAM_CHUNK_FRAMES {
            break;
        }
    }

    Ok(AudioBuffer::new(samples, channels)?.with_always_2d(options.always_2d))
}

/// Write interleaved samples to a new sound file.
///
/// An existing file is overwritten. The format is taken from `open` or from
/// the file extension; its mode is ignored.
///
/// # Example
///
/// ```no_run
/// use soundfile_rs::{write, OpenOptions};
///
/// let silence = vec![0.0f32; 44100 * 2];
/// write("silence.flac", &silence, 2, 44100, &OpenOptions::new())?;
/// # Ok::<(), soundfile_rs::Error>(())
/// ```
pub fn write<T: Sample>(
    path: impl AsRef<Path>,
    data: &[T],
    channels: usize,
    samplerate: u32,
    open: &OpenOptions,
) -> Result<()> {
    let mut file = open
        .clone()
        .mode("w")
        .samplerate(samplerate)
        .channels(channels)
        .open(path)?;
    file.write(data)?;
    file.close()
}

/// Iterate over a sound file in blocks.
///
/// The file stays open until the iterator is dropped.
pub fn blocks<T: Sample>(
    path: impl AsRef<Path>,
    options: BlockOptions<T>,
    open: &OpenOptions,
) -> Result<IntoBlocks<T>> {
    let file = open.clone().mode("r").open(path)?;
    IntoBlocks::new(file, options)
}

/// Summary of a sound file's header.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundFileInfo {
    /// File name as given.
    pub name: String,
    /// Sample rate in Hz.
    pub samplerate: u32,
    /// Number of channels.
    pub channels: usize,
    /// Number of frames.
    pub frames: u64,
    /// Duration in seconds.
    pub duration: f64,
    /// Major format name.
    pub format: String,
    /// Description of the major format.
    pub format_info: String,
    /// Subtype name.
    pub subtype: String,
    /// Description of the subtype.
    pub subtype_info: String,
    /// Endian-ness name.
    pub endian: String,
    /// Number of sections.
    pub sections: i32,
    /// Whether the file supports seeking.
    pub seekable: bool,
    /// Metadata strings that are set.
    pub tags: Vec<(Tag, String)>,
}

/// Read the header of a sound file.
///
/// # Example
///
/// ```no_run
/// let info = soundfile_rs::info("input.wav")?;
/// println!("{}", info);
/// # Ok::<(), soundfile_rs::Error>(())
/// ```
pub fn info(path: impl AsRef<Path>) -> Result<SoundFileInfo> {
    let mut file = OpenOptions::new().open(path)?;
    let info = SoundFileInfo {
        name: file.name().to_string(),
        samplerate: file.samplerate(),
        channels: file.channels(),
        frames: file.frames(),
        duration: file.duration(),
        format: file.format(),
        format_info: file.format_info(),
        subtype: file.subtype(),
        subtype_info: file.subtype_info(),
        endian: file.endian(),
        sections: file.sections(),
        seekable: file.seekable(),
        tags: file.tags()?,
    };
    file.close()?;
    Ok(info)
}

impl fmt::Display for SoundFileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "samplerate: {} Hz", self.samplerate)?;
        writeln!(f, "channels: {}", self.channels)?;
        writeln!(f, "duration: {:.3} s ({} frames)", self.duration, self.frames)?;
        writeln!(f, "format: {} [{}]", self.format_info, self.format)?;
        writeln!(f, "subtype: {} [{}]", self.subtype_info, self.subtype)?;
        writeln!(f, "endian: {}", self.endian)?;
        writeln!(f, "sections: {}", self.sections)?;
        write!(f, "seekable: {}", self.seekable)?;
        for (tag, value) in &self.tags {
            write!(f, "\n{}: {}", tag, value)?;
        }
        Ok(())
    }
}
