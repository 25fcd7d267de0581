//! Open and read configuration.
//!
//! [`OpenOptions`] collects everything needed to open a sound file: the mode
//! and, for new files and headerless RAW files, the sample rate, channel
//! count and format. [`ReadOptions`] describes what to read.
//!
//! # Example
//!
//! ```no_run
//! use soundfile_rs::OpenOptions;
//!
//! // New files need a sample rate and a channel count. The format is taken
//! // from the extension unless given explicitly.
//! let mut file = OpenOptions::new()
//!     .mode("w")
//!     .samplerate(44100)
//!     .channels(2)
//!     .subtype("PCM_24")
//!     .open("out.wav")?;
//! file.write(&[0.0f32, 0.0, 0.5, -0.5])?;
//! file.close()?;
//! # Ok::<(), soundfile_rs::Error>(())
//! ```

use std::ffi::CString;
use std::fs;
use std::io::{Read, Seek};
use std::path::Path;

use libc::c_int;
use sndfile_sys::{sf_open, sf_open_virtual, SF_INFO};

use crate::error::{Error, Result};
use crate::file::SoundFile;
use crate::format::{format_int_from_names, MajorFormat};
use crate::mode::OpenMode;
use crate::sample::Sample;
use crate::virtual_io::{ReadOnly, VirtualIo, VirtualStream};

/// Name given to files opened on a virtual stream.
pub const VIRTUAL_STREAM_NAME: &str = "<virtual stream>";

/// Options for opening a [`SoundFile`].
///
/// Format arguments (`samplerate`, `channels`, `format`, `subtype`,
/// `endian`) are required when creating a file and when reading RAW data.
/// They must not be given when reading any other existing file, because
/// libsndfile takes them from the file header.
#[derive(Debug, Clone)]
pub struct OpenOptions {
    mode: String,
    samplerate: Option<u32>,
    channels: Option<usize>,
    format: Option<String>,
    subtype: Option<String>,
    endian: Option<String>,
    closefd: bool,
}

/// A validated open request.
struct Prepared {
    mode: OpenMode,
    info: SF_INFO,
}

impl OpenOptions {
    /// Options for reading an existing file (mode `"r"`).
    pub fn new() -> Self {
        OpenOptions {
            mode: "r".to_string(),
            samplerate: None,
            channels: None,
            format: None,
            subtype: None,
            endian: None,
            closefd: true,
        }
    }

    /// Set the mode string, e.g. `"r"`, `"w"`, `"x"` or `"r+"`.
    ///
    /// The string is validated when the file is opened.
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    /// Set the sample rate.
    pub fn samplerate(mut self, samplerate: u32) -> Self {
        self.samplerate = Some(samplerate);
        self
    }

    /// Set the number of channels.
    pub fn channels(mut self, channels: usize) -> Self {
        self.channels = Some(channels);
        self
    }

    /// Set the major format, e.g. `"WAV"` or [`MajorFormat::Flac`].
    pub fn format(mut self, format: impl AsRef<str>) -> Self {
        self.format = Some(format.as_ref().to_string());
        self
    }

    /// Set the subtype, e.g. `"PCM_16"` or [`Subtype::Float`](crate::Subtype::Float).
    pub fn subtype(mut self, subtype: impl AsRef<str>) -> Self {
        self.subtype = Some(subtype.as_ref().to_string());
        self
    }

    /// Set the endian-ness, e.g. `"LITTLE"`.
    pub fn endian(mut self, endian: impl AsRef<str>) -> Self {
        self.endian = Some(endian.as_ref().to_string());
        self
    }

    /// Whether to close a file descriptor when the file is closed.
    ///
    /// Only meaningful for [`open_fd`](Self::open_fd); `false` is rejected
    /// for every other kind of open.
    pub fn closefd(mut self, closefd: bool) -> Self {
        self.closefd = closefd;
        self
    }

    /// Open a file by path.
    ///
    /// # Errors
    ///
    /// - argument errors as described on [`OpenOptions`]
    /// - [`Error::FileExists`] for mode `x` if the file exists
    /// - [`Error::Native`] if libsndfile cannot open the file
    pub fn open(&self, path: impl AsRef<Path>) -> Result<SoundFile<'static>> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let mut prepared = self.prepare(&name)?;
        self.require_closefd()?;

        if path.is_file() {
            if prepared.mode.is_exclusive() {
                return Err(Error::FileExists {
                    path: path.to_path_buf(),
                });
            }
            if prepared.mode.is_truncating() && prepared.mode.is_update() {
                // SFM_RDWR keeps existing data, so "w+" truncates first.
                fs::OpenOptions::new()
                    .write(true)
                    .truncate(true)
                    .open(path)?;
            }
        }

        let c_path = path_to_cstring(path)?;

        // SAFETY: c_path and info outlive the call.
        let handle = unsafe {
            sf_open(
                c_path.as_ptr(),
                prepared.mode.to_native(),
                &mut prepared.info,
            )
        };

        SoundFile::from_raw_parts(handle, prepared.info, name, prepared.mode, None)
    }

    /// Open a file on an already open file descriptor.
    ///
    /// The descriptor is closed together with the sound file unless
    /// [`closefd(false)`](Self::closefd) was given.
    #[cfg(unix)]
    pub fn open_fd(&self, fd: std::os::unix::io::RawFd) -> Result<SoundFile<'static>> {
        let name = fd.to_string();
        let mut prepared = self.prepare(&name)?;

        // SAFETY: info outlives the call; ownership of fd passes to
        // libsndfile only when closefd is set.
        let handle = unsafe {
            sndfile_sys::sf_open_fd(
                fd,
                prepared.mode.to_native(),
                &mut prepared.info,
                self.closefd as c_int,
            )
        };

        SoundFile::from_raw_parts(handle, prepared.info, name, prepared.mode, None)
    }

    /// Open a file on a byte stream through libsndfile's virtual I/O.
    ///
    /// The stream is borrowed or owned by the returned file for as long as
    /// it is open. Pass `&mut stream` to get the stream back after the file
    /// is dropped.
    ///
    /// Streams have no file name, so new files need an explicit
    /// [`format`](Self::format).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::io::Cursor;
    /// use soundfile_rs::OpenOptions;
    ///
    /// let mut bytes = Cursor::new(Vec::new());
    /// {
    ///     let mut file = OpenOptions::new()
    ///         .mode("w")
    ///         .samplerate(8000)
    ///         .channels(1)
    ///         .format("WAV")
    ///         .open_virtual(&mut bytes)?;
    ///     file.write(&[0i16, 100, 200])?;
    /// }
    /// assert!(!bytes.get_ref().is_empty());
    /// # Ok::<(), soundfile_rs::Error>(())
    /// ```
    pub fn open_virtual<'s, S>(&self, stream: S) -> Result<SoundFile<'s>>
    where
        S: VirtualStream + 's,
    {
        let name = VIRTUAL_STREAM_NAME.to_string();
        let mut prepared = self.prepare(&name)?;
        self.require_closefd()?;

        let vio = VirtualIo::new(stream);

        // SAFETY: the callback table and user_data live in vio, which the
        // returned SoundFile keeps until after sf_close.
        let handle = unsafe {
            sf_open_virtual(
                vio.callbacks(),
                prepared.mode.to_native(),
                &mut prepared.info,
                vio.user_data(),
            )
        };

        SoundFile::from_raw_parts(handle, prepared.info, name, prepared.mode, Some(vio))
    }

    /// Open a file on a stream that can only be read.
    ///
    /// Shorthand for [`open_virtual`](Self::open_virtual) with the stream
    /// wrapped in [`ReadOnly`].
    pub fn open_virtual_reader<'s, R>(&self, reader: R) -> Result<SoundFile<'s>>
    where
        R: Read + Seek + 's,
    {
        self.open_virtual(ReadOnly::new(reader))
    }

    fn require_closefd(&self) -> Result<()> {
        if self.closefd {
            Ok(())
        } else {
            Err(Error::invalid_argument(
                "closefd=false is only allowed for file descriptors",
            ))
        }
    }

    /// Validate the arguments against the mode and build the SF_INFO.
    fn prepare(&self, name: &str) -> Result<Prepared> {
        let mode = OpenMode::parse(&self.mode)?;

        let format = match &self.format {
            Some(format) => Some(format.clone()),
            None => {
                let guessed = Path::new(name)
                    .extension()
                    .map(|ext| ext.to_string_lossy().to_ascii_uppercase());
                let known = guessed
                    .as_deref()
                    .map_or(false, |ext| ext.parse::<MajorFormat>().is_ok());
                if !known && !mode.opens_existing() {
                    return Err(Error::UnknownFormat {
                        name: name.to_string(),
                    });
                }
                guessed
            }
        };

        let is_raw = format
            .as_deref()
            .map_or(false, |f| f.eq_ignore_ascii_case(MajorFormat::Raw.name()));

        let mut info = SF_INFO::default();
        if !mode.opens_existing() || is_raw {
            let samplerate = self.samplerate.ok_or(Error::missing("samplerate"))?;
            let channels = self.channels.ok_or(Error::missing("channels"))?;

            info.samplerate = c_int::try_from(samplerate)
                .map_err(|_| Error::invalid_argument(format!("samplerate out of range: {}", samplerate)))?;
            info.channels = c_int::try_from(channels)
                .map_err(|_| Error::invalid_argument(format!("channels out of range: {}", channels)))?;

            let format = format.ok_or_else(|| Error::UnknownFormat {
                name: name.to_string(),
            })?;
            info.format = format_int_from_names(
                &format,
                self.subtype.as_deref(),
                self.endian.as_deref(),
            )?;
        } else if self.samplerate.is_some()
            || self.channels.is_some()
            || self.format.is_some()
            || self.subtype.is_some()
            || self.endian.is_some()
        {
            return Err(Error::NotAllowedForExisting);
        }

        Ok(Prepared { mode, info })
    }
}

/// Encode a path for `sf_open`.
///
/// Unix paths are passed through byte for byte.
#[cfg(unix)]
fn path_to_cstring(path: &Path) -> Result<CString> {
    use std::os::unix::ffi::OsStrExt;

    Ok(CString::new(path.as_os_str().as_bytes())?)
}

#[cfg(not(unix))]
fn path_to_cstring(path: &Path) -> Result<CString> {
    let path = path
        .to_str()
        .ok_or_else(|| Error::invalid_argument("path contains invalid UTF-8"))?;
    Ok(CString::new(path)?)
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// What to read from a [`SoundFile`].
///
/// By default everything from the current position to the end of the file
/// is read.
///
/// # Ranges
///
/// `start` and `stop` are frame indices; negative values count from the end
/// of the file. When either is set the file is first positioned at `start`.
/// `stop` and `frames` cannot both be given.
///
/// # Example
///
/// ```no_run
/// use soundfile_rs::{ReadOptions, SoundFile};
///
/// let mut file = SoundFile::open("input.wav")?;
/// // The last second of a 44.1 kHz file, padded with silence if short.
/// let tail = file.read_with(&ReadOptions::new().start(-44100).fill_value(0.0f32))?;
/// # Ok::<(), soundfile_rs::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOptions<T> {
    pub(crate) frames: Option<u64>,
    pub(crate) start: Option<i64>,
    pub(crate) stop: Option<i64>,
    pub(crate) fill_value: Option<T>,
    pub(crate) always_2d: bool,
}

impl<T: Sample> ReadOptions<T> {
    /// Read everything from the current position.
    pub fn new() -> Self {
        ReadOptions {
            frames: None,
            start: None,
            stop: None,
            fill_value: None,
            always_2d: true,
        }
    }

    /// Number of frames to read.
    ///
    /// On seekable files a count beyond the end is clamped unless a fill
    /// value is set. Non-seekable files require a count.
    pub fn frames(mut self, frames: u64) -> Self {
        self.frames = Some(frames);
        self
    }

    /// First frame to read; negative values count from the end.
    pub fn start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    /// Frame index after the last frame to read; negative values count from
    /// the end.
    pub fn stop(mut self, stop: i64) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Pad short reads to the requested length with this value.
    pub fn fill_value(mut self, value: T) -> Self {
        self.fill_value = Some(value);
        self
    }

    /// Whether mono data gets a `[frames, 1]` shape (the default) rather
    /// than `[frames]`.
    pub fn always_2d(mut self, always_2d: bool) -> Self {
        self.always_2d = always_2d;
        self
    }

    pub(crate) fn is_ranged(&self) -> bool {
        self.start.is_some() || self.stop.is_some()
    }
}

impl<T: Sample> Default for ReadOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}
