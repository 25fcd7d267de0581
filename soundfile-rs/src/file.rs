//! Sound file handles.
//!
//! This module provides [`SoundFile`], an open libsndfile handle with
//! read, write, seek and metadata access.
//!
//! # Example
//!
//! ```no_run
//! use soundfile_rs::SoundFile;
//!
//! let mut file = SoundFile::open("input.wav")?;
//! println!("{}", file);
//! let data = file.read::<f64>(None)?;
//! println!("read {} frames of {} channels", data.frames(), data.channels());
//! # Ok::<(), soundfile_rs::Error>(())
//! ```

use std::ffi::{CStr, CString};
use std::fmt;
use std::io::{self, SeekFrom};
use std::marker::PhantomData;
use std::path::Path;
use std::ptr::{self, NonNull};

use sndfile_sys::{
    format_endian, format_major, format_subtype, sf_close, sf_count_t, sf_error, sf_get_string,
    sf_seek, sf_set_string, sf_write_sync, SFC_GET_FORMAT_INFO, SF_INFO, SF_SEEK_CUR,
    SF_SEEK_END, SF_SEEK_SET, SF_TRUE, SNDFILE,
};
use tracing::{debug, warn};

use crate::blocks::{BlockOptions, Blocks};
use crate::buffer::AudioBuffer;
use crate::error::{Error, Result};
use crate::format::{format_info, format_str};
use crate::mode::OpenMode;
use crate::options::{OpenOptions, ReadOptions};
use crate::sample::Sample;
use crate::tags::Tag;
use crate::virtual_io::VirtualIo;

/// An open sound file.
///
/// `SoundFile` wraps a libsndfile handle with RAII semantics. The handle is
/// flushed and closed exactly once: by [`close`](Self::close) or, failing
/// that, when the value is dropped. After closing, every operation that
/// needs the handle returns [`Error::Closed`]; the properties read from the
/// header stay available.
///
/// The lifetime `'s` is the lifetime of the stream behind a file opened
/// with [`OpenOptions::open_virtual`]. Files opened by path or descriptor
/// are `SoundFile<'static>`.
///
/// # Positioning
///
/// Reads and writes share one position, counted in frames. On seekable
/// files every read or write leaves the position just after the frames it
/// transferred, so the read and write pointers of files opened with `"r+"`
/// stay together.
///
/// # Thread Safety
///
/// `SoundFile` is `!Send` and `!Sync`. A virtual stream is called back from
/// inside libsndfile on whichever thread is using the handle, and the
/// stream is not required to be `Send`.
pub struct SoundFile<'s> {
    /// The libsndfile handle; `None` once closed.
    handle: Option<NonNull<SNDFILE>>,

    /// Header information. `frames` is kept current after writes.
    info: SF_INFO,

    name: String,
    mode: OpenMode,

    /// Callback state for virtual I/O. Released only after `sf_close`.
    virtual_io: Option<VirtualIo<'s>>,

    /// Marker to make SoundFile !Send and !Sync.
    _not_send_sync: PhantomData<*const ()>,
}

impl SoundFile<'static> {
    /// Open an existing sound file for reading.
    ///
    /// Shorthand for `OpenOptions::new().open(path)`.
    ///
    /// # Errors
    ///
    /// [`Error::Native`] if the file doesn't exist or libsndfile doesn't
    /// recognise its format.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        OpenOptions::new().open(path)
    }
}

impl<'s> SoundFile<'s> {
    /// Start building [`OpenOptions`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use soundfile_rs::SoundFile;
    ///
    /// let file = SoundFile::options()
    ///     .mode("x")
    ///     .samplerate(48000)
    ///     .channels(1)
    ///     .open("new.flac")?;
    /// # Ok::<(), soundfile_rs::Error>(())
    /// ```
    pub fn options() -> OpenOptions {
        OpenOptions::new()
    }

    /// Take ownership of a handle returned by one of the `sf_open*` calls.
    ///
    /// A null handle is turned into the error libsndfile recorded, or into
    /// the stream error that caused it.
    pub(crate) fn from_raw_parts(
        handle: *mut SNDFILE,
        info: SF_INFO,
        name: String,
        mode: OpenMode,
        mut virtual_io: Option<VirtualIo<'s>>,
    ) -> Result<Self> {
        let handle = match NonNull::new(handle) {
            Some(handle) => handle,
            None => {
                // SAFETY: a null handle reads the global error state.
                let code = unsafe { sf_error(ptr::null_mut()) };
                if let Some(error) = virtual_io.as_mut().and_then(VirtualIo::take_error) {
                    return Err(Error::Io(error));
                }
                debug!(name = %name, mode = %mode, code, "failed to open sound file");
                return Err(Error::from_handle(code, ptr::null_mut()));
            }
        };

        let mut file = SoundFile {
            handle: Some(handle),
            info,
            name,
            mode,
            virtual_io,
            _not_send_sync: PhantomData,
        };
        file.check_error()?;

        if file.mode.opens_existing() && file.mode.is_update() && file.seekable() {
            // Start writing at the beginning, like a file opened with "r+".
            file.seek(SeekFrom::Start(0))?;
        }

        debug!(
            name = %file.name,
            mode = %file.mode,
            format = %file.format(),
            subtype = %file.subtype(),
            samplerate = file.info.samplerate,
            channels = file.info.channels,
            frames = file.info.frames,
            "opened sound file"
        );

        Ok(file)
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    /// The file name, descriptor number, or `"<virtual stream>"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The mode the file was opened with.
    pub fn mode(&self) -> &OpenMode {
        &self.mode
    }

    /// Sample rate in Hz.
    pub fn samplerate(&self) -> u32 {
        self.info.samplerate.max(0) as u32
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.info.channels.max(0) as usize
    }

    /// Number of frames in the file.
    pub fn frames(&self) -> u64 {
        self.info.frames.max(0) as u64
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        if self.info.samplerate > 0 {
            self.frames() as f64 / self.info.samplerate as f64
        } else {
            0.0
        }
    }

    /// The native format word.
    pub fn format_code(&self) -> i32 {
        self.info.format
    }

    /// Major format name, e.g. `"WAV"`.
    pub fn format(&self) -> String {
        format_str(format_major(self.info.format))
    }

    /// Subtype name, e.g. `"PCM_16"`.
    pub fn subtype(&self) -> String {
        format_str(format_subtype(self.info.format))
    }

    /// Endian-ness name, e.g. `"FILE"`.
    pub fn endian(&self) -> String {
        format_str(format_endian(self.info.format))
    }

    /// libsndfile's description of the major format.
    pub fn format_info(&self) -> String {
        format_info(format_major(self.info.format), SFC_GET_FORMAT_INFO as i32).1
    }

    /// libsndfile's description of the subtype.
    pub fn subtype_info(&self) -> String {
        format_info(format_subtype(self.info.format), SFC_GET_FORMAT_INFO as i32).1
    }

    /// Number of sections.
    pub fn sections(&self) -> i32 {
        self.info.sections
    }

    /// Whether the file supports seeking.
    pub fn seekable(&self) -> bool {
        self.info.seekable == SF_TRUE as i32
    }

    /// Whether the file has been closed.
    pub fn is_closed(&self) -> bool {
        self.handle.is_none()
    }

    // ------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------

    /// Read a metadata string.
    ///
    /// Returns an empty string if the tag is not set.
    pub fn get_tag(&self, tag: Tag) -> Result<String> {
        let handle = self.handle()?;

        // SAFETY: the handle is open; the returned string is owned by
        // libsndfile and copied before any further call.
        let value = unsafe {
            let ptr = sf_get_string(handle.as_ptr(), tag.code());
            if ptr.is_null() {
                String::new()
            } else {
                CStr::from_ptr(ptr).to_string_lossy().into_owned()
            }
        };
        Ok(value)
    }

    /// Write a metadata string.
    ///
    /// Only formats with metadata support keep the value. Most formats
    /// require tags to be set before any audio is written.
    pub fn set_tag(&mut self, tag: Tag, value: &str) -> Result<()> {
        let handle = self.handle()?;
        let value = CString::new(value)?;

        // SAFETY: the handle is open; libsndfile copies the string.
        let code = unsafe { sf_set_string(handle.as_ptr(), tag.code(), value.as_ptr()) };
        if code != 0 {
            return Err(Error::native(code));
        }
        Ok(())
    }

    /// Every tag that is set, in tag order.
    pub fn tags(&self) -> Result<Vec<(Tag, String)>> {
        let mut tags = Vec::new();
        for tag in Tag::ALL {
            let value = self.get_tag(tag)?;
            if !value.is_empty() {
                tags.push((tag, value));
            }
        }
        Ok(tags)
    }

    // ------------------------------------------------------------------
    // Positioning
    // ------------------------------------------------------------------

    /// Set the read/write position, in frames.
    ///
    /// Returns the new absolute position.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::io::SeekFrom;
    /// use soundfile_rs::SoundFile;
    ///
    /// let mut file = SoundFile::open("input.wav")?;
    /// let len = file.seek(SeekFrom::End(0))?;
    /// assert_eq!(len, file.frames());
    /// # Ok::<(), soundfile_rs::Error>(())
    /// ```
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let handle = self.handle()?;

        let (offset, whence) = match pos {
            SeekFrom::Start(frames) => (
                sf_count_t::try_from(frames)
                    .map_err(|_| Error::invalid_argument("seek position out of range"))?,
                SF_SEEK_SET,
            ),
            SeekFrom::Current(frames) => (frames, SF_SEEK_CUR),
            SeekFrom::End(frames) => (frames, SF_SEEK_END),
        };

        // SAFETY: the handle is open.
        let position = unsafe { sf_seek(handle.as_ptr(), offset, whence as i32) };
        self.check_error()?;

        u64::try_from(position).map_err(|_| {
            Error::invalid_argument(format!("cannot seek to {:?}", pos))
        })
    }

    /// The current read/write position, in frames.
    pub fn tell(&mut self) -> Result<u64> {
        self.seek(SeekFrom::Current(0))
    }

    // ------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------

    /// Read frames from the current position.
    ///
    /// `None` reads to the end of the file. On seekable files a larger
    /// count is clamped to the frames remaining; use
    /// [`read_with`](Self::read_with) and a fill value to pad instead.
    ///
    /// # Errors
    ///
    /// - [`Error::WriteOnly`] if the file was opened write-only
    /// - [`Error::InvalidArgument`] if `frames` is `None` on a
    ///   non-seekable file
    pub fn read<T: Sample>(&mut self, frames: Option<u64>) -> Result<AudioBuffer<T>> {
        let mut options = ReadOptions::new();
        options.frames = frames;
        self.read_with(&options)
    }

    /// Read frames as described by [`ReadOptions`].
    ///
    /// If the options give a `start` or `stop`, the file is first
    /// positioned at `start`.
    pub fn read_with<T: Sample>(&mut self, options: &ReadOptions<T>) -> Result<AudioBuffer<T>> {
        self.handle()?;
        self.ensure_readable("read")?;

        let frames = if options.is_ranged() {
            Some(self.prepare_read(options.start.unwrap_or(0), options.stop, options.frames)?)
        } else {
            options.frames
        };
        let frames = self.check_frames(frames, options.fill_value.is_some())?;
        let frames = usize::try_from(frames)
            .map_err(|_| Error::invalid_argument("frame count out of range"))?;

        let mut buffer = AudioBuffer::filled(frames, self.channels(), T::default())
            .with_always_2d(options.always_2d);
        let read = self.read_frames(buffer.as_mut_slice(), frames)?;

        if read < frames {
            match options.fill_value {
                Some(value) => {
                    let start = read * self.channels();
                    buffer.as_mut_slice()[start..].fill(value);
                }
                None => buffer.truncate_frames(read),
            }
        }

        Ok(buffer)
    }

    /// Read into an interleaved buffer.
    ///
    /// Reads at most `out.len() / channels` frames and returns the number
    /// of frames read. If fewer are available, the rest of `out` is set to
    /// `fill_value` when one is given and left untouched otherwise.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidShape`] if `out` does not hold a whole number of
    /// frames.
    pub fn read_into<T: Sample>(&mut self, out: &mut [T], fill_value: Option<T>) -> Result<usize> {
        self.handle()?;
        self.ensure_readable("read")?;

        let channels = self.channels();
        if channels == 0 || out.len() % channels != 0 {
            return Err(Error::InvalidShape {
                len: out.len(),
                channels,
            });
        }

        let frames = out.len() / channels;
        let read = self.read_frames(out, frames)?;

        if read < frames {
            if let Some(value) = fill_value {
                out[read * channels..].fill(value);
            }
        }

        Ok(read)
    }

    // ------------------------------------------------------------------
    // Writing
    // ------------------------------------------------------------------

    /// Write interleaved frames at the current position.
    ///
    /// The file grows as needed and [`frames`](Self::frames) is updated.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidShape`] if `data` does not hold a whole number of
    /// frames.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use soundfile_rs::SoundFile;
    ///
    /// let mut file = SoundFile::options()
    ///     .mode("w")
    ///     .samplerate(44100)
    ///     .channels(2)
    ///     .open("out.wav")?;
    ///
    /// // Two stereo frames
    /// file.write(&[0.1f32, -0.1, 0.2, -0.2])?;
    /// assert_eq!(file.frames(), 2);
    /// # Ok::<(), soundfile_rs::Error>(())
    /// ```
    pub fn write<T: Sample>(&mut self, data: &[T]) -> Result<()> {
        let handle = self.handle()?;

        let channels = self.channels();
        if channels == 0 || data.len() % channels != 0 {
            return Err(Error::InvalidShape {
                len: data.len(),
                channels,
            });
        }
        let frames = data.len() / channels;

        // SAFETY: data holds frames * channels samples.
        let result = self.transfer(frames, |count| unsafe {
            T::writef(handle.as_ptr(), data.as_ptr(), count)
        });

        let written = match result {
            Ok(written) => written,
            Err(error) => {
                // Some frames may have reached the file before the failure.
                if self.seekable() {
                    if let Err(refresh) = self.refresh_frames(0) {
                        warn!(name = %self.name, error = %refresh, "frame count not refreshed");
                    }
                }
                return Err(error);
            }
        };

        self.refresh_frames(written)?;

        if written != frames {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("wrote {} of {} frames", written, frames),
            )));
        }

        Ok(())
    }

    /// Write an [`AudioBuffer`] at the current position.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidShape`] if the buffer's channel count differs from
    /// the file's.
    pub fn write_buffer<T: Sample>(&mut self, buffer: &AudioBuffer<T>) -> Result<()> {
        if buffer.channels() != self.channels() {
            return Err(Error::InvalidShape {
                len: buffer.as_slice().len(),
                channels: self.channels(),
            });
        }
        self.write(buffer.as_slice())
    }

    // ------------------------------------------------------------------
    // Slicing
    // ------------------------------------------------------------------

    /// Read the frames `start..stop` without moving the position.
    ///
    /// Indices follow slice conventions: negative values count from the end
    /// and out-of-range values are clamped. `None` for `stop` means the end
    /// of the file.
    pub fn read_slice<T: Sample>(&mut self, start: i64, stop: Option<i64>) -> Result<AudioBuffer<T>> {
        self.handle()?;
        if !self.seekable() {
            return Err(Error::not_seekable("slicing"));
        }

        let (start, stop) = slice_bounds(start, stop, self.frames());
        let current = self.tell()?;
        self.seek(SeekFrom::Start(start))?;
        let data = self.read(Some(stop - start));
        self.seek(SeekFrom::Start(current))?;
        data
    }

    /// Overwrite the frames `start..stop` without moving the position.
    ///
    /// # Errors
    ///
    /// [`Error::SliceLength`] if `data` does not hold exactly `stop - start`
    /// frames.
    pub fn write_slice<T: Sample>(&mut self, start: i64, stop: Option<i64>, data: &[T]) -> Result<()> {
        self.handle()?;
        if !self.seekable() {
            return Err(Error::not_seekable("slicing"));
        }

        let channels = self.channels();
        if channels == 0 || data.len() % channels != 0 {
            return Err(Error::InvalidShape {
                len: data.len(),
                channels,
            });
        }

        let (start, stop) = slice_bounds(start, stop, self.frames());
        let slice = (stop - start) as usize;
        let frames = data.len() / channels;
        if frames != slice {
            return Err(Error::SliceLength {
                data: frames,
                slice,
            });
        }

        let current = self.tell()?;
        self.seek(SeekFrom::Start(start))?;
        let result = self.write(data);
        self.seek(SeekFrom::Start(current))?;
        result
    }

    // ------------------------------------------------------------------
    // Blocks
    // ------------------------------------------------------------------

    /// Iterate over the file in blocks of frames.
    ///
    /// See [`BlockOptions`] for the available settings.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use soundfile_rs::{BlockOptions, SoundFile};
    ///
    /// let mut file = SoundFile::open("input.wav")?;
    /// let mut peak = 0.0f32;
    /// for block in file.blocks(BlockOptions::new(1024))? {
    ///     let block = block?;
    ///     peak = block.as_slice().iter().fold(peak, |p, s| p.max(s.abs()));
    /// }
    /// println!("peak: {}", peak);
    /// # Ok::<(), soundfile_rs::Error>(())
    /// ```
    pub fn blocks<T: Sample>(&mut self, options: BlockOptions<T>) -> Result<Blocks<'_, 's, T>> {
        Blocks::new(self, options)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Write buffered data to the backing store.
    ///
    /// Has no effect on files opened read-only.
    pub fn flush(&mut self) -> Result<()> {
        let handle = self.handle()?;
        // SAFETY: the handle is open.
        unsafe { sf_write_sync(handle.as_ptr()) };
        self.check_error()
    }

    /// Flush and close the file.
    ///
    /// Closing happens at most once; later calls do nothing and return
    /// `Ok(())`. Dropping a `SoundFile` closes it as well, but only an
    /// explicit `close` reports errors.
    pub fn close(&mut self) -> Result<()> {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => return Ok(()),
        };

        // SAFETY: the handle was open and is not used again after sf_close.
        let code = unsafe {
            sf_write_sync(handle.as_ptr());
            sf_close(handle.as_ptr())
        };

        // The callbacks may run until sf_close returns.
        let stream_error = self.virtual_io.as_mut().and_then(VirtualIo::take_error);
        self.virtual_io = None;

        debug!(name = %self.name, code, "closed sound file");

        if let Some(error) = stream_error {
            return Err(Error::Io(error));
        }
        if code != 0 {
            return Err(Error::native(code));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    pub(crate) fn handle(&self) -> Result<NonNull<SNDFILE>> {
        self.handle.ok_or(Error::Closed)
    }

    pub(crate) fn ensure_readable(&self, operation: &'static str) -> Result<()> {
        if self.mode.is_readable() {
            Ok(())
        } else {
            Err(Error::WriteOnly { operation })
        }
    }

    /// Turn the handle's error flag, or a failed stream callback, into an
    /// error.
    fn check_error(&mut self) -> Result<()> {
        let handle = self.handle()?;

        // SAFETY: the handle is open.
        let code = unsafe { sf_error(handle.as_ptr()) };

        if let Some(error) = self.virtual_io.as_mut().and_then(VirtualIo::take_error) {
            return Err(Error::Io(error));
        }
        if code != 0 {
            return Err(Error::from_handle(code, handle.as_ptr()));
        }
        Ok(())
    }

    /// Update the frame count after a write of `written` frames.
    ///
    /// Seekable files ask libsndfile for the end; other files can only
    /// count.
    fn refresh_frames(&mut self, written: usize) -> Result<()> {
        if self.seekable() {
            let current = self.tell()?;
            let end = self.seek(SeekFrom::End(0))?;
            self.info.frames = end as sf_count_t;
            self.seek(SeekFrom::Start(current))?;
        } else {
            self.info.frames += written as sf_count_t;
        }
        Ok(())
    }

    /// Resolve how many frames a read should request.
    pub(crate) fn check_frames(&mut self, frames: Option<u64>, has_fill: bool) -> Result<u64> {
        if self.seekable() {
            let remaining = self.frames().saturating_sub(self.tell()?);
            Ok(match frames {
                Some(frames) if frames <= remaining || has_fill => frames,
                _ => remaining,
            })
        } else {
            frames.ok_or_else(|| {
                Error::invalid_argument("frames must be specified for non-seekable files")
            })
        }
    }

    /// Position the file at `start` and return the number of frames to
    /// read up to `stop` (or `frames`, if given).
    pub(crate) fn prepare_read(
        &mut self,
        start: i64,
        stop: Option<i64>,
        frames: Option<u64>,
    ) -> Result<u64> {
        if start != 0 && !self.seekable() {
            return Err(Error::not_seekable("start"));
        }
        if frames.is_some() && stop.is_some() {
            return Err(Error::ConflictingArguments {
                message: "only one of frames and stop may be used",
            });
        }

        let (start, stop) = slice_bounds(start, stop, self.frames());
        let frames = frames.unwrap_or(stop - start);
        if self.seekable() {
            self.seek(SeekFrom::Start(start))?;
        }
        Ok(frames)
    }

    /// Read up to `frames` frames into `out`, which must hold at least
    /// `frames * channels` samples.
    fn read_frames<T: Sample>(&mut self, out: &mut [T], frames: usize) -> Result<usize> {
        let handle = self.handle()?;
        debug_assert!(out.len() >= frames * self.channels());
        let ptr = out.as_mut_ptr();

        // SAFETY: out has room for frames * channels samples.
        self.transfer(frames, |count| unsafe { T::readf(handle.as_ptr(), ptr, count) })
    }

    /// Run one native read or write and restore the position after it.
    ///
    /// libsndfile keeps separate read and write pointers; seeking to
    /// `start + transferred` keeps them in step on seekable files.
    fn transfer<F>(&mut self, frames: usize, op: F) -> Result<usize>
    where
        F: FnOnce(sf_count_t) -> sf_count_t,
    {
        let count = sf_count_t::try_from(frames)
            .map_err(|_| Error::invalid_argument("frame count out of range"))?;

        let start = if self.seekable() { Some(self.tell()?) } else { None };

        let done = op(count);
        self.check_error()?;
        let done = done.max(0) as u64;

        if let Some(start) = start {
            self.seek(SeekFrom::Start(start + done))?;
        }
        Ok(done as usize)
    }
}

/// Clamp `start..stop` to `0..len` the way slice indices are resolved.
fn slice_bounds(start: i64, stop: Option<i64>, len: u64) -> (u64, u64) {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let resolve = |index: i64| -> i64 {
        if index < 0 {
            (index + len).max(0)
        } else {
            index.min(len)
        }
    };

    let start = resolve(start);
    let stop = stop.map_or(len, resolve).max(start);
    (start as u64, stop as u64)
}

impl Drop for SoundFile<'_> {
    fn drop(&mut self) {
        if let Err(error) = self.close() {
            warn!(name = %self.name, %error, "error closing sound file on drop");
        }
    }
}

impl fmt::Display for SoundFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SoundFile(\"{}\", mode=\"{}\", samplerate={}, channels={}, format=\"{}\")",
            self.name,
            self.mode,
            self.info.samplerate,
            self.info.channels,
            self.format()
        )
    }
}

impl fmt::Debug for SoundFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundFile")
            .field("name", &self.name)
            .field("mode", &self.mode.as_str())
            .field("samplerate", &self.info.samplerate)
            .field("channels", &self.info.channels)
            .field("frames", &self.info.frames)
            .field("format", &self.format())
            .field("subtype", &self.subtype())
            .field("endian", &self.endian())
            .field("closed", &self.is_closed())
            .finish()
    }
}

// PhantomData<*const ()> makes SoundFile !Send and !Sync automatically

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_nonexistent() {
        let result = SoundFile::open("/nonexistent/path/to/file.wav");
        match result {
            Err(Error::Native { code, message }) => {
                assert_ne!(code, 0);
                assert!(!message.is_empty());
            }
            other => panic!("Expected Native error, got {:?}", other.map(|f| f.to_string())),
        }
    }

    #[test]
    fn test_slice_bounds() {
        assert_eq!(slice_bounds(0, None, 10), (0, 10));
        assert_eq!(slice_bounds(2, Some(5), 10), (2, 5));
        assert_eq!(slice_bounds(-3, None, 10), (7, 10));
        assert_eq!(slice_bounds(0, Some(-2), 10), (0, 8));
        assert_eq!(slice_bounds(-20, Some(20), 10), (0, 10));
        assert_eq!(slice_bounds(6, Some(3), 10), (6, 6));
        assert_eq!(slice_bounds(15, None, 10), (10, 10));
    }
}
