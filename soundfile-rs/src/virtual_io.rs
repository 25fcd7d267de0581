//! Virtual I/O: byte streams as libsndfile backing stores.
//!
//! `sf_open_virtual` takes a table of five callbacks (get_filelen, seek,
//! read, write, tell) and an opaque `user_data` pointer that is handed back
//! to every callback. This module provides the Rust side of that contract:
//!
//! - [`VirtualStream`], implemented for every `Read + Write + Seek` type
//! - [`ReadOnly`], an adapter for streams that only implement `Read + Seek`
//! - `VirtualIo`, the heap-pinned state the callbacks point into
//!
//! libsndfile may call back into the stream at any time while the handle is
//! open, including from `sf_close`. The state is therefore owned by the
//! `SoundFile` and released only after the handle is closed. Its lifetime
//! parameter ties the borrowed stream to the file, so a stream passed by
//! `&mut` cannot be touched while the file is open.
//!
//! Callbacks never unwind into C. A panic in the stream is caught and turned
//! into a callback failure, and the last stream error is kept so that the
//! caller sees the real `io::Error` rather than a generic libsndfile message.

use std::any::Any;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::ptr::{self, NonNull};
use std::slice;

use libc::{c_int, c_void};
use sndfile_sys::{sf_count_t, SF_SEEK_CUR, SF_SEEK_END, SF_SEEK_SET, SF_VIRTUAL_IO};
use tracing::{trace, warn};

/// A byte stream libsndfile can read from and write to.
///
/// This is implemented for every `Read + Write + Seek` type, including
/// `&mut T`, `File` and `Cursor<Vec<u8>>`. Use [`ReadOnly`] to wrap a stream
/// that cannot be written.
pub trait VirtualStream: Read + Write + Seek {
    /// Total length of the stream in bytes.
    ///
    /// Found by seeking to the end and back, leaving the position unchanged.
    fn byte_len(&mut self) -> io::Result<u64> {
        let position = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;
        if position != len {
            self.seek(SeekFrom::Start(position))?;
        }
        Ok(len)
    }
}

impl<T: Read + Write + Seek> VirtualStream for T {}

/// Adapter that makes a `Read + Seek` stream usable for virtual I/O.
///
/// Writes fail with [`io::ErrorKind::PermissionDenied`].
///
/// # Example
///
/// ```no_run
/// use soundfile_rs::{OpenOptions, ReadOnly};
///
/// let bytes: &[u8] = &std::fs::read("input.wav")?;
/// let file = OpenOptions::new().open_virtual(ReadOnly::new(std::io::Cursor::new(bytes)))?;
/// println!("{}", file);
/// # Ok::<(), soundfile_rs::Error>(())
/// ```
#[derive(Debug)]
pub struct ReadOnly<R> {
    inner: R,
}

impl<R> ReadOnly<R> {
    /// Wrap a stream.
    pub fn new(inner: R) -> Self {
        ReadOnly { inner }
    }

    /// Get a reference to the wrapped stream.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Get a mutable reference to the wrapped stream.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwrap the stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for ReadOnly<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Seek> Seek for ReadOnly<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl<R> Write for ReadOnly<R> {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "stream is read-only",
        ))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// State shared with the callbacks through `user_data`.
struct State<'s> {
    stream: Box<dyn VirtualStream + 's>,
    callbacks: SF_VIRTUAL_IO,
    last_error: Option<io::Error>,
}

/// Owner of the callback state for one virtual handle.
///
/// The state lives at a fixed heap address for as long as this value
/// exists. It must outlive the `SNDFILE` handle it was opened with.
pub(crate) struct VirtualIo<'s> {
    state: NonNull<State<'s>>,
    _owns: PhantomData<Box<State<'s>>>,
}

impl<'s> VirtualIo<'s> {
    /// Move a stream to the heap and build its callback table.
    pub(crate) fn new<S: VirtualStream + 's>(stream: S) -> Self {
        let state = Box::new(State {
            stream: Box::new(stream),
            callbacks: SF_VIRTUAL_IO {
                get_filelen: Some(vio_get_filelen),
                seek: Some(vio_seek),
                read: Some(vio_read),
                write: Some(vio_write),
                tell: Some(vio_tell),
            },
            last_error: None,
        });

        VirtualIo {
            // SAFETY: Box::into_raw never returns null.
            state: unsafe { NonNull::new_unchecked(Box::into_raw(state)) },
            _owns: PhantomData,
        }
    }

    /// Pointer to the callback table, for `sf_open_virtual`.
    pub(crate) fn callbacks(&self) -> *mut SF_VIRTUAL_IO {
        // SAFETY: state is valid until drop; addr_of_mut avoids creating a
        // reference that could alias one held by a running callback.
        unsafe { ptr::addr_of_mut!((*self.state.as_ptr()).callbacks) }
    }

    /// The `user_data` pointer handed to every callback.
    pub(crate) fn user_data(&self) -> *mut c_void {
        self.state.as_ptr() as *mut c_void
    }

    /// Take the error recorded by the most recent failing callback.
    pub(crate) fn take_error(&mut self) -> Option<io::Error> {
        // SAFETY: &mut self guarantees no native call, and so no callback,
        // is running.
        unsafe { (*self.state.as_ptr()).last_error.take() }
    }
}

impl Drop for VirtualIo<'_> {
    fn drop(&mut self) {
        // SAFETY: the pointer came from Box::into_raw in new() and is
        // released exactly once here.
        unsafe {
            drop(Box::from_raw(self.state.as_ptr()));
        }
    }
}

/// Run a stream operation for a callback, containing errors and panics.
///
/// On failure the error is stored in the state and `failure` is returned.
unsafe fn with_stream<T>(
    user_data: *mut c_void,
    callback: &'static str,
    failure: T,
    f: impl FnOnce(&mut dyn VirtualStream) -> io::Result<T>,
) -> T {
    let state = match (user_data as *mut State<'_>).as_mut() {
        Some(state) => state,
        None => return failure,
    };

    let stream = state.stream.as_mut();
    let outcome = panic::catch_unwind(AssertUnwindSafe(move || f(stream)));

    let error = match outcome {
        Ok(Ok(value)) => return value,
        Ok(Err(error)) => error,
        Err(payload) => io::Error::new(
            io::ErrorKind::Other,
            format!("stream panicked: {}", panic_message(payload)),
        ),
    };

    warn!(callback, %error, "virtual I/O callback failed");
    state.last_error = Some(error);
    failure
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unexpected panic without message".to_string()
    }
}

fn to_count(value: u64) -> io::Result<sf_count_t> {
    sf_count_t::try_from(value)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "stream position out of range"))
}

unsafe extern "C" fn vio_get_filelen(user_data: *mut c_void) -> sf_count_t {
    with_stream(user_data, "get_filelen", -1, |stream| {
        let len = to_count(stream.byte_len()?)?;
        trace!(len, "vio get_filelen");
        Ok(len)
    })
}

unsafe extern "C" fn vio_seek(
    offset: sf_count_t,
    whence: c_int,
    user_data: *mut c_void,
) -> sf_count_t {
    with_stream(user_data, "seek", -1, |stream| {
        let target = match whence {
            w if w == SF_SEEK_SET as c_int => {
                let offset = u64::try_from(offset).map_err(|_| {
                    io::Error::new(io::ErrorKind::InvalidInput, "negative absolute seek")
                })?;
                SeekFrom::Start(offset)
            }
            w if w == SF_SEEK_CUR as c_int => SeekFrom::Current(offset),
            w if w == SF_SEEK_END as c_int => SeekFrom::End(offset),
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid whence: {}", other),
                ))
            }
        };
        let position = to_count(stream.seek(target)?)?;
        trace!(?target, position, "vio seek");
        Ok(position)
    })
}

unsafe extern "C" fn vio_read(
    ptr: *mut c_void,
    count: sf_count_t,
    user_data: *mut c_void,
) -> sf_count_t {
    if ptr.is_null() || count <= 0 {
        return 0;
    }
    let len = count as usize;

    // The native buffer may be uninitialized.
    ptr::write_bytes(ptr as *mut u8, 0, len);
    let buf = slice::from_raw_parts_mut(ptr as *mut u8, len);

    with_stream(user_data, "read", 0, |stream| {
        let mut filled = 0;
        while filled < buf.len() {
            match stream.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                // Bytes already copied are reported as a short read; the
                // next call sees the error.
                Err(e) if filled > 0 => {
                    trace!(read = filled, error = %e, "vio read stopped early");
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        trace!(requested = count, read = filled, "vio read");
        Ok(filled as sf_count_t)
    })
}

unsafe extern "C" fn vio_write(
    ptr: *const c_void,
    count: sf_count_t,
    user_data: *mut c_void,
) -> sf_count_t {
    if ptr.is_null() || count <= 0 {
        return 0;
    }
    let buf = slice::from_raw_parts(ptr as *const u8, count as usize);

    with_stream(user_data, "write", 0, |stream| {
        stream.write_all(buf)?;
        trace!(count, "vio write");
        Ok(count)
    })
}

unsafe extern "C" fn vio_tell(user_data: *mut c_void) -> sf_count_t {
    with_stream(user_data, "tell", -1, |stream| {
        let position = to_count(stream.stream_position()?)?;
        trace!(position, "vio tell");
        Ok(position)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Invoke callbacks the way libsndfile does.
    struct Caller<'a, 's> {
        vio: &'a VirtualIo<'s>,
    }

    impl Caller<'_, '_> {
        fn table(&self) -> SF_VIRTUAL_IO {
            unsafe { *self.vio.callbacks() }
        }

        fn len(&self) -> sf_count_t {
            unsafe { (self.table().get_filelen.unwrap())(self.vio.user_data()) }
        }

        fn seek(&self, offset: sf_count_t, whence: c_int) -> sf_count_t {
            unsafe { (self.table().seek.unwrap())(offset, whence, self.vio.user_data()) }
        }

        fn read(&self, buf: &mut [u8]) -> sf_count_t {
            unsafe {
                (self.table().read.unwrap())(
                    buf.as_mut_ptr() as *mut c_void,
                    buf.len() as sf_count_t,
                    self.vio.user_data(),
                )
            }
        }

        fn write(&self, buf: &[u8]) -> sf_count_t {
            unsafe {
                (self.table().write.unwrap())(
                    buf.as_ptr() as *const c_void,
                    buf.len() as sf_count_t,
                    self.vio.user_data(),
                )
            }
        }

        fn tell(&self) -> sf_count_t {
            unsafe { (self.table().tell.unwrap())(self.vio.user_data()) }
        }
    }

    #[test]
    fn test_byte_len_restores_position() {
        let mut cursor = Cursor::new(vec![0u8; 10]);
        cursor.set_position(3);
        assert_eq!(cursor.byte_len().unwrap(), 10);
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_callbacks_on_cursor() {
        let mut backing = Cursor::new(b"abcdef".to_vec());
        {
            let vio = VirtualIo::new(&mut backing);
            let io = Caller { vio: &vio };

            assert_eq!(io.len(), 6);
            assert_eq!(io.tell(), 0);

            let mut buf = [0u8; 4];
            assert_eq!(io.read(&mut buf), 4);
            assert_eq!(&buf, b"abcd");
            assert_eq!(io.tell(), 4);

            // Short read at end of stream
            assert_eq!(io.read(&mut buf), 2);
            assert_eq!(&buf[..2], b"ef");

            assert_eq!(io.seek(-3, SF_SEEK_END as c_int), 3);
            assert_eq!(io.write(b"XYZW"), 4);
            assert_eq!(io.len(), 7);

            assert_eq!(io.seek(1, SF_SEEK_SET as c_int), 1);
            assert_eq!(io.seek(2, SF_SEEK_CUR as c_int), 3);
        }
        assert_eq!(backing.into_inner(), b"abcXYZW".to_vec());
    }

    #[test]
    fn test_failures_are_recorded() {
        let mut vio = VirtualIo::new(Cursor::new(Vec::<u8>::new()));
        let io = Caller { vio: &vio };

        assert_eq!(io.seek(-1, SF_SEEK_SET as c_int), -1);
        assert_eq!(io.seek(0, 99), -1);
        drop(io);

        let error = vio.take_error().expect("error recorded");
        assert_eq!(error.kind(), io::ErrorKind::InvalidInput);
        assert!(vio.take_error().is_none());
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let mut vio = VirtualIo::new(ReadOnly::new(Cursor::new(vec![1u8, 2, 3])));
        let io = Caller { vio: &vio };

        assert_eq!(io.write(&[9, 9]), 0);
        let mut buf = [0u8; 3];
        assert_eq!(io.read(&mut buf), 3);
        assert_eq!(buf, [1, 2, 3]);
        drop(io);

        let error = vio.take_error().expect("write error recorded");
        assert_eq!(error.kind(), io::ErrorKind::PermissionDenied);
    }

    struct Exploding;

    impl Read for Exploding {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            panic!("boom");
        }
    }

    impl Write for Exploding {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for Exploding {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            Ok(0)
        }
    }

    #[test]
    fn test_panics_do_not_unwind() {
        let mut vio = VirtualIo::new(Exploding);
        let io = Caller { vio: &vio };

        let mut buf = [0u8; 8];
        assert_eq!(io.read(&mut buf), 0);
        drop(io);

        let error = vio.take_error().expect("panic recorded");
        assert!(error.to_string().contains("boom"));
    }

    /// Yields its bytes once, then fails.
    struct Trickle {
        data: Option<Vec<u8>>,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.take() {
                Some(data) => {
                    buf[..data.len()].copy_from_slice(&data);
                    Ok(data.len())
                }
                None => Err(io::Error::new(io::ErrorKind::TimedOut, "link down")),
            }
        }
    }

    impl Write for Trickle {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for Trickle {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            Ok(0)
        }
    }

    #[test]
    fn test_error_after_data_is_a_short_read() {
        let mut vio = VirtualIo::new(Trickle {
            data: Some(b"abc".to_vec()),
        });
        let io = Caller { vio: &vio };

        let mut buf = [0u8; 8];
        assert_eq!(io.read(&mut buf), 3);
        assert_eq!(&buf[..3], b"abc");
        drop(io);
        assert!(vio.take_error().is_none());

        let io = Caller { vio: &vio };
        assert_eq!(io.read(&mut buf), 0);
        drop(io);

        let error = vio.take_error().expect("error recorded");
        assert_eq!(error.kind(), io::ErrorKind::TimedOut);
    }

    #[test]
    fn test_null_user_data_fails_cleanly() {
        unsafe {
            assert_eq!(vio_tell(ptr::null_mut()), -1);
            assert_eq!(vio_get_filelen(ptr::null_mut()), -1);
        }
    }
}
