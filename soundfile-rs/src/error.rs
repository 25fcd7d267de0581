//! Error types for sound file operations.
//!
//! This module provides the [`Error`] enum covering argument validation and
//! failures reported by libsndfile, along with a convenient [`Result`] alias.

use std::ffi::{CStr, NulError};
use std::io;
use std::path::PathBuf;

use libc::c_int;
use sndfile_sys::{sf_error_number, sf_strerror, SNDFILE};
use thiserror::Error;

/// Result type alias for sound file operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while working with sound files.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error from the file system or from a virtual I/O stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// libsndfile reported an error.
    #[error("{message}")]
    Native {
        /// The libsndfile error code.
        code: i32,
        /// The message libsndfile associates with the code.
        message: String,
    },

    /// The mode string is malformed.
    #[error("Invalid mode: '{mode}' ({reason})")]
    InvalidMode {
        /// The rejected mode string.
        mode: String,
        /// Why the mode was rejected.
        reason: &'static str,
    },

    /// Unknown major format name.
    #[error("Invalid format string: '{value}'")]
    InvalidFormat {
        /// The unknown name.
        value: String,
    },

    /// Unknown subtype name.
    #[error("Invalid subtype string: '{value}'")]
    InvalidSubtype {
        /// The unknown name.
        value: String,
    },

    /// Unknown endian-ness name.
    #[error("Invalid endian-ness: '{value}'")]
    InvalidEndian {
        /// The unknown name.
        value: String,
    },

    /// The major format has no default subtype, so one must be given.
    #[error("No default subtype for major format '{format}'")]
    NoDefaultSubtype {
        /// The major format name.
        format: String,
    },

    /// libsndfile rejected the format/subtype/endian combination.
    #[error("Invalid combination of format, subtype and endian")]
    InvalidFormatCombination,

    /// No format was given and none could be derived from the file name.
    #[error("No format specified and unable to get format from file extension: '{name}'")]
    UnknownFormat {
        /// The file name the extension was taken from.
        name: String,
    },

    /// A required open argument was not supplied.
    #[error("{name} must be specified")]
    MissingArgument {
        /// The argument name.
        name: &'static str,
    },

    /// Format arguments were supplied when opening an existing non-RAW file.
    #[error("Not allowed for existing files (except 'RAW'): samplerate, channels, format, subtype, endian")]
    NotAllowedForExisting,

    /// Two arguments that exclude each other were both supplied.
    #[error("Conflicting arguments: {message}")]
    ConflictingArguments {
        /// Description of the conflict.
        message: &'static str,
    },

    /// An argument value is out of range.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },

    /// The file opened with an exclusive-create mode already exists.
    #[error("File exists: {path}")]
    FileExists {
        /// Path to the existing file.
        path: PathBuf,
    },

    /// A sample buffer does not match the channel layout of the file.
    #[error("Invalid shape: {len} samples cannot be split into frames of {channels} channels")]
    InvalidShape {
        /// Number of samples in the buffer.
        len: usize,
        /// Channel count of the file.
        channels: usize,
    },

    /// The data does not fit the requested slice.
    #[error("Could not fit data of length {data} into slice of length {slice}")]
    SliceLength {
        /// Frames of data supplied.
        data: usize,
        /// Frames in the slice.
        slice: usize,
    },

    /// The operation requires a seekable file.
    #[error("{operation} is only allowed for seekable files")]
    NotSeekable {
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// Reading was attempted on a file opened write-only.
    #[error("{operation} is not allowed in write-only mode")]
    WriteOnly {
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// The file has already been closed.
    #[error("I/O operation on closed file")]
    Closed,

    /// Error converting a Rust string to C string (embedded null byte).
    #[error("Invalid C string: {0}")]
    CString(#[from] NulError),
}

impl Error {
    /// Create a Native error from a libsndfile error code.
    pub fn native(code: i32) -> Self {
        // SAFETY: sf_error_number returns a pointer to a static string for
        // any input, including unknown codes.
        let message = unsafe { c_message(sf_error_number(code as c_int)) };
        Self::Native { code, message }
    }

    /// Create a Native error from the error state of a handle.
    ///
    /// A null handle reads the global error state, which is where failed
    /// opens report.
    pub(crate) fn from_handle(code: i32, handle: *mut SNDFILE) -> Self {
        // SAFETY: sf_strerror accepts null and valid handles alike.
        let message = unsafe { c_message(sf_strerror(handle)) };
        Self::Native { code, message }
    }

    /// Create an InvalidMode error.
    pub fn invalid_mode(mode: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidMode { mode: mode.into(), reason }
    }

    /// Create an InvalidFormat error.
    pub fn invalid_format(value: impl Into<String>) -> Self {
        Self::InvalidFormat { value: value.into() }
    }

    /// Create an InvalidSubtype error.
    pub fn invalid_subtype(value: impl Into<String>) -> Self {
        Self::InvalidSubtype { value: value.into() }
    }

    /// Create an InvalidEndian error.
    pub fn invalid_endian(value: impl Into<String>) -> Self {
        Self::InvalidEndian { value: value.into() }
    }

    /// Create a MissingArgument error.
    pub const fn missing(name: &'static str) -> Self {
        Self::MissingArgument { name }
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument { message: message.into() }
    }

    /// Create a NotSeekable error.
    pub const fn not_seekable(operation: &'static str) -> Self {
        Self::NotSeekable { operation }
    }

    /// The libsndfile error code, if this error came from the library.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Native { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Copy a C string owned by libsndfile.
unsafe fn c_message(ptr: *const libc::c_char) -> String {
    if ptr.is_null() {
        return String::from("Unknown libsndfile error");
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_format("MP9");
        assert!(err.to_string().contains("MP9"));

        let err = Error::missing("samplerate");
        assert_eq!(err.to_string(), "samplerate must be specified");

        let err = Error::InvalidShape { len: 5, channels: 2 };
        assert!(err.to_string().contains("2 channels"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.code(), None);
    }

    #[test]
    fn test_native_error_message() {
        let err = Error::native(sndfile_sys::SF_ERR_UNRECOGNISED_FORMAT as i32);
        assert_eq!(err.code(), Some(1));
        assert!(!err.to_string().is_empty());
    }
}
