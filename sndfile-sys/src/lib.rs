//! # sndfile-sys
//!
//! Raw FFI bindings to [libsndfile](https://libsndfile.github.io/libsndfile/),
//! the C library for reading and writing sampled sound files.
//!
//! This crate provides low-level, unsafe bindings. For a safe, idiomatic
//! Rust API, use the `soundfile-rs` crate instead.
//!
//! ## Usage
//!
//! Direct usage requires careful attention to:
//!
//! - Closing every `SNDFILE` handle exactly once with `sf_close`
//! - Zeroing `SF_INFO` before opening a file for reading
//! - Keeping the `SF_VIRTUAL_IO` callbacks and their `user_data` alive for
//!   as long as a handle opened with `sf_open_virtual` exists
//!
//! ## Example
//!
//! ```no_run
//! use sndfile_sys::*;
//! use std::ffi::CString;
//!
//! unsafe {
//!     let path = CString::new("input.wav").unwrap();
//!     let mut info = SF_INFO::default();
//!     let file = sf_open(path.as_ptr(), SFM_READ, &mut info);
//!
//!     if !file.is_null() {
//!         let mut buffer = vec![0.0f64; 1024 * info.channels as usize];
//!         let frames = sf_readf_double(file, buffer.as_mut_ptr(), 1024);
//!         println!("read {} frames", frames);
//!         sf_close(file);
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `bindgen`: Regenerate the declarations from the installed `sndfile.h`

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(clippy::all)]

#[cfg(feature = "bindgen")]
include!(concat!(env!("OUT_DIR"), "/bindings.rs"));

#[cfg(not(feature = "bindgen"))]
mod bindings;
#[cfg(not(feature = "bindgen"))]
pub use bindings::*;

use std::os::raw::c_int;

// ============================================================================
// Format Word Helpers
// ============================================================================

/// Extract the major format bits (e.g. `SF_FORMAT_WAV`) of a format word.
pub const fn format_major(format: c_int) -> c_int {
    format & (SF_FORMAT_TYPEMASK as c_int)
}

/// Extract the subtype bits (e.g. `SF_FORMAT_PCM_16`) of a format word.
pub const fn format_subtype(format: c_int) -> c_int {
    format & (SF_FORMAT_SUBMASK as c_int)
}

/// Extract the endian-ness bits (e.g. `SF_ENDIAN_LITTLE`) of a format word.
pub const fn format_endian(format: c_int) -> c_int {
    format & (SF_FORMAT_ENDMASK as c_int)
}

// ============================================================================
// Tests
// ============================================================================
