//! Sample types.
//!
//! libsndfile converts between the encoding stored in a file and four
//! in-memory sample types: `i16`, `i32`, `f32` and `f64`. The [`Sample`]
//! trait ties each of them to the matching `sf_readf_*` / `sf_writef_*`
//! function.

use std::fmt;
use std::str::FromStr;

use libc::c_int;
use sndfile_sys::{
    sf_count_t, sf_readf_double, sf_readf_float, sf_readf_int, sf_readf_short,
    sf_writef_double, sf_writef_float, sf_writef_int, sf_writef_short, SNDFILE,
};

use crate::error::{Error, Result};

/// In-memory sample types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    /// 16-bit signed integer (i16)
    Int16,

    /// 32-bit signed integer (i32)
    Int32,

    /// 32-bit floating point (f32)
    Float32,

    /// 64-bit floating point (f64)
    Float64,
}

impl SampleType {
    /// Every sample type.
    pub const ALL: [SampleType; 4] = [
        SampleType::Int16,
        SampleType::Int32,
        SampleType::Float32,
        SampleType::Float64,
    ];

    /// The lower-case name, e.g. `"float64"`.
    pub const fn name(&self) -> &'static str {
        match self {
            SampleType::Int16 => "int16",
            SampleType::Int32 => "int32",
            SampleType::Float32 => "float32",
            SampleType::Float64 => "float64",
        }
    }

    /// Get the size in bytes of a single sample of this type.
    pub const fn size_bytes(&self) -> usize {
        match self {
            SampleType::Int16 => 2,
            SampleType::Int32 | SampleType::Float32 => 4,
            SampleType::Float64 => 8,
        }
    }

    /// Check if this type is a floating-point type.
    pub const fn is_float(&self) -> bool {
        matches!(self, SampleType::Float32 | SampleType::Float64)
    }
}

impl Default for SampleType {
    fn default() -> Self {
        SampleType::Float64
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SampleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SampleType::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| Error::invalid_argument(format!("unknown sample type '{}'", s)))
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A sample type libsndfile can read and write.
///
/// This trait is sealed; it is implemented for `i16`, `i32`, `f32` and
/// `f64` only.
pub trait Sample: sealed::Sealed + Copy + Default + PartialEq + fmt::Debug + 'static {
    /// The runtime tag for this type.
    const TYPE: SampleType;

    /// Read up to `frames` interleaved frames into `ptr`.
    ///
    /// # Safety
    ///
    /// `handle` must be an open handle and `ptr` must be valid for
    /// `frames * channels` writes.
    #[doc(hidden)]
    unsafe fn readf(handle: *mut SNDFILE, ptr: *mut Self, frames: sf_count_t) -> sf_count_t;

    /// Write `frames` interleaved frames from `ptr`.
    ///
    /// # Safety
    ///
    /// `handle` must be an open handle and `ptr` must be valid for
    /// `frames * channels` reads.
    #[doc(hidden)]
    unsafe fn writef(handle: *mut SNDFILE, ptr: *const Self, frames: sf_count_t) -> sf_count_t;
}

impl Sample for i16 {
    const TYPE: SampleType = SampleType::Int16;

    unsafe fn readf(handle: *mut SNDFILE, ptr: *mut Self, frames: sf_count_t) -> sf_count_t {
        sf_readf_short(handle, ptr, frames)
    }

    unsafe fn writef(handle: *mut SNDFILE, ptr: *const Self, frames: sf_count_t) -> sf_count_t {
        sf_writef_short(handle, ptr, frames)
    }
}

impl Sample for i32 {
    const TYPE: SampleType = SampleType::Int32;

    unsafe fn readf(handle: *mut SNDFILE, ptr: *mut Self, frames: sf_count_t) -> sf_count_t {
        sf_readf_int(handle, ptr as *mut c_int, frames)
    }

    unsafe fn writef(handle: *mut SNDFILE, ptr: *const Self, frames: sf_count_t) -> sf_count_t {
        sf_writef_int(handle, ptr as *const c_int, frames)
    }
}

impl Sample for f32 {
    const TYPE: SampleType = SampleType::Float32;

    unsafe fn readf(handle: *mut SNDFILE, ptr: *mut Self, frames: sf_count_t) -> sf_count_t {
        sf_readf_float(handle, ptr, frames)
    }

    unsafe fn writef(handle: *mut SNDFILE, ptr: *const Self, frames: sf_count_t) -> sf_count_t {
        sf_writef_float(handle, ptr, frames)
    }
}

impl Sample for f64 {
    const TYPE: SampleType = SampleType::Float64;

    unsafe fn readf(handle: *mut SNDFILE, ptr: *mut Self, frames: sf_count_t) -> sf_count_t {
        sf_readf_double(handle, ptr, frames)
    }

    unsafe fn writef(handle: *mut SNDFILE, ptr: *const Self, frames: sf_count_t) -> sf_count_t {
        sf_writef_double(handle, ptr, frames)
    }
}
