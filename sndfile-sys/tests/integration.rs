//! Integration tests for sndfile-sys
//!
//! These tests verify that the FFI declarations line up with the linked
//! libsndfile.

#![cfg(not(sndfile_unlinked))]

use sndfile_sys::*;
use std::ffi::{CStr, CString};
use std::os::raw::{c_int, c_void};
use std::ptr;

/// Query a format description through `sf_command`.
fn format_info(command: c_int, format: c_int) -> SF_FORMAT_INFO {
    let mut info = SF_FORMAT_INFO {
        format,
        ..SF_FORMAT_INFO::default()
    };
    unsafe {
        sf_command(
            ptr::null_mut(),
            command,
            &mut info as *mut SF_FORMAT_INFO as *mut c_void,
            std::mem::size_of::<SF_FORMAT_INFO>() as c_int,
        );
    }
    info
}

#[test]
fn test_open_nonexistent_returns_null() {
    let path = CString::new("/nonexistent/path/to/file.wav").unwrap();
    let mut info = SF_INFO::default();

    let handle = unsafe { sf_open(path.as_ptr(), SFM_READ, &mut info) };
    assert!(handle.is_null());

    // The failure is reported through the global error state
    let code = unsafe { sf_error(ptr::null_mut()) };
    assert_ne!(code, SF_ERR_NO_ERROR);

    let message = unsafe { CStr::from_ptr(sf_strerror(ptr::null_mut())) };
    assert!(!message.to_bytes().is_empty());
}

#[test]
fn test_major_format_count() {
    let mut count: c_int = 0;
    unsafe {
        sf_command(
            ptr::null_mut(),
            SFC_GET_FORMAT_MAJOR_COUNT,
            &mut count as *mut c_int as *mut c_void,
            std::mem::size_of::<c_int>() as c_int,
        );
    }

    // Every libsndfile build supports at least WAV, AIFF, AU and RAW
    assert!(count >= 4, "major format count: {}", count);
}

#[test]
fn test_format_info_wav() {
    let info = format_info(SFC_GET_FORMAT_INFO, SF_FORMAT_WAV);
    assert_eq!(info.format, SF_FORMAT_WAV);
    assert!(!info.name.is_null());

    let name = unsafe { CStr::from_ptr(info.name) };
    assert!(name.to_string_lossy().starts_with("WAV"));
}

#[test]
fn test_format_info_pcm16() {
    let info = format_info(SFC_GET_FORMAT_INFO, SF_FORMAT_PCM_16);
    assert!(!info.name.is_null());

    let name = unsafe { CStr::from_ptr(info.name) };
    assert!(name.to_string_lossy().contains("16"));
}

#[test]
fn test_write_and_read_back_through_path() {
    let path = std::env::temp_dir().join(format!("sndfile-sys-{}.wav", std::process::id()));
    let c_path = CString::new(path.to_str().unwrap()).unwrap();

    let mut info = SF_INFO {
        samplerate: 8000,
        channels: 1,
        format: SF_FORMAT_WAV | SF_FORMAT_PCM_16,
        ..SF_INFO::default()
    };

    let samples: [i16; 4] = [0, 1000, -1000, 32767];
    unsafe {
        let handle = sf_open(c_path.as_ptr(), SFM_WRITE, &mut info);
        assert!(!handle.is_null());
        assert_eq!(sf_writef_short(handle, samples.as_ptr(), 4), 4);
        assert_eq!(sf_close(handle), 0);
    }

    let mut info = SF_INFO::default();
    let mut read_back = [0i16; 4];
    unsafe {
        let handle = sf_open(c_path.as_ptr(), SFM_READ, &mut info);
        assert!(!handle.is_null());
        assert_eq!(info.frames, 4);
        assert_eq!(info.channels, 1);
        assert_eq!(info.samplerate, 8000);
        assert_eq!(sf_readf_short(handle, read_back.as_mut_ptr(), 4), 4);
        sf_close(handle);
    }

    assert_eq!(read_back, samples);
    let _ = std::fs::remove_file(path);
}
