//! Integration tests for sound files on pipes.
//!
//! libsndfile marks pipes as non-seekable, which switches reading and
//! writing to their counting, forward-only behaviour.

#![cfg(unix)]

mod common;

use std::os::unix::io::RawFd;

use soundfile_rs::{BlockOptions, Error, OpenOptions, ReadOptions, Result};

use common::stereo_ramp;

/// Create a pipe, returning its read and write ends.
fn pipe() -> (RawFd, RawFd) {
    let mut fds: [libc::c_int; 2] = [0; 2];
    let rc = unsafe { libc::pipe(fds.as_mut_ptr()) };
    assert_eq!(rc, 0, "pipe() failed");
    (fds[0], fds[1])
}

/// Headerless 16-bit stereo, the layout every test here streams.
fn raw_stereo() -> OpenOptions {
    OpenOptions::new()
        .samplerate(8000)
        .channels(2)
        .format("RAW")
        .subtype("PCM_16")
}

/// Write `chunks` through a non-seekable writer on `fd`, checking the
/// frame counter after each one. The descriptor is closed with the file.
fn stream_out(fd: RawFd, chunks: &[Vec<i16>]) -> Result<()> {
    let mut sink = raw_stereo().mode("w").open_fd(fd)?;
    assert!(!sink.seekable());
    assert_eq!(sink.frames(), 0);

    let mut expected = 0;
    for chunk in chunks {
        sink.write(chunk)?;
        expected += (chunk.len() / 2) as u64;
        assert_eq!(sink.frames(), expected);
    }

    sink.close()
}

#[test]
fn test_pipe_writer_counts_frames() -> Result<()> {
    let (reader, writer) = pipe();
    let mut sink = raw_stereo().mode("w").open_fd(writer)?;
    assert!(!sink.seekable());

    sink.write(&stereo_ramp(3))?;
    assert_eq!(sink.frames(), 3);
    sink.write(&stereo_ramp(2))?;
    assert_eq!(sink.frames(), 5);

    assert!(matches!(
        sink.write_slice(0, Some(1), &[0i16, 0]),
        Err(Error::NotSeekable { .. })
    ));
    sink.close()?;

    unsafe { libc::close(reader) };
    Ok(())
}

#[test]
fn test_pipe_reader_rejects_positioning() -> Result<()> {
    let (reader, writer) = pipe();
    stream_out(writer, &[stereo_ramp(3), stereo_ramp(2)])?;

    let mut source = raw_stereo().open_fd(reader)?;
    assert!(!source.seekable());

    match source.read::<i16>(None) {
        Err(Error::InvalidArgument { message }) => {
            assert!(message.contains("frames must be specified"));
        }
        other => panic!("Expected InvalidArgument, got: {:?}", other),
    }

    let ranged = source.read_with(&ReadOptions::<i16>::new().start(2));
    assert!(matches!(ranged, Err(Error::NotSeekable { .. })));

    let overlapping = source.blocks(BlockOptions::<i16>::new(4).overlap(1));
    assert!(matches!(overlapping, Err(Error::NotSeekable { .. })));

    let slice = source.read_slice::<i16>(0, Some(2));
    assert!(matches!(slice, Err(Error::NotSeekable { .. })));

    // None of the failures above consumed data
    let data = source.read::<i16>(Some(5))?;
    let mut expected = stereo_ramp(3);
    expected.extend(stereo_ramp(2));
    assert_eq!(data.as_slice(), expected.as_slice());

    assert_eq!(source.read::<i16>(Some(4))?.frames(), 0);

    Ok(())
}

#[test]
fn test_pipe_blocks_with_frame_count() -> Result<()> {
    let (reader, writer) = pipe();
    stream_out(writer, &[stereo_ramp(5)])?;

    let mut source = raw_stereo().open_fd(reader)?;
    let sizes: Vec<usize> = source
        .blocks(BlockOptions::<i16>::new(2).frames(5))?
        .map(|block| block.map(|b| b.frames()))
        .collect::<Result<_>>()?;
    assert_eq!(sizes, vec![2, 2, 1]);

    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn test_read_helper_drains_pipe() -> Result<()> {
    let (reader, writer) = pipe();
    stream_out(writer, &[stereo_ramp(4), stereo_ramp(3)])?;

    let path = format!("/dev/fd/{}", reader);
    let (data, samplerate) = soundfile_rs::read::<i16>(&path, &ReadOptions::new(), &raw_stereo())?;
    assert_eq!(samplerate, 8000);
    assert_eq!(data.frames(), 7);
    assert_eq!(&data.as_slice()[..8], stereo_ramp(4).as_slice());

    let ranged = soundfile_rs::read::<i16>(&path, &ReadOptions::new().start(1), &raw_stereo());
    assert!(matches!(ranged, Err(Error::NotSeekable { .. })));

    unsafe { libc::close(reader) };
    Ok(())
}
