//! Block-wise reading.
//!
//! [`SoundFile::blocks`] returns a [`Blocks`] iterator that reads a fixed
//! number of frames at a time, optionally rewinding between blocks so that
//! consecutive blocks overlap.

use std::io::SeekFrom;
use std::iter::FusedIterator;

use tracing::trace;

use crate::buffer::AudioBuffer;
use crate::error::{Error, Result};
use crate::file::SoundFile;
use crate::options::ReadOptions;
use crate::sample::Sample;

/// Settings for block-wise reading.
///
/// # Example
///
/// ```no_run
/// use soundfile_rs::{BlockOptions, SoundFile};
///
/// let mut file = SoundFile::open("input.wav")?;
/// // 50% overlapping windows; the last one padded with zeros.
/// let options = BlockOptions::new(2048).overlap(1024).fill_value(0.0f64);
/// for block in file.blocks(options)? {
///     assert_eq!(block?.frames(), 2048);
/// }
/// # Ok::<(), soundfile_rs::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BlockOptions<T> {
    pub(crate) blocksize: usize,
    pub(crate) overlap: usize,
    pub(crate) frames: Option<u64>,
    pub(crate) start: Option<i64>,
    pub(crate) stop: Option<i64>,
    pub(crate) fill_value: Option<T>,
    pub(crate) always_2d: bool,
}

impl<T: Sample> BlockOptions<T> {
    /// Blocks of `blocksize` frames, no overlap, until the end of the file.
    pub fn new(blocksize: usize) -> Self {
        BlockOptions {
            blocksize,
            overlap: 0,
            frames: None,
            start: None,
            stop: None,
            fill_value: None,
            always_2d: true,
        }
    }

    /// Frames to rewind between blocks. Requires a seekable file.
    pub fn overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    /// Total number of frames to read.
    pub fn frames(mut self, frames: u64) -> Self {
        self.frames = Some(frames);
        self
    }

    /// First frame to read; negative values count from the end.
    pub fn start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    /// Frame index to stop before; negative values count from the end.
    pub fn stop(mut self, stop: i64) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Pad the last block to `blocksize` frames with this value.
    pub fn fill_value(mut self, value: T) -> Self {
        self.fill_value = Some(value);
        self
    }

    /// Whether mono blocks get a `[frames, 1]` shape (the default).
    pub fn always_2d(mut self, always_2d: bool) -> Self {
        self.always_2d = always_2d;
        self
    }
}

/// Iteration state shared by [`Blocks`] and [`IntoBlocks`].
#[derive(Debug)]
struct BlockState<T> {
    blocksize: usize,
    overlap: usize,
    remaining: u64,
    fill_value: Option<T>,
    always_2d: bool,
    failed: bool,
}

impl<T: Sample> BlockState<T> {
    fn new(file: &mut SoundFile<'_>, options: BlockOptions<T>) -> Result<Self> {
        file.handle()?;
        file.ensure_readable("blocks()")?;

        if options.overlap != 0 && !file.seekable() {
            return Err(Error::not_seekable("overlap"));
        }
        if options.blocksize == 0 {
            return Err(Error::invalid_argument("blocksize must be at least 1"));
        }
        if options.overlap >= options.blocksize {
            return Err(Error::invalid_argument(format!(
                "overlap ({}) must be smaller than blocksize ({})",
                options.overlap, options.blocksize
            )));
        }

        let frames = if options.start.is_some() || options.stop.is_some() {
            Some(file.prepare_read(options.start.unwrap_or(0), options.stop, options.frames)?)
        } else {
            options.frames
        };
        let remaining = file.check_frames(frames, options.fill_value.is_some())?;

        Ok(BlockState {
            blocksize: options.blocksize,
            overlap: options.overlap,
            remaining,
            fill_value: options.fill_value,
            always_2d: options.always_2d,
            failed: false,
        })
    }

    fn next_block(&mut self, file: &mut SoundFile<'_>) -> Option<Result<AudioBuffer<T>>> {
        if self.remaining == 0 || self.failed {
            return None;
        }

        let result = self.read_block(file);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }

    fn read_block(&mut self, file: &mut SoundFile<'_>) -> Result<AudioBuffer<T>> {
        let request = self.remaining.min(self.blocksize as u64);

        let mut options = ReadOptions::new()
            .frames(request)
            .always_2d(self.always_2d);
        options.fill_value = self.fill_value;
        let mut block = file.read_with(&options)?;

        if let Some(value) = self.fill_value {
            if block.frames() < self.blocksize {
                block.resize_frames(self.blocksize, value);
            }
        }

        self.advance(file, request)?;

        trace!(frames = block.frames(), remaining = self.remaining, "read block");
        Ok(block)
    }

    fn next_block_into(&mut self, file: &mut SoundFile<'_>, out: &mut [T]) -> Option<Result<usize>> {
        if self.remaining == 0 || self.failed {
            return None;
        }

        let result = self.read_block_into(file, out);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }

    /// Read the next block into `out`, which holds exactly one block.
    ///
    /// Returns the number of valid frames at the start of `out`.
    fn read_block_into(&mut self, file: &mut SoundFile<'_>, out: &mut [T]) -> Result<usize> {
        let channels = file.channels();
        if out.len() != self.blocksize * channels {
            return Err(Error::InvalidShape {
                len: out.len(),
                channels,
            });
        }

        let request = self.remaining.min(self.blocksize as u64) as usize;
        let read = file.read_into(&mut out[..request * channels], self.fill_value)?;

        let frames = match self.fill_value {
            Some(value) => {
                out[request * channels..].fill(value);
                self.blocksize
            }
            None => read,
        };

        self.advance(file, request as u64)?;

        trace!(frames, remaining = self.remaining, "read block into buffer");
        Ok(frames)
    }

    /// Account for a block of `request` frames and rewind by the overlap.
    fn advance(&mut self, file: &mut SoundFile<'_>, request: u64) -> Result<()> {
        self.remaining -= request;
        if self.remaining > 0 && file.seekable() {
            file.seek(SeekFrom::Current(-(self.overlap as i64)))?;
            self.remaining += self.overlap as u64;
        }
        Ok(())
    }
}

/// Iterator over blocks of a borrowed [`SoundFile`].
///
/// Created by [`SoundFile::blocks`]. Each item is one block of interleaved
/// frames. After an error the iterator is exhausted.
#[derive(Debug)]
pub struct Blocks<'f, 's, T> {
    file: &'f mut SoundFile<'s>,
    state: BlockState<T>,
}

impl<'f, 's, T: Sample> Blocks<'f, 's, T> {
    pub(crate) fn new(file: &'f mut SoundFile<'s>, options: BlockOptions<T>) -> Result<Self> {
        let state = BlockState::new(file, options)?;
        Ok(Blocks { file, state })
    }

    /// Read the next block into a caller-owned buffer.
    ///
    /// `out` must hold `blocksize * channels` samples and can be reused for
    /// every block. Returns the number of frames at the start of `out` that
    /// belong to the block, or `None` once the blocks are exhausted. With a
    /// fill value the whole buffer is always valid.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use soundfile_rs::{BlockOptions, SoundFile};
    ///
    /// let mut file = SoundFile::open("input.wav")?;
    /// let channels = file.channels();
    /// let mut buffer = vec![0.0f32; 1024 * channels];
    /// let mut blocks = file.blocks(BlockOptions::<f32>::new(1024))?;
    /// while let Some(frames) = blocks.next_into(&mut buffer) {
    ///     let block = &buffer[..frames? * channels];
    ///     println!("{} samples", block.len());
    /// }
    /// # Ok::<(), soundfile_rs::Error>(())
    /// ```
    pub fn next_into(&mut self, out: &mut [T]) -> Option<Result<usize>> {
        self.state.next_block_into(self.file, out)
    }
}

impl<T: Sample> Iterator for Blocks<'_, '_, T> {
    type Item = Result<AudioBuffer<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.state.next_block(self.file)
    }
}

impl<T: Sample> FusedIterator for Blocks<'_, '_, T> {}

/// Iterator over blocks of an owned [`SoundFile`].
///
/// Returned by [`blocks`](crate::blocks); the file is closed when the
/// iterator is dropped.
#[derive(Debug)]
pub struct IntoBlocks<T> {
    file: SoundFile<'static>,
    state: BlockState<T>,
}

impl<T: Sample> IntoBlocks<T> {
    pub(crate) fn new(mut file: SoundFile<'static>, options: BlockOptions<T>) -> Result<Self> {
        let state = BlockState::new(&mut file, options)?;
        Ok(IntoBlocks { file, state })
    }

    /// The file being read.
    pub fn file(&self) -> &SoundFile<'static> {
        &self.file
    }

    /// Read the next block into a caller-owned buffer.
    ///
    /// See [`Blocks::next_into`].
    pub fn next_into(&mut self, out: &mut [T]) -> Option<Result<usize>> {
        self.state.next_block_into(&mut self.file, out)
    }
}

impl<T: Sample> Iterator for IntoBlocks<T> {
    type Item = Result<AudioBuffer<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.state.next_block(&mut self.file)
    }
}

impl<T: Sample> FusedIterator for IntoBlocks<T> {}
