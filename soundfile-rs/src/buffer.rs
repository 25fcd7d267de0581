//! Interleaved sample buffers.

use crate::error::{Error, Result};
use crate::sample::Sample;

#[cfg(feature = "ndarray")]
use ndarray::{Array2, ShapeBuilder};

/// A block of interleaved audio frames.
///
/// Samples are stored frame by frame: for a stereo buffer the layout is
/// `L0 R0 L1 R1 ...`. This is the layout libsndfile reads and writes.
///
/// Mono buffers report a one-dimensional [`shape`](Self::shape) unless they
/// were created with `always_2d`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer<T> {
    data: Vec<T>,
    channels: usize,
    always_2d: bool,
}

impl<T: Sample> AudioBuffer<T> {
    /// Wrap interleaved samples.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidShape`] if `channels` is zero or `data.len()` is not
    /// a multiple of `channels`.
    pub fn new(data: Vec<T>, channels: usize) -> Result<Self> {
        if channels == 0 || data.len() % channels != 0 {
            return Err(Error::InvalidShape {
                len: data.len(),
                channels,
            });
        }
        Ok(AudioBuffer {
            data,
            channels,
            always_2d: false,
        })
    }

    /// Create a buffer of `frames` frames, every sample set to `value`.
    pub fn filled(frames: usize, channels: usize, value: T) -> Self {
        AudioBuffer {
            data: vec![value; frames * channels],
            channels,
            always_2d: false,
        }
    }

    /// Report a two-dimensional shape even for mono data.
    pub fn with_always_2d(mut self, always_2d: bool) -> Self {
        self.always_2d = always_2d;
        self
    }

    /// Number of frames.
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.data.len() / self.channels
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Whether the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The array shape: `[frames]` for mono data, `[frames, channels]`
    /// otherwise or when `always_2d` is set.
    pub fn shape(&self) -> Vec<usize> {
        if self.channels == 1 && !self.always_2d {
            vec![self.frames()]
        } else {
            vec![self.frames(), self.channels]
        }
    }

    /// The samples of one frame.
    pub fn frame(&self, index: usize) -> Option<&[T]> {
        let start = index.checked_mul(self.channels)?;
        self.data.get(start..start + self.channels)
    }

    /// Iterate over frames.
    pub fn iter_frames(&self) -> std::slice::Chunks<'_, T> {
        self.data.chunks(self.channels.max(1))
    }

    /// Copy out one channel.
    pub fn channel(&self, channel: usize) -> Option<Vec<T>> {
        if channel >= self.channels {
            return None;
        }
        Some(
            self.data
                .iter()
                .skip(channel)
                .step_by(self.channels)
                .copied()
                .collect(),
        )
    }

    /// The interleaved samples.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The interleaved samples, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Take the interleaved samples.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub(crate) fn truncate_frames(&mut self, frames: usize) {
        self.data.truncate(frames * self.channels);
    }

    pub(crate) fn resize_frames(&mut self, frames: usize, value: T) {
        self.data.resize(frames * self.channels, value);
    }

    /// Convert to an array of shape `(frames, channels)`.
    ///
    /// Requires the `ndarray` feature.
    #[cfg(feature = "ndarray")]
    pub fn to_array2(&self) -> Result<Array2<T>> {
        let shape = (self.frames(), self.channels);
        Array2::from_shape_vec(shape.strides((shape.1, 1)), self.data.clone()).map_err(|_| {
            Error::InvalidShape {
                len: self.data.len(),
                channels: self.channels,
            }
        })
    }

    /// Build a buffer from an array of shape `(frames, channels)`.
    ///
    /// Requires the `ndarray` feature.
    #[cfg(feature = "ndarray")]
    pub fn from_array2(array: &Array2<T>) -> Result<Self> {
        let (frames, channels) = array.dim();

        let data: Vec<T> = if array.is_standard_layout() {
            array.iter().copied().collect()
        } else {
            let mut vec = Vec::with_capacity(frames * channels);
            for row in array.rows() {
                vec.extend(row.iter().copied());
            }
            vec
        };

        AudioBuffer::new(data, channels).map(|buffer| buffer.with_always_2d(true))
    }
}

impl<T> AsRef<[T]> for AudioBuffer<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}
