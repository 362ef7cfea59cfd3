//! Sample buffers and windowed frame iteration
//!
//! A [`SampleBuffer`] is the decoded, down-mixed mono channel handed over by
//! the decoding layer. [`FrameLayout`] slices it into overlapping, fixed-size
//! [`Frame`] views. Trailing samples that do not fill a whole frame are
//! dropped, never padded.

use crate::error::{AnalysisError, Result};

/// Decoded mono audio
///
/// Owns its samples. The constructor enforces `sample_rate > 0` and a
/// non-empty sample array, so every analysis stage downstream can rely on both.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    sample_rate: u32,
    samples: Vec<f64>,
}

impl SampleBuffer {
    /// Wrap decoded samples
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `sample_rate == 0`
    /// - `EmptyBuffer` if `samples` is empty
    pub fn new(sample_rate: u32, samples: Vec<f64>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(AnalysisError::invalid("sample_rate", "must be > 0"));
        }
        if samples.is_empty() {
            return Err(AnalysisError::EmptyBuffer);
        }
        Ok(Self {
            sample_rate,
            samples,
        })
    }

    /// Convenience constructor for `f32` decoder output
    pub fn from_f32(sample_rate: u32, samples: &[f32]) -> Result<Self> {
        Self::new(sample_rate, samples.iter().map(|&s| f64::from(s)).collect())
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The mono channel
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed buffer; present for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Iterate frames of this buffer
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `frame_size` or `hop_size` is zero.
    pub fn frames(&self, frame_size: usize, hop_size: usize) -> Result<Frames<'_>> {
        frames(&self.samples, frame_size, hop_size)
    }
}

/// Iterate overlapping frames of `samples`
///
/// # Errors
///
/// `InvalidParameter` if `frame_size` or `hop_size` is zero.
///
/// # Example
///
/// ```
/// use ghost_dsp::io::sample_buffer::frames;
///
/// let samples = vec![0.0; 10];
/// let offsets: Vec<usize> = frames(&samples, 4, 2)?.map(|f| f.offset()).collect();
/// assert_eq!(offsets, vec![0, 2, 4, 6]);
/// # Ok::<(), ghost_dsp::AnalysisError>(())
/// ```
pub fn frames(samples: &[f64], frame_size: usize, hop_size: usize) -> Result<Frames<'_>> {
    Ok(FrameLayout::new(frame_size, hop_size)?.frames(samples))
}

/// Validated frame size and hop
///
/// Holding a `FrameLayout` proves both sizes are non-zero, so iterating with
/// it cannot fail or loop forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    frame_size: usize,
    hop_size: usize,
}

impl FrameLayout {
    /// Validate a frame size and hop
    pub fn new(frame_size: usize, hop_size: usize) -> Result<Self> {
        if frame_size == 0 {
            return Err(AnalysisError::invalid("frame_size", "must be > 0"));
        }
        if hop_size == 0 {
            return Err(AnalysisError::invalid("hop_size", "must be > 0"));
        }
        Ok(Self {
            frame_size,
            hop_size,
        })
    }

    /// Frame length in samples
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Hop between consecutive frame starts
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Number of whole frames that fit in `len` samples
    pub fn frame_count(&self, len: usize) -> usize {
        if len < self.frame_size {
            0
        } else {
            (len - self.frame_size) / self.hop_size + 1
        }
    }

    /// Lazily iterate the frames of `samples`
    pub fn frames<'a>(&self, samples: &'a [f64]) -> Frames<'a> {
        Frames {
            samples,
            layout: *self,
            offset: 0,
        }
    }
}

/// A read-only view of `frame_size` consecutive samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    offset: usize,
    samples: &'a [f64],
}

impl<'a> Frame<'a> {
    /// Index of the first sample within the source buffer
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The frame's samples
    pub fn samples(&self) -> &'a [f64] {
        self.samples
    }
}

impl std::ops::Deref for Frame<'_> {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        self.samples
    }
}

/// Iterator over the frames of a buffer
///
/// Cloning restarts from the clone point; the iterator never yields a
/// partial trailing frame.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    samples: &'a [f64],
    layout: FrameLayout,
    offset: usize,
}

impl<'a> Iterator for Frames<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Frame<'a>> {
        let end = self.offset.checked_add(self.layout.frame_size)?;
        if end > self.samples.len() {
            return None;
        }
        let frame = Frame {
            offset: self.offset,
            samples: &self.samples[self.offset..end],
        };
        self.offset = self.offset.saturating_add(self.layout.hop_size);
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .layout
            .frame_count(self.samples.len().saturating_sub(self.offset));
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}

impl std::iter::FusedIterator for Frames<'_> {}
