//! Per-frame loudness, brightness and noisiness measures

use crate::preprocessing::hann_window;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Numerical stability epsilon
const EPSILON: f64 = 1e-12;

/// Root-mean-square amplitude: `sqrt(mean(x²))`
pub fn rms(frame: &[f64]) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }
    (frame.iter().map(|&x| x * x).sum::<f64>() / frame.len() as f64).sqrt()
}

/// Fraction of adjacent sample pairs whose signs differ
///
/// Zero counts as positive, so a silent frame has no crossings.
pub fn zero_crossing_rate(frame: &[f64]) -> f64 {
    if frame.len() < 2 {
        return 0.0;
    }
    let crossings = frame
        .windows(2)
        .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
        .count();
    crossings as f64 / (frame.len() - 1) as f64
}

/// Spectral centroid calculator for one frame size
///
/// Holds the FFT plan, the Hann window and scratch space so repeated frames
/// reuse them.
pub struct CentroidAnalyzer {
    frame_size: usize,
    window: Vec<f64>,
    fft: Arc<dyn Fft<f64>>,
    buffer: Vec<Complex<f64>>,
}

impl CentroidAnalyzer {
    /// Plan an FFT of `frame_size` points
    pub fn new(frame_size: usize) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        Self {
            frame_size,
            window: hann_window(frame_size),
            fft: planner.plan_fft_forward(frame_size),
            buffer: vec![Complex::new(0.0, 0.0); frame_size],
        }
    }

    /// Magnitude-weighted mean frequency of a Hann-windowed frame, in Hz
    ///
    /// Uses bins `0..=frame_size/2`. A frame with no spectral magnitude has a
    /// centroid of 0. Frames of the wrong length are truncated or zero-padded.
    pub fn centroid(&mut self, frame: &[f64], sample_rate: u32) -> f64 {
        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let x = frame.get(i).copied().unwrap_or(0.0);
            *slot = Complex::new(x * self.window[i], 0.0);
        }
        self.fft.process(&mut self.buffer);

        let bin_hz = f64::from(sample_rate) / self.frame_size as f64;
        let (weighted, total) = self.buffer[..=self.frame_size / 2]
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(weighted, total), (i, c)| {
                let magnitude = c.norm();
                (weighted + i as f64 * bin_hz * magnitude, total + magnitude)
            });

        if total > EPSILON {
            weighted / total
        } else {
            0.0
        }
    }
}

impl std::fmt::Debug for CentroidAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CentroidAnalyzer")
            .field("frame_size", &self.frame_size)
            .finish_non_exhaustive()
    }
}
