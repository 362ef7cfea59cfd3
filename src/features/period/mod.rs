//! Period estimation modules
//!
//! Convert an onset-strength envelope into a tempo:
//! - Autocorrelation lag scoring (direct or FFT)
//! - Best-lag search over a BPM range

pub mod autocorrelation;
pub mod tempo;

pub use tempo::TempoEstimator;

use serde::{Deserialize, Serialize};

/// Estimated tempo of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoEstimate {
    /// Tempo in beats per minute, inside the configured search range
    pub bpm: f64,

    /// Confidence score (0.0-1.0)
    pub confidence: f64,
}
