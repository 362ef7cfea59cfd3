//! Analysis metadata structures

use serde::{Deserialize, Serialize};

/// Conditions under which part of the analysis fell back to a default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnalysisFlag {
    /// Every sample is zero
    Silent,
    /// Buffer holds no full feature frame; energy is the fallback value
    ShorterThanFrame,
    /// No periodicity was found; BPM is the fallback value
    DefaultTempo,
}

/// Analysis metadata
///
/// Holds only facts derived from the input, so two analyses of the same
/// buffer compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    /// Buffer duration in seconds
    pub duration_seconds: f64,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Crate version that produced the record
    pub algorithm_version: String,

    /// Fallback conditions, in the order they were detected
    pub flags: Vec<AnalysisFlag>,
}

impl AnalysisMetadata {
    /// Metadata for a buffer, stamped with the current crate version
    pub fn new(duration_seconds: f64, sample_rate: u32) -> Self {
        Self {
            duration_seconds,
            sample_rate,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            flags: Vec::new(),
        }
    }

    /// Whether `flag` was raised
    pub fn has_flag(&self, flag: AnalysisFlag) -> bool {
        self.flags.contains(&flag)
    }
}
