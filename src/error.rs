//! Error types for the analysis core
//!
//! Malformed inputs are errors; well-formed but degenerate audio (silence,
//! clips shorter than one frame) is not, and degrades to documented fallbacks.

use thiserror::Error;

/// Errors that can occur during audio analysis
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A configuration value or call parameter is degenerate
    /// (zero frame size, zero hop size, zero sample rate, inverted BPM range, ...)
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// The sample array is empty
    #[error("empty audio buffer: nothing to analyze")]
    EmptyBuffer,
}

impl AnalysisError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AnalysisError>;
