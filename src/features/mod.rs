//! Feature extraction modules
//!
//! This module contains all feature extraction algorithms:
//! - Onset-strength envelope
//! - Period estimation (BPM detection)
//! - Pitch-class profile (chroma) extraction
//! - Key detection
//! - Spectral and energy features

pub mod chroma;
pub mod key;
pub mod onset;
pub mod period;
pub mod spectral;
