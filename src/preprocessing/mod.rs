//! Signal preparation shared by the feature extractors
//!
//! - Analysis windows (Hann)
//! - Integer-ratio decimation for the tempo path

pub mod decimation;
pub mod window;

pub use decimation::{decimate, decimate_filtered, decimation_ratio};
pub use window::hann_window;
