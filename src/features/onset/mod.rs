//! Onset detection modules
//!
//! Onset-strength envelopes feeding the tempo estimator:
//! - Amplitude flux (absolute first difference)

pub mod amplitude_flux;

pub use amplitude_flux::onset_strength_envelope;
