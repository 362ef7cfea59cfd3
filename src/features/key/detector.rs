//! Key detection from the pitch-class profile
//!
//! The dominant pitch class of the whole-buffer profile is reported as the
//! key root. There is no major/minor discrimination: the scale is always
//! [`Scale::Major`]. A profile-matching detector (e.g. Krumhansl-Kessler
//! templates) can replace [`KeyDetector::detect`] later without touching the
//! profile extraction.

use super::KeyEstimate;
use crate::analysis::result::{Note, Scale};
use crate::config::KeyConfig;
use crate::error::Result;
use crate::features::chroma::{extract_pitch_class_profile, PitchClassProfile};
use crate::io::FrameLayout;

/// Root reported when the profile holds no energy
pub const FALLBACK_ROOT: Note = Note::C;

/// Dominant-pitch-class key detector
#[derive(Debug, Clone)]
pub struct KeyDetector {
    config: KeyConfig,
    layout: FrameLayout,
}

impl KeyDetector {
    /// Build a detector, validating the configuration
    pub fn new(config: KeyConfig) -> Result<Self> {
        config.validate()?;
        let layout = FrameLayout::new(config.frame_size, config.hop_size)?;
        Ok(Self { config, layout })
    }

    /// The configuration in use
    pub fn config(&self) -> &KeyConfig {
        &self.config
    }

    /// Accumulated pitch-class energy of `samples`
    pub fn pitch_class_profile(&self, samples: &[f64], sample_rate: u32) -> PitchClassProfile {
        extract_pitch_class_profile(
            samples,
            sample_rate,
            self.layout,
            self.config.base_frequency_hz,
            self.config.octaves,
        )
    }

    /// Detect the key of `samples`
    ///
    /// Confidence is the dominant bin's share of the total energy. Silent
    /// buffers and buffers shorter than one frame report C major with zero
    /// confidence.
    pub fn detect(&self, samples: &[f64], sample_rate: u32) -> KeyEstimate {
        let profile = self.pitch_class_profile(samples, sample_rate);
        match profile.dominant() {
            Some(root) => {
                let confidence = (profile.get(root) / profile.total()).clamp(0.0, 1.0);
                log::debug!("Dominant pitch class {} ({:.3} of total energy)", root, confidence);
                KeyEstimate {
                    pitch_class: root,
                    scale: Scale::Major,
                    confidence,
                }
            }
            None => {
                log::warn!("No tonal energy found, reporting {} major", FALLBACK_ROOT);
                KeyEstimate {
                    pitch_class: FALLBACK_ROOT,
                    scale: Scale::Major,
                    confidence: 0.0,
                }
            }
        }
    }
}
