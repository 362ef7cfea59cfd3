//! Configuration parameters for audio analysis
//!
//! Every heuristic constant of the pipeline lives here and is handed to the
//! component that uses it at construction time. Sections deserialize with
//! `#[serde(default)]`, so a partial JSON document overrides only what it names.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Analysis configuration parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Tempo estimator parameters
    pub tempo: TempoConfig,

    /// Key detector parameters
    pub key: KeyConfig,

    /// Spectral/energy feature extractor parameters
    pub features: FeatureConfig,

    /// Genre decision table
    pub genre: GenreRules,
}

impl AnalysisConfig {
    /// Check every section, failing on the first degenerate value
    pub fn validate(&self) -> Result<()> {
        self.tempo.validate()?;
        self.key.validate()?;
        self.features.validate()?;
        self.genre.validate()
    }
}

/// Tempo estimation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TempoConfig {
    /// Target rate for decimation; ratio is `floor(sample_rate / target_rate)` (default: 11025)
    pub target_rate_hz: u32,

    /// Minimum BPM to consider (default: 60.0)
    pub min_bpm: f64,

    /// Maximum BPM to consider (default: 200.0)
    pub max_bpm: f64,

    /// BPM reported when no lag scores above zero (default: 100.0)
    pub fallback_bpm: f64,

    /// Confidence is `best_score / (envelope_len * calibration)` (default: 0.1)
    pub confidence_calibration: f64,

    /// Score lags with FFT autocorrelation instead of the direct sum (default: true)
    pub use_fft_autocorrelation: bool,

    /// Average each decimation window instead of stride-picking (default: false)
    pub anti_alias: bool,
}

impl Default for TempoConfig {
    fn default() -> Self {
        Self {
            target_rate_hz: 11_025,
            min_bpm: 60.0,
            max_bpm: 200.0,
            fallback_bpm: 100.0,
            confidence_calibration: 0.1,
            use_fft_autocorrelation: true,
            anti_alias: false,
        }
    }
}

impl TempoConfig {
    /// Reject degenerate tempo parameters
    pub fn validate(&self) -> Result<()> {
        if self.target_rate_hz == 0 {
            return Err(AnalysisError::invalid("target_rate_hz", "must be > 0"));
        }
        if !is_positive_finite(self.min_bpm) || !self.max_bpm.is_finite() || self.min_bpm >= self.max_bpm {
            return Err(AnalysisError::invalid(
                "min_bpm/max_bpm",
                format!("invalid BPM range [{:.1}, {:.1}]", self.min_bpm, self.max_bpm),
            ));
        }
        if !(self.min_bpm..=self.max_bpm).contains(&self.fallback_bpm) {
            return Err(AnalysisError::invalid(
                "fallback_bpm",
                format!(
                    "{:.1} lies outside [{:.1}, {:.1}]",
                    self.fallback_bpm, self.min_bpm, self.max_bpm
                ),
            ));
        }
        if !is_positive_finite(self.confidence_calibration) {
            return Err(AnalysisError::invalid("confidence_calibration", "must be > 0"));
        }
        Ok(())
    }
}

/// Key detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Analysis frame size in samples (default: 4096)
    pub frame_size: usize,

    /// Hop between frames in samples (default: 2048)
    pub hop_size: usize,

    /// Lowest anchor frequency; anchor k sits at `base * 2^(k/12)` (default: 55.0 Hz, A1)
    pub base_frequency_hz: f64,

    /// Octave doublings summed into each pitch class (default: 6)
    pub octaves: u32,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            frame_size: 4096,
            hop_size: 2048,
            base_frequency_hz: 55.0,
            octaves: 6,
        }
    }
}

impl KeyConfig {
    /// Reject degenerate key-detection parameters
    pub fn validate(&self) -> Result<()> {
        if self.frame_size == 0 {
            return Err(AnalysisError::invalid("frame_size", "must be > 0"));
        }
        if self.hop_size == 0 {
            return Err(AnalysisError::invalid("hop_size", "must be > 0"));
        }
        if !is_positive_finite(self.base_frequency_hz) {
            return Err(AnalysisError::invalid("base_frequency_hz", "must be a positive frequency"));
        }
        if self.octaves == 0 {
            return Err(AnalysisError::invalid("octaves", "must be >= 1"));
        }
        Ok(())
    }
}

/// Spectral/energy feature parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Analysis frame size in samples (default: 2048)
    pub frame_size: usize,

    /// Hop between frames in samples (default: 1024)
    pub hop_size: usize,

    /// Mean RMS is multiplied by this before clamping to 1 (default: 3.0)
    pub energy_scale: f64,

    /// Energy reported when the buffer holds no full frame (default: 0.5)
    pub fallback_energy: f64,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            frame_size: 2048,
            hop_size: 1024,
            energy_scale: 3.0,
            fallback_energy: 0.5,
        }
    }
}

impl FeatureConfig {
    /// Reject degenerate feature parameters
    pub fn validate(&self) -> Result<()> {
        if self.frame_size == 0 {
            return Err(AnalysisError::invalid("frame_size", "must be > 0"));
        }
        if self.hop_size == 0 {
            return Err(AnalysisError::invalid("hop_size", "must be > 0"));
        }
        if !is_positive_finite(self.energy_scale) {
            return Err(AnalysisError::invalid("energy_scale", "must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.fallback_energy) {
            return Err(AnalysisError::invalid("fallback_energy", "must lie in [0, 1]"));
        }
        Ok(())
    }
}

/// Thresholds of the genre decision table
///
/// Rows are checked in order: EDM, R&B, rock, hip-hop, then the pop fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenreRules {
    /// EDM requires a tempo strictly above this (default: 150.0)
    pub edm_min_bpm: f64,

    /// EDM requires energy strictly above this (default: 0.7)
    pub edm_min_energy: f64,

    /// R&B requires a tempo strictly below this (default: 90.0)
    pub rnb_max_bpm: f64,

    /// R&B requires a spectral centroid strictly below this (default: 1500.0 Hz)
    pub rnb_max_centroid_hz: f64,

    /// Rock requires energy strictly above this (default: 0.8)
    pub rock_min_energy: f64,

    /// Rock requires a spectral centroid strictly above this (default: 2500.0 Hz)
    pub rock_min_centroid_hz: f64,

    /// Lower bound of the inclusive hip-hop tempo band (default: 85.0)
    pub hiphop_min_bpm: f64,

    /// Upper bound of the inclusive hip-hop tempo band (default: 110.0)
    pub hiphop_max_bpm: f64,

    /// Hip-hop requires a spectral centroid strictly below this (default: 2000.0 Hz)
    pub hiphop_max_centroid_hz: f64,

    /// Confidence attached to every label (default: 0.6)
    pub confidence: f64,
}

impl Default for GenreRules {
    fn default() -> Self {
        Self {
            edm_min_bpm: 150.0,
            edm_min_energy: 0.7,
            rnb_max_bpm: 90.0,
            rnb_max_centroid_hz: 1500.0,
            rock_min_energy: 0.8,
            rock_min_centroid_hz: 2500.0,
            hiphop_min_bpm: 85.0,
            hiphop_max_bpm: 110.0,
            hiphop_max_centroid_hz: 2000.0,
            confidence: 0.6,
        }
    }
}

impl GenreRules {
    /// Reject a confidence outside `[0, 1]` or an inverted hip-hop band
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(AnalysisError::invalid("confidence", "must lie in [0, 1]"));
        }
        if self.hiphop_min_bpm > self.hiphop_max_bpm {
            return Err(AnalysisError::invalid(
                "hiphop_min_bpm/hiphop_max_bpm",
                "minimum exceeds maximum",
            ));
        }
        Ok(())
    }
}

fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_sizes_rejected() {
        let mut config = AnalysisConfig::default();
        config.features.frame_size = 0;
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidParameter { name: "frame_size", .. })
        ));

        let mut config = AnalysisConfig::default();
        config.key.hop_size = 0;
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidParameter { name: "hop_size", .. })
        ));
    }

    #[test]
    fn test_inverted_bpm_range_rejected() {
        let tempo = TempoConfig {
            min_bpm: 200.0,
            max_bpm: 60.0,
            ..TempoConfig::default()
        };
        assert!(tempo.validate().is_err());
    }

    #[test]
    fn test_fallback_bpm_must_be_in_range() {
        let tempo = TempoConfig {
            fallback_bpm: 40.0,
            ..TempoConfig::default()
        };
        assert!(tempo.validate().is_err());
    }

    #[test]
    fn test_nan_and_infinite_values_rejected() {
        let tempo = TempoConfig {
            min_bpm: f64::NAN,
            ..TempoConfig::default()
        };
        assert!(tempo.validate().is_err());

        let tempo = TempoConfig {
            confidence_calibration: f64::NAN,
            ..TempoConfig::default()
        };
        assert!(matches!(
            tempo.validate(),
            Err(AnalysisError::InvalidParameter { name: "confidence_calibration", .. })
        ));

        let key = KeyConfig {
            base_frequency_hz: f64::INFINITY,
            ..KeyConfig::default()
        };
        assert!(key.validate().is_err());

        let features = FeatureConfig {
            energy_scale: -1.0,
            ..FeatureConfig::default()
        };
        assert!(features.validate().is_err());
    }

    #[test]
    fn test_partial_json_override() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{ "tempo": { "max_bpm": 180.0 } }"#).unwrap();
        assert_eq!(config.tempo.max_bpm, 180.0);
        assert_eq!(config.tempo.min_bpm, 60.0);
        assert_eq!(config.key, KeyConfig::default());
    }
}
