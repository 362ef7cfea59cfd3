//! Spectral and energy features
//!
//! Per frame: RMS energy, spectral centroid and zero-crossing rate. Each is
//! averaged over all frames of the buffer. Mean RMS is rescaled into an
//! `energy` score with `min(1, mean_rms * energy_scale)`.
//!
//! When the buffer is shorter than one frame nothing is measured: energy is
//! reported as `fallback_energy` (0.5 by default) and the other two as 0.

pub mod frame_metrics;

pub use frame_metrics::{rms, zero_crossing_rate, CentroidAnalyzer};

use crate::config::FeatureConfig;
use crate::error::Result;
use crate::io::FrameLayout;
use serde::{Deserialize, Serialize};

/// Frame-averaged spectral and energy features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectralFeatures {
    /// Loudness score in [0, 1]
    pub energy: f64,

    /// Mean spectral centroid in Hz
    pub spectral_centroid_hz: f64,

    /// Mean fraction of sign changes between adjacent samples
    pub zero_crossing_rate: f64,
}

/// Frame-by-frame feature extractor
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    config: FeatureConfig,
    layout: FrameLayout,
}

impl FeatureExtractor {
    /// Build an extractor, validating the configuration
    pub fn new(config: FeatureConfig) -> Result<Self> {
        config.validate()?;
        let layout = FrameLayout::new(config.frame_size, config.hop_size)?;
        Ok(Self { config, layout })
    }

    /// The configuration in use
    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Number of frames `extract` will measure for a buffer of `len` samples
    pub fn frame_count(&self, len: usize) -> usize {
        self.layout.frame_count(len)
    }

    /// Measure and average features over every frame of `samples`
    pub fn extract(&self, samples: &[f64], sample_rate: u32) -> SpectralFeatures {
        let frame_count = self.layout.frame_count(samples.len());
        log::debug!(
            "Extracting spectral features: {} frames of {} (hop {})",
            frame_count,
            self.layout.frame_size(),
            self.layout.hop_size()
        );

        if frame_count == 0 {
            log::warn!(
                "Buffer of {} samples is shorter than one {}-sample frame, energy defaults to {}",
                samples.len(),
                self.layout.frame_size(),
                self.config.fallback_energy
            );
            return SpectralFeatures {
                energy: self.config.fallback_energy,
                spectral_centroid_hz: 0.0,
                zero_crossing_rate: 0.0,
            };
        }

        let mut analyzer = CentroidAnalyzer::new(self.layout.frame_size());
        let mut rms_sum = 0.0;
        let mut centroid_sum = 0.0;
        let mut zcr_sum = 0.0;

        for frame in self.layout.frames(samples) {
            rms_sum += rms(&frame);
            centroid_sum += analyzer.centroid(&frame, sample_rate);
            zcr_sum += zero_crossing_rate(&frame);
        }

        let n = frame_count as f64;
        let mean_rms = rms_sum / n;
        let features = SpectralFeatures {
            energy: (mean_rms * self.config.energy_scale).clamp(0.0, 1.0),
            spectral_centroid_hz: centroid_sum / n,
            zero_crossing_rate: zcr_sum / n,
        };

        log::debug!(
            "Features: mean_rms={:.4}, energy={:.3}, centroid={:.1} Hz, zcr={:.4}",
            mean_rms,
            features.energy,
            features.spectral_centroid_hz,
            features.zero_crossing_rate
        );

        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(frequency_hz: f64, amplitude: f64, sample_rate: u32, seconds: f64) -> Vec<f64> {
        let len = (f64::from(sample_rate) * seconds) as usize;
        (0..len)
            .map(|i| amplitude * (2.0 * PI * frequency_hz * i as f64 / f64::from(sample_rate)).sin())
            .collect()
    }

    #[test]
    fn test_silence_has_zero_energy() {
        let extractor = FeatureExtractor::new(FeatureConfig::default()).unwrap();
        let features = extractor.extract(&vec![0.0; 8192], 44_100);
        assert_eq!(features.energy, 0.0);
        assert_eq!(features.spectral_centroid_hz, 0.0);
        assert_eq!(features.zero_crossing_rate, 0.0);
    }

    #[test]
    fn test_tiny_buffer_uses_fallback_energy() {
        let extractor = FeatureExtractor::new(FeatureConfig::default()).unwrap();
        let features = extractor.extract(&sine(440.0, 0.5, 44_100, 100.0 / 44_100.0), 44_100);
        assert_eq!(features.energy, 0.5);
        assert_eq!(features.spectral_centroid_hz, 0.0);
    }

    #[test]
    fn test_energy_scaling_and_clamp() {
        let extractor = FeatureExtractor::new(FeatureConfig::default()).unwrap();

        // RMS of a 0.1 sine is ~0.0707 -> energy ~0.212
        let quiet = extractor.extract(&sine(440.0, 0.1, 44_100, 1.0), 44_100);
        assert!((quiet.energy - 0.1 * std::f64::consts::FRAC_1_SQRT_2 * 3.0).abs() < 0.01);

        // RMS of a full-scale sine is ~0.707 -> 2.12, clamped
        let loud = extractor.extract(&sine(440.0, 1.0, 44_100, 1.0), 44_100);
        assert_eq!(loud.energy, 1.0);
    }

    #[test]
    fn test_centroid_follows_tone() {
        let extractor = FeatureExtractor::new(FeatureConfig::default()).unwrap();
        let features = extractor.extract(&sine(3000.0, 0.5, 44_100, 1.0), 44_100);
        assert!(
            (features.spectral_centroid_hz - 3000.0).abs() < 150.0,
            "centroid {}",
            features.spectral_centroid_hz
        );
        // A 3 kHz sine crosses zero 6000 times a second
        assert!((features.zero_crossing_rate - 6000.0 / 44_100.0).abs() < 0.01);
    }

    #[test]
    fn test_frame_count() {
        let extractor = FeatureExtractor::new(FeatureConfig::default()).unwrap();
        assert_eq!(extractor.frame_count(100), 0);
        assert_eq!(extractor.frame_count(2048), 1);
        assert_eq!(extractor.frame_count(4096), 3);
    }
}
