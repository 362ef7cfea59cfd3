//! Tempo estimation
//!
//! 1. Decimate to roughly `target_rate_hz` (stride-picking, or block
//!    averaging when `anti_alias` is set)
//! 2. Onset envelope = absolute first difference
//! 3. Score every lag whose tempo lies in `[min_bpm, max_bpm]` by
//!    unnormalized autocorrelation
//! 4. Best lag → `BPM = 60 * envelope_rate / lag`
//! 5. `confidence = best_score / (envelope_len * confidence_calibration)`,
//!    clamped to `[0, 1]`
//!
//! When no lag scores above zero (silence, clips shorter than the longest
//! lag) the estimator reports `fallback_bpm` with zero confidence.
//!
//! # Example
//!
//! ```
//! use ghost_dsp::config::TempoConfig;
//! use ghost_dsp::features::period::TempoEstimator;
//!
//! let estimator = TempoEstimator::new(TempoConfig::default())?;
//! let estimate = estimator.estimate(&vec![0.0; 44_100], 44_100);
//! assert_eq!(estimate.bpm, 100.0);
//! assert_eq!(estimate.confidence, 0.0);
//! # Ok::<(), ghost_dsp::AnalysisError>(())
//! ```

use super::autocorrelation::{
    autocorrelation_fft, best_score, lag_range, lag_scores_direct, noise_floor,
};
use super::TempoEstimate;
use crate::config::TempoConfig;
use crate::error::Result;
use crate::features::onset::onset_strength_envelope;
use crate::preprocessing::{decimate, decimate_filtered, decimation_ratio};

/// Autocorrelation tempo estimator
#[derive(Debug, Clone)]
pub struct TempoEstimator {
    config: TempoConfig,
}

impl TempoEstimator {
    /// Build an estimator, validating the configuration
    pub fn new(config: TempoConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use
    pub fn config(&self) -> &TempoConfig {
        &self.config
    }

    /// Estimate the tempo of a mono signal
    ///
    /// `sample_rate` must be positive; [`crate::io::SampleBuffer`] guarantees it.
    pub fn estimate(&self, samples: &[f64], sample_rate: u32) -> TempoEstimate {
        let ratio = decimation_ratio(sample_rate, self.config.target_rate_hz);
        let decimated = if self.config.anti_alias {
            decimate_filtered(samples, ratio)
        } else {
            decimate(samples, ratio)
        };
        let envelope_rate = f64::from(sample_rate) / ratio as f64;
        let envelope = onset_strength_envelope(&decimated);

        log::debug!(
            "Estimating tempo: {} samples at {} Hz, ratio={}, envelope={} at {:.1} Hz",
            samples.len(),
            sample_rate,
            ratio,
            envelope.len(),
            envelope_rate
        );

        let Some((lag_min, lag_max)) = lag_range(
            envelope_rate,
            self.config.min_bpm,
            self.config.max_bpm,
            envelope.len(),
        ) else {
            log::warn!(
                "Envelope of {} samples too short for the BPM range, using fallback {:.1} BPM",
                envelope.len(),
                self.config.fallback_bpm
            );
            return self.fallback();
        };

        let (scores, floor) = if self.config.use_fft_autocorrelation {
            let acf = autocorrelation_fft(&envelope);
            let floor = noise_floor(acf[0]);
            (acf[lag_min..=lag_max].to_vec(), floor)
        } else {
            (lag_scores_direct(&envelope, lag_min, lag_max), 0.0)
        };

        let Some((index, score)) = best_score(&scores, floor) else {
            log::warn!(
                "No periodicity found, using fallback {:.1} BPM",
                self.config.fallback_bpm
            );
            return self.fallback();
        };

        let lag = lag_min + index;
        let bpm = (60.0 * envelope_rate / lag as f64).clamp(self.config.min_bpm, self.config.max_bpm);
        let confidence =
            (score / (envelope.len() as f64 * self.config.confidence_calibration)).clamp(0.0, 1.0);

        log::debug!(
            "Best lag {} (score {:.4}) -> {:.2} BPM, confidence {:.3}",
            lag,
            score,
            bpm,
            confidence
        );

        TempoEstimate { bpm, confidence }
    }

    fn fallback(&self) -> TempoEstimate {
        TempoEstimate {
            bpm: self.config.fallback_bpm,
            confidence: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    /// Decaying 1 kHz bursts, 20 ms long, one per beat
    ///
    /// Tests pick tempos whose beat period is a whole number of decimated
    /// samples, so every burst is sampled at the same phase.
    fn click_track(bpm: f64, sample_rate: u32, seconds: f64) -> Vec<f64> {
        let len = (f64::from(sample_rate) * seconds) as usize;
        let period = 60.0 * f64::from(sample_rate) / bpm;
        let burst = (0.02 * f64::from(sample_rate)) as usize;
        let mut samples = vec![0.0; len];
        let mut beat = 0.0;
        while (beat as usize) < len {
            let start = beat as usize;
            for j in 0..burst.min(len - start) {
                let t = j as f64 / f64::from(sample_rate);
                samples[start + j] = (2.0 * PI * 1000.0 * t).sin() * (-t / 0.005).exp();
            }
            beat += period;
        }
        samples
    }

    #[test]
    fn test_silence_falls_back() {
        let estimator = TempoEstimator::new(TempoConfig::default()).unwrap();
        let estimate = estimator.estimate(&vec![0.0; 44_100 * 2], 44_100);
        assert_eq!(estimate.bpm, 100.0);
        assert_eq!(estimate.confidence, 0.0);
    }

    #[test]
    fn test_silence_falls_back_on_direct_path() {
        let estimator = TempoEstimator::new(TempoConfig {
            use_fft_autocorrelation: false,
            ..TempoConfig::default()
        })
        .unwrap();

        // Long enough that every lag in the range is scored
        let estimate = estimator.estimate(&vec![0.0; 44_100 * 2], 44_100);
        assert_eq!(estimate.bpm, 100.0);
        assert_eq!(estimate.confidence, 0.0);

        let tiny: Vec<f64> = (0..100).map(|i| (i as f64 * 0.3).sin()).collect();
        let estimate = estimator.estimate(&tiny, 44_100);
        assert_eq!(estimate.bpm, 100.0);
        assert_eq!(estimate.confidence, 0.0);
    }

    #[test]
    fn test_tiny_buffer_falls_back() {
        let estimator = TempoEstimator::new(TempoConfig::default()).unwrap();
        let samples: Vec<f64> = (0..100).map(|i| (i as f64 * 0.3).sin()).collect();
        let estimate = estimator.estimate(&samples, 44_100);
        assert_eq!(estimate.bpm, 100.0);
        assert_eq!(estimate.confidence, 0.0);
    }

    #[test]
    fn test_click_track_105_bpm() {
        let estimator = TempoEstimator::new(TempoConfig::default()).unwrap();
        let samples = click_track(105.0, 44_100, 4.0);
        let estimate = estimator.estimate(&samples, 44_100);
        assert!(
            (estimate.bpm - 105.0).abs() < 1.0,
            "BPM should be close to 105, got {:.2}",
            estimate.bpm
        );
        assert!(estimate.confidence > 0.0 && estimate.confidence <= 1.0);
    }

    #[test]
    fn test_click_track_150_bpm_at_48k() {
        let estimator = TempoEstimator::new(TempoConfig::default()).unwrap();
        let samples = click_track(150.0, 48_000, 4.0);
        let estimate = estimator.estimate(&samples, 48_000);
        assert!(
            (estimate.bpm - 150.0).abs() < 1.0,
            "BPM should be close to 150, got {:.2}",
            estimate.bpm
        );
    }

    #[test]
    fn test_direct_and_fft_agree() {
        let samples = click_track(126.0, 22_050, 3.0);
        let fft = TempoEstimator::new(TempoConfig::default()).unwrap();
        let direct = TempoEstimator::new(TempoConfig {
            use_fft_autocorrelation: false,
            ..TempoConfig::default()
        })
        .unwrap();

        let a = fft.estimate(&samples, 22_050);
        let b = direct.estimate(&samples, 22_050);
        assert!((a.bpm - 126.0).abs() < 1.0, "fft path got {:.2}", a.bpm);
        assert!((a.bpm - b.bpm).abs() < 0.05, "fft {} vs direct {}", a.bpm, b.bpm);
        assert!((a.confidence - b.confidence).abs() < 1e-6);
    }

    #[test]
    fn test_anti_alias_keeps_range_and_tempo() {
        let estimator = TempoEstimator::new(TempoConfig {
            anti_alias: true,
            ..TempoConfig::default()
        })
        .unwrap();
        let samples = click_track(105.0, 44_100, 4.0);
        let estimate = estimator.estimate(&samples, 44_100);
        assert!((60.0..=200.0).contains(&estimate.bpm));
        assert!(
            (estimate.bpm - 105.0).abs() < 1.0,
            "BPM should be close to 105, got {:.2}",
            estimate.bpm
        );
    }

    #[test]
    fn test_deterministic() {
        let estimator = TempoEstimator::new(TempoConfig::default()).unwrap();
        let samples = click_track(97.0, 44_100, 3.0);
        assert_eq!(
            estimator.estimate(&samples, 44_100),
            estimator.estimate(&samples, 44_100)
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TempoConfig {
            min_bpm: 0.0,
            ..TempoConfig::default()
        };
        assert!(TempoEstimator::new(config).is_err());
    }
}
