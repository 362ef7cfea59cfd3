//! Amplitude-difference onset strength
//!
//! The onset envelope is the absolute first difference of the (decimated)
//! waveform: `onset[i] = |x[i + 1] - x[i]|`. Sharp transients produce large
//! values; steady or silent passages produce values near zero.
//!
//! # Example
//!
//! ```
//! use ghost_dsp::features::onset::amplitude_flux::onset_strength_envelope;
//!
//! let envelope = onset_strength_envelope(&[0.0, 0.5, 0.5, -0.5]);
//! assert_eq!(envelope, vec![0.5, 0.0, 1.0]);
//! ```

/// Absolute first difference of `samples`
///
/// Returns `samples.len() - 1` values (empty for fewer than two samples).
pub fn onset_strength_envelope(samples: &[f64]) -> Vec<f64> {
    samples.windows(2).map(|w| (w[1] - w[0]).abs()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_length() {
        assert!(onset_strength_envelope(&[]).is_empty());
        assert!(onset_strength_envelope(&[0.3]).is_empty());
        assert_eq!(onset_strength_envelope(&[0.0; 100]).len(), 99);
    }

    #[test]
    fn test_silence_has_flat_envelope() {
        assert!(onset_strength_envelope(&[0.0; 32]).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_step_produces_single_peak() {
        let mut samples = vec![0.0; 20];
        for s in samples.iter_mut().skip(10) {
            *s = 0.8;
        }
        let envelope = onset_strength_envelope(&samples);
        let peak = envelope
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i);
        assert_eq!(peak, Some(9));
        assert!((envelope[9] - 0.8).abs() < 1e-12);
    }
}
