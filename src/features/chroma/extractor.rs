//! Pitch-class energy by direct tone correlation
//!
//! For every anchor frequency and every Hann-windowed frame, the frame is
//! correlated against a complex sinusoid at the anchor (a single-bin DFT
//! evaluated at an arbitrary frequency, no FFT). The correlation magnitudes
//! are summed into the anchor's pitch class across all frames.
//!
//! Anchor `k` of octave `o` sits at `base * 2^(k/12) * 2^o`. Anchors at or
//! above Nyquist are skipped. With the default base of 55 Hz (A1) and six
//! octaves the ladder spans 55 Hz to about 3.3 kHz and passes through 440 Hz
//! exactly (`55 · 2^3`).
//!
//! Cost is `O(frames × 12 × octaves × frame_size)`.

use super::PitchClassProfile;
use crate::analysis::result::Note;
use crate::io::FrameLayout;
use crate::preprocessing::hann_window;
use rustfft::num_complex::Complex;
use std::f64::consts::PI;

/// One reference tone of the ladder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Frequency in Hz
    pub frequency_hz: f64,
    /// Pitch class the frequency belongs to
    pub pitch_class: Note,
}

/// Pitch class of `frequency_hz`, rounded to the nearest equal-tempered semitone (A4 = 440 Hz)
pub fn pitch_class_of(frequency_hz: f64) -> Note {
    let semitones_from_a4 = (12.0 * (frequency_hz / 440.0).log2()).round() as i64;
    Note::from_index((Note::A.index() as i64 + semitones_from_a4).rem_euclid(12) as usize)
}

/// Every anchor below Nyquist, grouped by octave then semitone
pub fn anchor_ladder(base_frequency_hz: f64, octaves: u32, sample_rate: u32) -> Vec<Anchor> {
    let nyquist = f64::from(sample_rate) / 2.0;
    let mut anchors = Vec::with_capacity(12 * octaves as usize);
    for octave in 0..octaves {
        for k in 0..12 {
            let frequency_hz = base_frequency_hz * 2f64.powf(k as f64 / 12.0) * 2f64.powi(octave as i32);
            if frequency_hz >= nyquist {
                continue;
            }
            anchors.push(Anchor {
                frequency_hz,
                pitch_class: pitch_class_of(frequency_hz),
            });
        }
    }
    anchors
}

/// Accumulate pitch-class energy over every frame of `samples`
///
/// Buffers shorter than one frame produce an all-zero profile.
pub fn extract_pitch_class_profile(
    samples: &[f64],
    sample_rate: u32,
    layout: FrameLayout,
    base_frequency_hz: f64,
    octaves: u32,
) -> PitchClassProfile {
    let frame_count = layout.frame_count(samples.len());
    let anchors = anchor_ladder(base_frequency_hz, octaves, sample_rate);

    log::debug!(
        "Extracting pitch-class profile: {} frames of {}, {} anchors from {:.1} Hz",
        frame_count,
        layout.frame_size(),
        anchors.len(),
        base_frequency_hz
    );

    let mut profile = PitchClassProfile::default();
    if frame_count == 0 {
        return profile;
    }

    let window = hann_window(layout.frame_size());
    let rate = f64::from(sample_rate);

    for anchor in &anchors {
        // Windowed reference tone, shared by every frame
        let omega = 2.0 * PI * anchor.frequency_hz / rate;
        let kernel: Vec<Complex<f64>> = window
            .iter()
            .enumerate()
            .map(|(n, &w)| Complex::from_polar(w, -omega * n as f64))
            .collect();

        let mut energy = 0.0;
        for frame in layout.frames(samples) {
            let correlation: Complex<f64> = frame
                .iter()
                .zip(kernel.iter())
                .map(|(&x, &k)| k * x)
                .sum();
            energy += correlation.norm();
        }
        profile.add(anchor.pitch_class, energy);
    }

    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(frequency_hz: f64, sample_rate: u32, seconds: f64) -> Vec<f64> {
        let len = (f64::from(sample_rate) * seconds) as usize;
        (0..len)
            .map(|i| (2.0 * PI * frequency_hz * i as f64 / f64::from(sample_rate)).sin() * 0.5)
            .collect()
    }

    #[test]
    fn test_pitch_class_of_reference_tones() {
        assert_eq!(pitch_class_of(440.0), Note::A);
        assert_eq!(pitch_class_of(55.0), Note::A);
        assert_eq!(pitch_class_of(261.63), Note::C);
        assert_eq!(pitch_class_of(92.5), Note::Fs);
        assert_eq!(pitch_class_of(30.87), Note::B);
    }

    #[test]
    fn test_ladder_labels_and_nyquist_cut() {
        let ladder = anchor_ladder(55.0, 6, 44_100);
        assert_eq!(ladder.len(), 72);
        assert_eq!(ladder[0].pitch_class, Note::A);
        assert_eq!(ladder[9].pitch_class, Note::Fs);
        assert!(ladder.iter().any(|a| (a.frequency_hz - 440.0).abs() < 1e-9));

        // At 8 kHz the Nyquist limit is 4 kHz: the sixth octave is partly cut.
        let low_rate = anchor_ladder(55.0, 7, 8_000);
        assert!(low_rate.iter().all(|a| a.frequency_hz < 4_000.0));
        assert!(low_rate.len() < 84);
    }

    #[test]
    fn test_single_octave_ladder() {
        let ladder = anchor_ladder(55.0, 1, 44_100);
        assert_eq!(ladder.len(), 12);
        let classes: Vec<Note> = ladder.iter().map(|a| a.pitch_class).collect();
        assert_eq!(classes[0], Note::A);
        assert_eq!(classes[3], Note::C);
        assert_eq!(classes[11], Note::Gs);
    }

    #[test]
    fn test_440_hz_lands_in_a() {
        let samples = sine(440.0, 44_100, 1.0);
        let layout = FrameLayout::new(4096, 2048).unwrap();
        let profile = extract_pitch_class_profile(&samples, 44_100, layout, 55.0, 6);
        assert_eq!(profile.dominant(), Some(Note::A));
    }

    #[test]
    fn test_middle_c_lands_in_c() {
        let samples = sine(261.63, 44_100, 1.0);
        let layout = FrameLayout::new(4096, 2048).unwrap();
        let profile = extract_pitch_class_profile(&samples, 44_100, layout, 55.0, 6);
        assert_eq!(profile.dominant(), Some(Note::C));
    }

    #[test]
    fn test_short_buffer_gives_empty_profile() {
        let samples = sine(440.0, 44_100, 0.05);
        let layout = FrameLayout::new(4096, 2048).unwrap();
        let profile = extract_pitch_class_profile(&samples, 44_100, layout, 55.0, 6);
        assert_eq!(profile.total(), 0.0);
        assert_eq!(profile.dominant(), None);
    }
}
