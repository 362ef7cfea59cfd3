//! Autocorrelation scoring of onset envelopes
//!
//! The score of a lag `L` is the unnormalized autocorrelation
//! `ACF[L] = Σ onset[i] · onset[i - L]` over the whole envelope. Two ways to
//! compute it are provided:
//!
//! - [`lag_scores_direct`]: the literal sum, `O(n · lags)`
//! - [`autocorrelation_fft`]: `ACF = IFFT(|FFT(signal)|²)` on a zero-padded
//!   signal, `O(n log n)` for every lag at once
//!
//! Both yield the same values up to floating-point rounding. Because of that
//! rounding, lags whose true score is zero may come back as tiny residues from
//! the FFT path; [`noise_floor`] gives the threshold below which a score
//! counts as zero.
//!
//! # Reference
//!
//! Ellis, D. P. W., & Pikrakis, A. (2006). Real-time Beat Induction.
//! *Proceedings of the International Conference on Music Information Retrieval*.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Relative floor applied to FFT scores, as a fraction of the zero-lag energy
const RELATIVE_FLOOR: f64 = 1e-9;

/// Inclusive lag range (in envelope samples) whose tempo lies in `[min_bpm, max_bpm]`
///
/// Lags are rounded inward (`ceil` for the short end, `floor` for the long
/// end) so every lag in the range converts back to a BPM inside the bounds.
/// Lags that reach past the envelope are cut off, since their score is an
/// empty sum. Returns `None` when no lag remains.
pub fn lag_range(
    envelope_rate: f64,
    min_bpm: f64,
    max_bpm: f64,
    envelope_len: usize,
) -> Option<(usize, usize)> {
    if envelope_len < 2 || envelope_rate.is_nan() || envelope_rate <= 0.0 {
        return None;
    }
    let lag_min = ((60.0 * envelope_rate) / max_bpm).ceil().max(1.0) as usize;
    let lag_max = (((60.0 * envelope_rate) / min_bpm).floor() as usize).min(envelope_len - 1);

    if lag_min > lag_max {
        None
    } else {
        Some((lag_min, lag_max))
    }
}

/// Direct autocorrelation for each lag in `lag_min..=lag_max`
///
/// Element `j` of the result is the score of lag `lag_min + j`.
pub fn lag_scores_direct(envelope: &[f64], lag_min: usize, lag_max: usize) -> Vec<f64> {
    (lag_min..=lag_max)
        .map(|lag| {
            if lag >= envelope.len() {
                return 0.0;
            }
            envelope[lag..]
                .iter()
                .zip(envelope.iter())
                .map(|(a, b)| a * b)
                .sum()
        })
        .collect()
}

/// Compute the full autocorrelation using FFT acceleration
///
/// Uses the identity: ACF = IFFT(|FFT(signal)|²), zero-padded to at least
/// twice the signal length so the circular correlation does not wrap.
///
/// # Returns
///
/// Autocorrelation for lags `0..signal.len()`, clamped at zero
pub fn autocorrelation_fft(signal: &[f64]) -> Vec<f64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let fft_size = (2 * n).next_power_of_two();

    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    buffer.resize(fft_size, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut buffer);

    for x in &mut buffer {
        *x = *x * x.conj();
    }

    let ifft = planner.plan_fft_inverse(fft_size);
    ifft.process(&mut buffer);

    // rustfft leaves the inverse unnormalized
    let scale = 1.0 / fft_size as f64;
    buffer[..n].iter().map(|x| (x.re * scale).max(0.0)).collect()
}

/// Score threshold below which an FFT-derived lag score counts as zero
pub fn noise_floor(zero_lag_energy: f64) -> f64 {
    zero_lag_energy * RELATIVE_FLOOR
}

/// Index and value of the first maximum strictly above `floor`
///
/// Ties resolve to the earliest index (the shortest lag), which keeps the
/// selection deterministic.
pub fn best_score(scores: &[f64], floor: f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if score > floor && best.is_none_or(|(_, b)| score > b) {
            best = Some((i, score));
        }
    }
    best
}
