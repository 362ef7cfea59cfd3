//! Integer-ratio decimation for the tempo path
//!
//! Onset periodicity lives well below 1 kHz, so the tempo estimator works on
//! a signal reduced to roughly 11 kHz. The default decimator keeps every
//! `ratio`-th sample with no filtering. The optional anti-alias mode averages
//! each block of `ratio` samples instead, which is a boxcar low-pass applied
//! right before the stride.

/// Decimation ratio `floor(sample_rate / target_rate)`, at least 1
pub fn decimation_ratio(sample_rate: u32, target_rate: u32) -> usize {
    (sample_rate / target_rate.max(1)).max(1) as usize
}

/// Keep samples `0, ratio, 2*ratio, ...`
pub fn decimate(samples: &[f64], ratio: usize) -> Vec<f64> {
    samples.iter().step_by(ratio.max(1)).copied().collect()
}

/// Average each block of `ratio` samples
///
/// The final block may be shorter than `ratio`; it is averaged over what it
/// holds so the output length matches [`decimate`].
pub fn decimate_filtered(samples: &[f64], ratio: usize) -> Vec<f64> {
    let ratio = ratio.max(1);
    if ratio == 1 {
        return samples.to_vec();
    }
    samples
        .chunks(ratio)
        .map(|block| block.iter().sum::<f64>() / block.len() as f64)
        .collect()
}
