//! Analysis windows

use std::f64::consts::PI;

/// Symmetric Hann window of `size` points
///
/// `w[n] = 0.5 * (1 - cos(2πn / (size - 1)))`. A single-point window is `[1.0]`.
pub fn hann_window(size: usize) -> Vec<f64> {
    if size <= 1 {
        return vec![1.0; size];
    }
    let denom = (size - 1) as f64;
    (0..size)
        .map(|n| 0.5 * (1.0 - (2.0 * PI * n as f64 / denom).cos()))
        .collect()
}
