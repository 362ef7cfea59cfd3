//! Chroma normalization

use super::SEMITONES;

/// Scale a chroma vector so its bins sum to 1
///
/// An all-zero vector is returned unchanged.
pub fn l1_normalize(chroma: &[f64; SEMITONES]) -> [f64; SEMITONES] {
    let total: f64 = chroma.iter().sum();
    if total <= 0.0 {
        return *chroma;
    }
    chroma.map(|v| v / total)
}
