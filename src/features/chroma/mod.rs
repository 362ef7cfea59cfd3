//! Chroma extraction modules
//!
//! Pitch-class distribution (12 semitones) of a whole buffer:
//! - Direct tone-correlation extractor
//! - Normalization

pub mod extractor;
pub mod normalization;

pub use extractor::{extract_pitch_class_profile, pitch_class_of, Anchor};

use crate::analysis::result::Note;
use serde::{Deserialize, Serialize};

/// Number of pitch classes
pub const SEMITONES: usize = 12;

/// Accumulated energy per pitch class, indexed by [`Note::index`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchClassProfile {
    bins: [f64; SEMITONES],
}

impl PitchClassProfile {
    /// Wrap raw bins (C first)
    pub fn from_bins(bins: [f64; SEMITONES]) -> Self {
        Self { bins }
    }

    /// Raw bins, C first
    pub fn bins(&self) -> &[f64; SEMITONES] {
        &self.bins
    }

    /// Energy of one pitch class
    pub fn get(&self, note: Note) -> f64 {
        self.bins[note.index()]
    }

    pub(crate) fn add(&mut self, note: Note, energy: f64) {
        self.bins[note.index()] += energy;
    }

    /// Sum of all bins
    pub fn total(&self) -> f64 {
        self.bins.iter().sum()
    }

    /// Bins scaled to sum to 1
    pub fn normalized(&self) -> [f64; SEMITONES] {
        normalization::l1_normalize(&self.bins)
    }

    /// Pitch class with the most energy; the lowest index wins ties
    ///
    /// `None` when every bin is zero.
    pub fn dominant(&self) -> Option<Note> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &energy) in self.bins.iter().enumerate() {
            if energy > 0.0 && best.is_none_or(|(_, b)| energy > b) {
                best = Some((i, energy));
            }
        }
        best.map(|(i, _)| Note::from_index(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_picks_largest_bin() {
        let mut bins = [0.1; SEMITONES];
        bins[Note::E.index()] = 2.0;
        assert_eq!(PitchClassProfile::from_bins(bins).dominant(), Some(Note::E));
    }

    #[test]
    fn test_dominant_ties_prefer_lower_index() {
        let mut bins = [0.0; SEMITONES];
        bins[Note::D.index()] = 1.0;
        bins[Note::G.index()] = 1.0;
        assert_eq!(PitchClassProfile::from_bins(bins).dominant(), Some(Note::D));
    }

    #[test]
    fn test_empty_profile_has_no_dominant() {
        assert_eq!(PitchClassProfile::default().dominant(), None);
    }
}
