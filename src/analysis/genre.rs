//! Heuristic genre classification
//!
//! A fixed decision table over (tempo, energy, spectral centroid). The first
//! matching row wins:
//!
//! | Row     | Condition                                         |
//! |---------|---------------------------------------------------|
//! | edm     | `bpm > 150 && energy > 0.7`                       |
//! | r&b     | `bpm < 90 && centroid < 1500 Hz`                  |
//! | rock    | `energy > 0.8 && centroid > 2500 Hz`              |
//! | hip-hop | `85 <= bpm <= 110 && centroid < 2000 Hz`          |
//! | pop     | otherwise                                         |
//!
//! Content with no measurable signal (zero energy or zero centroid) is
//! labelled pop before the table runs. Thresholds come from [`GenreRules`].

use crate::config::GenreRules;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of genre labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Genre {
    /// Fallback label
    #[default]
    #[serde(rename = "pop")]
    Pop,
    /// Electronic dance music
    #[serde(rename = "edm")]
    Edm,
    /// Rhythm and blues
    #[serde(rename = "r&b")]
    RnB,
    /// Rock
    #[serde(rename = "rock")]
    Rock,
    /// Hip-hop
    #[serde(rename = "hip-hop")]
    HipHop,
}

impl Genre {
    /// Lowercase display name, e.g. "hip-hop"
    pub const fn name(self) -> &'static str {
        match self {
            Genre::Pop => "pop",
            Genre::Edm => "edm",
            Genre::RnB => "r&b",
            Genre::Rock => "rock",
            Genre::HipHop => "hip-hop",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Genre with its confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenreLabel {
    /// Chosen genre
    pub label: Genre,

    /// Confidence in [0, 1]; every row reports the same configured value
    pub confidence: f64,
}

/// Decision-table genre classifier
#[derive(Debug, Clone)]
pub struct GenreClassifier {
    rules: GenreRules,
}

impl GenreClassifier {
    /// Build a classifier, validating the rules
    pub fn new(rules: GenreRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }

    /// The rules in use
    pub fn rules(&self) -> &GenreRules {
        &self.rules
    }

    /// Classify from tempo (BPM), energy in [0, 1] and spectral centroid (Hz)
    pub fn classify(&self, bpm: f64, energy: f64, spectral_centroid_hz: f64) -> GenreLabel {
        let label = self.label_for(bpm, energy, spectral_centroid_hz);
        log::debug!(
            "Genre: bpm={:.1}, energy={:.3}, centroid={:.1} Hz -> {}",
            bpm,
            energy,
            spectral_centroid_hz,
            label
        );
        GenreLabel {
            label,
            confidence: self.rules.confidence,
        }
    }

    fn label_for(&self, bpm: f64, energy: f64, centroid: f64) -> Genre {
        let r = &self.rules;

        if energy <= 0.0 || centroid <= 0.0 {
            return Genre::default();
        }

        if bpm > r.edm_min_bpm && energy > r.edm_min_energy {
            Genre::Edm
        } else if bpm < r.rnb_max_bpm && centroid < r.rnb_max_centroid_hz {
            Genre::RnB
        } else if energy > r.rock_min_energy && centroid > r.rock_min_centroid_hz {
            Genre::Rock
        } else if (r.hiphop_min_bpm..=r.hiphop_max_bpm).contains(&bpm)
            && centroid < r.hiphop_max_centroid_hz
        {
            Genre::HipHop
        } else {
            Genre::Pop
        }
    }
}
