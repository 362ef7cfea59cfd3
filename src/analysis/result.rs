//! Analysis result types

use super::genre::GenreLabel;
use super::metadata::AnalysisMetadata;
use crate::features::key::KeyEstimate;
use crate::features::period::TempoEstimate;
use crate::features::spectral::SpectralFeatures;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Energy above which a track reads as energetic
pub const ENERGETIC_MIN_ENERGY: f64 = 0.65;

/// Energy below which a track reads as intimate
pub const INTIMATE_MAX_ENERGY: f64 = 0.35;

/// Twelve equal-tempered pitch classes, C-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Note {
    /// C
    C,
    /// C sharp / D flat
    #[serde(rename = "C#")]
    Cs,
    /// D
    D,
    /// D sharp / E flat
    #[serde(rename = "D#")]
    Ds,
    /// E
    E,
    /// F
    F,
    /// F sharp / G flat
    #[serde(rename = "F#")]
    Fs,
    /// G
    G,
    /// G sharp / A flat
    #[serde(rename = "G#")]
    Gs,
    /// A
    A,
    /// A sharp / B flat
    #[serde(rename = "A#")]
    As,
    /// B
    B,
}

impl Note {
    /// All pitch classes in index order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Pitch class for an index, wrapping modulo 12 (0 = C, 9 = A)
    pub const fn from_index(index: usize) -> Note {
        Note::ALL[index % 12]
    }

    /// Index of this pitch class (0 = C, 11 = B)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name in sharp notation, e.g. "C#"
    pub const fn name(self) -> &'static str {
        match self {
            Note::C => "C",
            Note::Cs => "C#",
            Note::D => "D",
            Note::Ds => "D#",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F#",
            Note::G => "G",
            Note::Gs => "G#",
            Note::A => "A",
            Note::As => "A#",
            Note::B => "B",
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mode of a key
///
/// The key detector only reports `Major`; `Minor` is reserved for a future
/// profile-matching detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    /// Major (Ionian)
    Major,
    /// Natural minor (Aeolian)
    Minor,
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Major => f.write_str("major"),
            Scale::Minor => f.write_str("minor"),
        }
    }
}

/// Three-way mood label derived from energy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// energy > 0.65
    Energetic,
    /// 0.35 <= energy <= 0.65
    Balanced,
    /// energy < 0.35
    Intimate,
}

impl Mood {
    /// Classify an energy value in `[0, 1]`
    pub fn from_energy(energy: f64) -> Mood {
        if energy > ENERGETIC_MIN_ENERGY {
            Mood::Energetic
        } else if energy < INTIMATE_MAX_ENERGY {
            Mood::Intimate
        } else {
            Mood::Balanced
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Energetic => f.write_str("energetic"),
            Mood::Balanced => f.write_str("balanced"),
            Mood::Intimate => f.write_str("intimate"),
        }
    }
}

/// Complete analysis of one buffer
///
/// Built once by [`crate::Analyzer`]; all fields are plain values. Serializes
/// with camelCase field names for the prompt-building layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioAnalysis {
    /// Tempo estimate
    pub tempo: TempoEstimate,

    /// Detected key
    pub key: KeyEstimate,

    /// Frame-averaged spectral and energy features
    pub features: SpectralFeatures,

    /// Heuristic genre
    pub genre: GenreLabel,

    /// Mood derived from energy
    pub mood: Mood,

    /// `clamp((bpm - 60) / 120, 0, 1)`
    pub danceability: f64,

    /// `clamp(1 - energy, 0, 1)`
    pub acousticness: f64,

    /// Buffer facts and content flags
    pub metadata: AnalysisMetadata,
}

/// Danceability proxy from tempo
pub fn danceability(bpm: f64) -> f64 {
    ((bpm - 60.0) / 120.0).clamp(0.0, 1.0)
}

/// Acousticness proxy from energy
pub fn acousticness(energy: f64) -> f64 {
    (1.0 - energy).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_index_roundtrip() {
        for (i, note) in Note::ALL.iter().enumerate() {
            assert_eq!(note.index(), i);
            assert_eq!(Note::from_index(i), *note);
        }
        assert_eq!(Note::from_index(21), Note::A);
    }

    #[test]
    fn test_note_names() {
        assert_eq!(Note::C.to_string(), "C");
        assert_eq!(Note::Fs.to_string(), "F#");
        assert_eq!(Note::As.name(), "A#");
    }

    #[test]
    fn test_mood_thresholds() {
        assert_eq!(Mood::from_energy(0.9), Mood::Energetic);
        assert_eq!(Mood::from_energy(0.65), Mood::Balanced);
        assert_eq!(Mood::from_energy(0.5), Mood::Balanced);
        assert_eq!(Mood::from_energy(0.35), Mood::Balanced);
        assert_eq!(Mood::from_energy(0.1), Mood::Intimate);
    }

    #[test]
    fn test_proxies_clamped() {
        assert_eq!(danceability(60.0), 0.0);
        assert_eq!(danceability(120.0), 0.5);
        assert_eq!(danceability(200.0), 1.0);
        assert_eq!(danceability(30.0), 0.0);
        assert_eq!(acousticness(0.0), 1.0);
        assert_eq!(acousticness(0.25), 0.75);
        assert_eq!(acousticness(1.5), 0.0);
    }

    #[test]
    fn test_serialized_labels() {
        assert_eq!(serde_json::to_string(&Note::Cs).unwrap(), "\"C#\"");
        assert_eq!(serde_json::to_string(&Scale::Major).unwrap(), "\"major\"");
        assert_eq!(serde_json::to_string(&Mood::Intimate).unwrap(), "\"intimate\"");
    }
}
