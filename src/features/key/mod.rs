//! Key detection modules
//!
//! Detect the key root as the dominant pitch class of the buffer's
//! pitch-class profile.

pub mod detector;

pub use detector::KeyDetector;

use crate::analysis::result::{Note, Scale};
use serde::{Deserialize, Serialize};

/// Key detection result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEstimate {
    /// Key root
    pub pitch_class: Note,

    /// Mode (always major for now)
    pub scale: Scale,

    /// Share of the profile's energy held by the root (0.0-1.0)
    pub confidence: f64,
}

impl KeyEstimate {
    /// Key name in musical notation, e.g. "C" or "F#m"
    pub fn name(&self) -> String {
        match self.scale {
            Scale::Major => self.pitch_class.name().to_string(),
            Scale::Minor => format!("{}m", self.pitch_class.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_name() {
        let key = KeyEstimate {
            pitch_class: Note::Fs,
            scale: Scale::Major,
            confidence: 0.4,
        };
        assert_eq!(key.name(), "F#");

        let minor = KeyEstimate {
            scale: Scale::Minor,
            ..key
        };
        assert_eq!(minor.name(), "F#m");
    }
}
