//! Analysis orchestrator
//!
//! Runs the tempo estimator, key detector and feature extractor over one
//! buffer, feeds their output to the genre classifier and assembles the
//! [`AudioAnalysis`] record.

use super::genre::GenreClassifier;
use super::metadata::{AnalysisFlag, AnalysisMetadata};
use super::result::{acousticness, danceability, AudioAnalysis, Mood};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::features::key::KeyDetector;
use crate::features::period::TempoEstimator;
use crate::features::spectral::FeatureExtractor;
use crate::io::SampleBuffer;
use std::time::Instant;

/// Configured analysis pipeline
///
/// Construction validates the whole configuration; afterwards
/// [`Analyzer::analyze`] cannot fail. An `Analyzer` holds no mutable state
/// and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Analyzer {
    tempo: TempoEstimator,
    key: KeyDetector,
    features: FeatureExtractor,
    genre: GenreClassifier,
}

impl Analyzer {
    /// Build every component from `config`
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for the first degenerate configuration value.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let AnalysisConfig {
            tempo,
            key,
            features,
            genre,
        } = config;
        Ok(Self {
            tempo: TempoEstimator::new(tempo)?,
            key: KeyDetector::new(key)?,
            features: FeatureExtractor::new(features)?,
            genre: GenreClassifier::new(genre)?,
        })
    }

    /// Analyze one buffer
    pub fn analyze(&self, buffer: &SampleBuffer) -> AudioAnalysis {
        let start_time = Instant::now();
        let samples = buffer.samples();
        let sample_rate = buffer.sample_rate();

        log::debug!(
            "Starting audio analysis: {} samples at {} Hz ({:.2} s)",
            samples.len(),
            sample_rate,
            buffer.duration_seconds()
        );

        let tempo = self.tempo.estimate(samples, sample_rate);
        let key = self.key.detect(samples, sample_rate);
        let features = self.features.extract(samples, sample_rate);
        let genre = self
            .genre
            .classify(tempo.bpm, features.energy, features.spectral_centroid_hz);

        let mut metadata = AnalysisMetadata::new(buffer.duration_seconds(), sample_rate);
        if samples.iter().all(|&s| s == 0.0) {
            metadata.flags.push(AnalysisFlag::Silent);
        }
        if self.features.frame_count(samples.len()) == 0 {
            metadata.flags.push(AnalysisFlag::ShorterThanFrame);
        }
        // The estimator reports zero confidence only on its fallback path
        if tempo.confidence == 0.0 {
            metadata.flags.push(AnalysisFlag::DefaultTempo);
        }

        let analysis = AudioAnalysis {
            tempo,
            key,
            features,
            genre,
            mood: Mood::from_energy(features.energy),
            danceability: danceability(tempo.bpm),
            acousticness: acousticness(features.energy),
            metadata,
        };

        log::debug!(
            "Analysis complete in {:.2} ms: {:.1} BPM, key {}, {} / {}",
            start_time.elapsed().as_secs_f64() * 1000.0,
            analysis.tempo.bpm,
            analysis.key.name(),
            analysis.genre.label,
            analysis.mood
        );

        analysis
    }
}
