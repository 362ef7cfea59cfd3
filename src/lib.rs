//! # Ghost DSP
//!
//! The audio feature-extraction core of an AI music platform: tempo (BPM)
//! estimation, musical key detection, spectral/energy features and a
//! heuristic genre label, assembled into one serializable record that the
//! prompt-building layer consumes.
//!
//! ## Features
//!
//! - **BPM Detection**: Onset-strength envelope scored by autocorrelation over a BPM search range
//! - **Key Detection**: Pitch-class energy histogram from windowed single-bin tone correlation
//! - **Spectral Features**: Frame-averaged RMS energy, spectral centroid and zero-crossing rate
//! - **Genre & Mood**: Decision-table genre label, mood, danceability and acousticness
//!
//! ## Quick Start
//!
//! ```
//! use ghost_dsp::{analyze_audio, AnalysisConfig};
//!
//! // Decoded mono samples in [-1.0, 1.0]
//! let sample_rate = 44_100;
//! let samples: Vec<f64> = (0..sample_rate * 2)
//!     .map(|i| 0.5 * (2.0 * std::f64::consts::PI * 440.0 * i as f64 / sample_rate as f64).sin())
//!     .collect();
//!
//! let analysis = analyze_audio(&samples, sample_rate, AnalysisConfig::default())?;
//!
//! println!("BPM: {:.1} (confidence: {:.2})", analysis.tempo.bpm, analysis.tempo.confidence);
//! println!("Key: {} ({:.2})", analysis.key.name(), analysis.key.confidence);
//! println!("Genre: {}, mood: {}", analysis.genre.label, analysis.mood);
//! # Ok::<(), ghost_dsp::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! SampleBuffer ─┬─ TempoEstimator ───┐
//!               ├─ KeyDetector ──────┼─ GenreClassifier ─ AudioAnalysis
//!               └─ FeatureExtractor ─┘
//! ```
//!
//! Every stage is synchronous and side-effect free. Independent buffers can be
//! analyzed in parallel with [`analyze_batch`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

// Re-export main types
pub use analysis::genre::{Genre, GenreLabel};
pub use analysis::metadata::{AnalysisFlag, AnalysisMetadata};
pub use analysis::pipeline::Analyzer;
pub use analysis::result::{AudioAnalysis, Mood, Note, Scale};
pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use features::key::KeyEstimate;
pub use features::period::TempoEstimate;
pub use features::spectral::SpectralFeatures;
pub use io::SampleBuffer;

use rayon::prelude::*;

/// Main analysis function
///
/// Analyzes a decoded mono channel and returns tempo, key, spectral
/// features, genre, mood and the derived proxies.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 44100 or 48000)
/// * `config` - Analysis configuration parameters
///
/// # Errors
///
/// - `EmptyBuffer` if `samples` is empty
/// - `InvalidParameter` if `sample_rate` is zero or `config` holds a
///   degenerate value
///
/// Silence and clips shorter than one frame are not errors; they produce the
/// documented fallback values and are flagged in the metadata.
///
/// # Example
///
/// ```
/// use ghost_dsp::{analyze_audio, AnalysisConfig, Genre};
///
/// let samples = vec![0.0; 44_100]; // 1 second of silence
/// let analysis = analyze_audio(&samples, 44_100, AnalysisConfig::default())?;
/// assert_eq!(analysis.tempo.bpm, 100.0);
/// assert_eq!(analysis.genre.label, Genre::Pop);
/// # Ok::<(), ghost_dsp::AnalysisError>(())
/// ```
pub fn analyze_audio(
    samples: &[f64],
    sample_rate: u32,
    config: AnalysisConfig,
) -> Result<AudioAnalysis> {
    let analyzer = Analyzer::new(config)?;
    let buffer = SampleBuffer::new(sample_rate, samples.to_vec())?;
    Ok(analyzer.analyze(&buffer))
}

/// Analyze several independent buffers in parallel
///
/// Results come back in the order of `buffers`. Each analysis is identical to
/// what [`Analyzer::analyze`] returns for that buffer alone.
///
/// # Errors
///
/// `InvalidParameter` if `config` holds a degenerate value.
pub fn analyze_batch(buffers: &[SampleBuffer], config: &AnalysisConfig) -> Result<Vec<AudioAnalysis>> {
    let analyzer = Analyzer::new(config.clone())?;
    log::debug!("Analyzing batch of {} buffers", buffers.len());
    Ok(buffers
        .par_iter()
        .map(|buffer| analyzer.analyze(buffer))
        .collect())
}
