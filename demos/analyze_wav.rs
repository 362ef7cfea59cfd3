//! Example: Analyze one or more WAV files
//!
//! Usage:
//!   cargo run --release --example analyze_wav -- [--json] <file1.wav> [file2.wav ...]
//!
//! Multi-channel files are down-mixed to mono by averaging channels. With
//! more than one file the analyses run in parallel.

use ghost_dsp::{analyze_batch, AnalysisConfig, SampleBuffer};
use std::env;

fn load_wav(path: &str) -> Result<SampleBuffer, Box<dyn std::error::Error>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let interleaved: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = f64::from(1u32 << (spec.bits_per_sample - 1));
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| f64::from(s) / max_value))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let channels = usize::from(spec.channels.max(1));
    let mono: Vec<f64> = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f64>() / frame.len() as f64)
        .collect();

    Ok(SampleBuffer::new(spec.sample_rate, mono)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut json = false;
    let mut paths = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ => paths.push(arg),
        }
    }

    if paths.is_empty() {
        eprintln!("Usage: analyze_wav [--json] <file1.wav> [file2.wav ...]");
        std::process::exit(2);
    }

    let buffers = paths
        .iter()
        .map(|p| load_wav(p))
        .collect::<Result<Vec<_>, _>>()?;

    let analyses = analyze_batch(&buffers, &AnalysisConfig::default())?;

    for (path, analysis) in paths.iter().zip(&analyses) {
        if json {
            println!("{}", serde_json::to_string_pretty(analysis)?);
            continue;
        }
        println!("{}", path);
        println!(
            "  BPM: {:.2} (confidence: {:.2})",
            analysis.tempo.bpm, analysis.tempo.confidence
        );
        println!(
            "  Key: {} (confidence: {:.2})",
            analysis.key.name(),
            analysis.key.confidence
        );
        println!(
            "  Energy: {:.2}, centroid: {:.0} Hz, ZCR: {:.3}",
            analysis.features.energy,
            analysis.features.spectral_centroid_hz,
            analysis.features.zero_crossing_rate
        );
        println!(
            "  Genre: {} ({:.2}), mood: {}",
            analysis.genre.label, analysis.genre.confidence, analysis.mood
        );
        println!(
            "  Danceability: {:.2}, acousticness: {:.2}",
            analysis.danceability, analysis.acousticness
        );
        if !analysis.metadata.flags.is_empty() {
            println!("  Flags: {:?}", analysis.metadata.flags);
        }
    }

    Ok(())
}
