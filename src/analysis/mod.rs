//! Analysis and result aggregation modules
//!
//! - Genre classification
//! - The orchestrating [`Analyzer`]
//! - Result types and metadata

pub mod genre;
pub mod metadata;
pub mod pipeline;
pub mod result;

pub use genre::{Genre, GenreClassifier, GenreLabel};
pub use metadata::{AnalysisFlag, AnalysisMetadata};
pub use pipeline::Analyzer;
pub use result::{AudioAnalysis, Mood, Note, Scale};
