//! leaflens-common — Shared types, errors, and collaborator traits used across all LeafLens crates.

pub mod error;
pub mod entities;
pub mod confidence;
pub mod collaborators;

// Re-export commonly used types
pub use entities::{CandidatePrediction, DiagnosisResult, UNKNOWN_LABEL};
pub use error::{LeafLensError, Result};
pub use collaborators::{DiagnosisRecorder, InferenceSource, StaticInferenceSource};
