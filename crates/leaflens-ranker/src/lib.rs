//! leaflens-ranker — Turns raw inference output into a ranked, enriched diagnosis.

pub mod diagnosis;
pub mod extract;
pub mod normaliser;
pub mod shape;

pub use diagnosis::{DiagnosisOptions, DiagnosisPipeline, EnrichedCandidate, EnrichedDiagnosis, RiskLevel};
pub use normaliser::{normalize, ResultNormalizer};
pub use shape::ResponseShape;
