/// Core prediction types exchanged between the normalizer, the resolver,
/// and the display/history collaborators.

use serde::{Deserialize, Serialize};

/// Label used whenever the backend gives us nothing usable.
pub const UNKNOWN_LABEL: &str = "Unknown";

// ---------------------------------------------------------------------------
// Candidate
// ---------------------------------------------------------------------------

/// One (label, probability) pair produced by inference, before knowledge-base
/// resolution. The probability is whatever the backend sent; it is never
/// clamped or renormalised here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePrediction {
    pub label: String,
    pub probability: f64,
}

impl CandidatePrediction {
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self { label: label.into(), probability }
    }

    /// The `Unknown` / `0` candidate used when a response carries no predictions.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_LABEL, 0.0)
    }

    pub fn is_unknown(&self) -> bool {
        self.label == UNKNOWN_LABEL
    }
}

// ---------------------------------------------------------------------------
// Diagnosis
// ---------------------------------------------------------------------------

/// Normalised result of one inference call.
///
/// `top_k` is never empty; `top1` is either the backend's explicit pick or
/// the first element of `top_k`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub top1: CandidatePrediction,
    #[serde(rename = "topK")]
    pub top_k: Vec<CandidatePrediction>,
}

impl DiagnosisResult {
    /// Build a result from an ordered candidate list.
    /// An empty list collapses to the single `Unknown` candidate.
    pub fn from_ranked(top_k: Vec<CandidatePrediction>, top1: Option<CandidatePrediction>) -> Self {
        let top_k = if top_k.is_empty() { vec![CandidatePrediction::unknown()] } else { top_k };
        let top1 = top1.unwrap_or_else(|| top_k[0].clone());
        Self { top1, top_k }
    }

    /// The `{top1: Unknown, topK: [Unknown]}` fallback.
    pub fn unknown() -> Self {
        Self::from_ranked(Vec::new(), None)
    }
}
