//! Traits for the collaborators that sit around the diagnosis core.
//!
//! The core itself never does I/O. Transport to the inference backend and
//! persistence of history live behind these seams so the ranker and the
//! binary can be wired to real services or to in-memory doubles.

use async_trait::async_trait;

use crate::error::Result;

/// Source of raw inference responses (cloud endpoint, on-device model, file).
///
/// Implementations return the response exactly as received; shape handling
/// belongs to the result normalizer.
#[async_trait]
pub trait InferenceSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch one raw response for the given image reference.
    async fn infer(&self, image_ref: &str) -> Result<serde_json::Value>;
}

/// Recipient of finished diagnoses (the history store).
pub trait DiagnosisRecorder {
    /// Record the top-1 of a diagnosis.
    fn record(&mut self, label: &str, probability: f64, image_ref: Option<&str>);
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Source that always returns the same canned response.
pub struct StaticInferenceSource {
    response: serde_json::Value,
}

impl StaticInferenceSource {
    pub fn new(response: serde_json::Value) -> Self {
        Self { response }
    }
}

#[async_trait]
impl InferenceSource for StaticInferenceSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn infer(&self, _image_ref: &str) -> Result<serde_json::Value> {
        Ok(self.response.clone())
    }
}
