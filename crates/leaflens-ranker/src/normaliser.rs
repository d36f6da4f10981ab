//! Result normaliser: any inference response → `DiagnosisResult`.

use std::cmp::Ordering;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use leaflens_common::{CandidatePrediction, DiagnosisResult};
use leaflens_kb::builtin::MODEL_CLASS_NAMES;

use crate::extract::{candidate_from, coerce_score, is_truthy, label_of, score_of};
use crate::shape::ResponseShape;

/// Normalise with the default (banana model) class names.
pub fn normalize(response: &Value) -> DiagnosisResult {
    ResultNormalizer::default().normalize(response)
}

/// Stable descending sort by probability. Ties keep their input order.
pub fn sort_descending(candidates: &mut [CandidatePrediction]) {
    candidates.sort_by(|a, b| b.probability.partial_cmp(&a.probability).unwrap_or(Ordering::Equal));
}

/// Converts responses of any supported shape into a ranked candidate list.
#[derive(Debug, Clone)]
pub struct ResultNormalizer {
    /// Labels for class-probability vectors, in model head order.
    class_names: Vec<String>,
}

impl Default for ResultNormalizer {
    fn default() -> Self {
        Self::new(MODEL_CLASS_NAMES.iter().map(|s| s.to_string()).collect())
    }
}

impl ResultNormalizer {
    pub fn new(class_names: Vec<String>) -> Self {
        Self { class_names }
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    /// Normalise a response. Never fails: unusable input yields the
    /// single `Unknown` / `0` candidate.
    pub fn normalize(&self, response: &Value) -> DiagnosisResult {
        let shape = ResponseShape::classify(response);
        debug!("Inference response classified as {}", shape.name());

        let mut top_k = match shape {
            // Backend-ranked lists keep their order.
            ResponseShape::RankedList(items)
            | ResponseShape::PredictionList(items)
            | ResponseShape::BareList(items) => items.iter().map(candidate_from).collect(),
            ResponseShape::ScoreMap(map) => rank_score_map(map),
            ResponseShape::ClassProbabilities(items) => {
                let probs: Vec<f64> = items.iter().map(coerce_score).collect();
                self.rank_class_probabilities(&probs)
            }
            ResponseShape::SingleLabel(_) | ResponseShape::Unrecognised => Vec::new(),
        };

        if top_k.is_empty() {
            if let Some(single) = single_label(response) {
                top_k.push(single);
            }
        }
        if top_k.is_empty() {
            warn!("Inference response had no usable predictions; falling back to Unknown");
        }

        DiagnosisResult::from_ranked(top_k, explicit_top1(response))
    }

    /// Label a class-probability vector by index and sort it descending.
    /// Indices past the known class names are labelled `Class {i}`.
    pub fn rank_class_probabilities(&self, probabilities: &[f64]) -> Vec<CandidatePrediction> {
        if probabilities.len() != self.class_names.len() {
            warn!(
                "Model returned {} probabilities for {} known classes",
                probabilities.len(),
                self.class_names.len()
            );
        }
        let mut ranked: Vec<CandidatePrediction> = probabilities
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let label = self
                    .class_names
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("Class {i}"));
                CandidatePrediction::new(label, if p.is_finite() { p } else { 0.0 })
            })
            .collect();
        sort_descending(&mut ranked);
        ranked
    }
}

/// `{"Label": score, ...}` → candidates sorted by descending score.
fn rank_score_map(map: &Map<String, Value>) -> Vec<CandidatePrediction> {
    let mut ranked: Vec<CandidatePrediction> = map
        .iter()
        .map(|(label, score)| CandidatePrediction::new(label.clone(), coerce_score(score)))
        .collect();
    sort_descending(&mut ranked);
    ranked
}

/// The one-element list for a top-level `label` response.
fn single_label(response: &Value) -> Option<CandidatePrediction> {
    let obj = response.as_object()?;
    if !obj.get("label").is_some_and(is_truthy) {
        return None;
    }
    Some(CandidatePrediction::new(label_of(obj), score_of(obj)))
}

/// The backend's own `top1` pick, when it sent one as an object.
///
/// A set but non-object `top1` (e.g. `"Healthy"`) is ignored and the first
/// ranked candidate is used. The mobile client turned it into `Unknown` / `0`
/// instead, hiding a usable ranking.
fn explicit_top1(response: &Value) -> Option<CandidatePrediction> {
    let top1 = response.get("top1")?;
    match top1.as_object() {
        Some(obj) => Some(CandidatePrediction::new(label_of(obj), score_of(obj))),
        None => {
            if !top1.is_null() {
                debug!("Ignoring non-object top1 field: {}", top1);
            }
            None
        }
    }
}
