//! Field extraction and coercion for loosely-typed prediction objects.
//!
//! Backends disagree on field names (`label` / `class` / `name`,
//! `probability` / `score` / `confidence`) and sometimes send scores as
//! strings. Everything here is total: bad input degrades to `Unknown` / `0`.

use serde_json::{Map, Value};

use leaflens_common::{CandidatePrediction, UNKNOWN_LABEL};

/// Label fields, in lookup order.
pub const LABEL_KEYS: [&str; 3] = ["label", "class", "name"];
/// Score fields, in lookup order.
pub const SCORE_KEYS: [&str; 3] = ["probability", "score", "confidence"];

/// First of `keys` present with a non-null value.
fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k).filter(|v| !v.is_null()))
}

/// Label of a prediction object; `Unknown` when no label field is set.
pub fn label_of(obj: &Map<String, Value>) -> String {
    first_present(obj, &LABEL_KEYS)
        .map(render_label)
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

/// Score of a prediction object; `0` when no score field is set or it is not numeric.
pub fn score_of(obj: &Map<String, Value>) -> f64 {
    first_present(obj, &SCORE_KEYS).map(coerce_score).unwrap_or(0.0)
}

/// Candidate from one element of a prediction array. Non-objects become `Unknown` / `0`.
pub fn candidate_from(value: &Value) -> CandidatePrediction {
    match value.as_object() {
        Some(obj) => CandidatePrediction::new(label_of(obj), score_of(obj)),
        None => CandidatePrediction::unknown(),
    }
}

/// Numeric value of a score field.
///
/// Numbers pass through, strings are parsed after trimming, anything else
/// (and any NaN/infinite result) is `0`.
pub fn coerce_score(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Strings verbatim; other JSON values as their JSON text.
pub fn render_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether a field counts as "set" for the single-label and explicit top-1 checks:
/// `null`, `false`, `0` and `""` do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
