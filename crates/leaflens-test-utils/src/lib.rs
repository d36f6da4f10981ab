//! Canned inference responses shared by the LeafLens test suites.

use serde_json::{json, Value};

/// Cloud endpoint, unordered score map under `predictions`.
pub fn score_map_response() -> Value {
    json!({
        "predictions": {
            "Healthy": 0.05,
            "black_sigatoka": 0.81,
            "moko": 0.14
        }
    })
}

/// Backend-ranked `topK` with an explicit `top1`.
pub fn ranked_top_k_response() -> Value {
    json!({
        "top1": {"label": "Panama Wilt Disease", "probability": 0.74},
        "topK": [
            {"label": "Panama Wilt Disease", "probability": 0.74},
            {"class": "Black and Yellow Sigatoka", "score": 0.18},
            {"name": "Healthy Banana leaf", "confidence": "0.08"}
        ]
    })
}

/// Ranked list under `predictions`.
pub fn prediction_list_response() -> Value {
    json!({
        "predictions": [
            {"label": "bbtv", "probability": 0.62},
            {"label": "bsv", "probability": 0.30},
            {"label": "Healthy", "probability": 0.08}
        ]
    })
}

/// Minimal single-label response.
pub fn single_label_response() -> Value {
    json!({"label": "anthracnose", "confidence": 0.77})
}

/// On-device model output in classifier head order.
pub fn class_probabilities_response() -> Value {
    json!([0.02, 0.01, 0.01, 0.03, 0.88, 0.01, 0.01, 0.02, 0.01])
}

/// Top-level array of prediction objects.
pub fn bare_list_response() -> Value {
    json!([
        {"label": "Banana Split Peel", "score": 0.55},
        {"label": "Banana Skipper Damage", "score": 0.45}
    ])
}

/// Responses with nothing usable in them.
pub fn malformed_responses() -> Vec<Value> {
    vec![
        Value::Null,
        json!({}),
        json!("Healthy"),
        json!(0.93),
        json!([]),
        json!({"predictions": null}),
        json!({"predictions": "Healthy"}),
        json!({"topK": []}),
        json!({"label": ""}),
    ]
}

/// One response per supported shape, with the shape name.
pub fn all_supported_shapes() -> Vec<(&'static str, Value)> {
    vec![
        ("ranked_list", ranked_top_k_response()),
        ("prediction_list", prediction_list_response()),
        ("score_map", score_map_response()),
        ("single_label", single_label_response()),
        ("bare_list", bare_list_response()),
        ("class_probabilities", class_probabilities_response()),
    ]
}
