//! Classification of inference responses by shape.

use serde_json::{Map, Value};

use crate::extract::is_truthy;

/// The recognised layouts of an inference response, in priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseShape<'a> {
    /// `{"topK": [{label, probability}, ...]}`, backend-ranked
    RankedList(&'a [Value]),
    /// `{"predictions": [{label, probability}, ...]}`, backend-ranked
    PredictionList(&'a [Value]),
    /// `{"predictions": {"Label": 0.9, ...}}`, unordered
    ScoreMap(&'a Map<String, Value>),
    /// `{"label": "...", "probability": ...}`
    SingleLabel(&'a Map<String, Value>),
    /// `[{label, score}, ...]` at the top level, backend-ranked
    BareList(&'a [Value]),
    /// `[0.01, 0.93, ...]`: on-device class probability vector
    ClassProbabilities(&'a [Value]),
    /// Anything else
    Unrecognised,
}

impl<'a> ResponseShape<'a> {
    pub fn classify(response: &'a Value) -> Self {
        match response {
            Value::Object(obj) => Self::classify_object(obj),
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_number) => {
                ResponseShape::ClassProbabilities(items)
            }
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
                ResponseShape::BareList(items)
            }
            _ => ResponseShape::Unrecognised,
        }
    }

    fn classify_object(obj: &'a Map<String, Value>) -> Self {
        // An array under topK wins even when empty.
        if let Some(Value::Array(items)) = obj.get("topK") {
            return ResponseShape::RankedList(items);
        }
        match obj.get("predictions") {
            Some(Value::Array(items)) => return ResponseShape::PredictionList(items),
            Some(Value::Object(map)) => return ResponseShape::ScoreMap(map),
            _ => {}
        }
        if obj.get("label").is_some_and(is_truthy) {
            return ResponseShape::SingleLabel(obj);
        }
        ResponseShape::Unrecognised
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResponseShape::RankedList(_) => "ranked_list",
            ResponseShape::PredictionList(_) => "prediction_list",
            ResponseShape::ScoreMap(_) => "score_map",
            ResponseShape::SingleLabel(_) => "single_label",
            ResponseShape::BareList(_) => "bare_list",
            ResponseShape::ClassProbabilities(_) => "class_probabilities",
            ResponseShape::Unrecognised => "unrecognised",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn name_of(v: Value) -> &'static str {
        ResponseShape::classify(&v).name()
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(
            name_of(json!({"topK": [], "predictions": [{"label": "a"}], "label": "b"})),
            "ranked_list"
        );
        assert_eq!(name_of(json!({"predictions": [{"label": "a"}], "label": "b"})), "prediction_list");
        assert_eq!(name_of(json!({"predictions": {"a": 0.4}, "label": "b"})), "score_map");
        assert_eq!(name_of(json!({"label": "b"})), "single_label");
    }

    #[test]
    fn test_non_array_top_k_is_ignored() {
        assert_eq!(name_of(json!({"topK": "Healthy", "predictions": {"a": 1}})), "score_map");
    }

    #[test]
    fn test_falsy_label_is_unrecognised() {
        assert_eq!(name_of(json!({"label": ""})), "unrecognised");
        assert_eq!(name_of(json!({"label": 0})), "unrecognised");
        assert_eq!(name_of(json!({"predictions": null})), "unrecognised");
    }

    #[test]
    fn test_top_level_arrays() {
        assert_eq!(name_of(json!([0.1, 0.9])), "class_probabilities");
        assert_eq!(name_of(json!([{"label": "a", "score": 0.2}])), "bare_list");
        assert_eq!(name_of(json!([0.1, "x"])), "unrecognised");
        assert_eq!(name_of(json!([])), "unrecognised");
    }

    #[test]
    fn test_scalars_are_unrecognised() {
        assert_eq!(name_of(json!("Healthy")), "unrecognised");
        assert_eq!(name_of(json!(42)), "unrecognised");
        assert_eq!(name_of(Value::Null), "unrecognised");
    }
}
