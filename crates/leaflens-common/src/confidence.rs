/// Confidence presentation helpers.
/// Probabilities are carried unclamped through the core; clamping happens
/// only here, for display.

use serde::{Deserialize, Serialize};

/// Above this a confidence bar is shown as high.
pub const HIGH_CONFIDENCE: f64 = 0.7;
/// Above this (and at most `HIGH_CONFIDENCE`) it is medium.
pub const MEDIUM_CONFIDENCE: f64 = 0.4;

/// Display band for a confidence value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_probability(probability: f64) -> Self {
        let p = display_fraction(probability);
        if p > HIGH_CONFIDENCE {
            ConfidenceTier::High
        } else if p > MEDIUM_CONFIDENCE {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }
}

/// Clamp a probability into [0.0, 1.0] for a progress bar.
/// NaN maps to 0.0.
pub fn display_fraction(probability: f64) -> f64 {
    if probability.is_nan() {
        return 0.0;
    }
    probability.clamp(0.0, 1.0)
}

/// Render a probability as a percentage with one decimal, e.g. `0.873` → `87.3%`.
/// Not clamped: an un-normalised backend score shows as-is.
pub fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}
