//! Configuration loading for LeafLens.
//! Reads leaflens.toml from the current directory or path in LEAFLENS_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::Path;

use leaflens_kb::builtin::MODEL_CLASS_NAMES;
use leaflens_ranker::DiagnosisOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub diagnosis: DiagnosisConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub knowledge_base: KnowledgeBaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisConfig {
    #[serde(default = "default_top_n")]
    pub top_n_alternatives: usize,
    #[serde(default = "default_high_risk_threshold")]
    pub high_risk_threshold: f64,
    /// Labels for on-device class-probability vectors, in model head order.
    #[serde(default = "default_class_names")]
    pub class_names: Vec<String>,
}

impl Default for DiagnosisConfig {
    fn default() -> Self {
        Self {
            top_n_alternatives: default_top_n(),
            high_risk_threshold: default_high_risk_threshold(),
            class_names: default_class_names(),
        }
    }
}

fn default_top_n()               -> usize { 3 }
fn default_high_risk_threshold() -> f64   { 0.7 }
fn default_class_names() -> Vec<String> {
    MODEL_CLASS_NAMES.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: default_history_capacity() }
    }
}

fn default_history_capacity() -> usize { leaflens_history::DEFAULT_CAPACITY }

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBaseConfig {
    /// Custom knowledge base (JSON or TOML); the built-in table when unset.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}

fn default_log_filter() -> String { "leaflens=info,warn".to_string() }

mod tests;

impl Config {
    /// Load configuration from leaflens.toml.
    /// Checks LEAFLENS_CONFIG env var first, then current directory.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("LEAFLENS_CONFIG")
            .unwrap_or_else(|_| "leaflens.toml".to_string());

        if !Path::new(&path).exists() {
            anyhow::bail!(
                "Config file not found: {}\n\
                 Copy leaflens.example.toml to leaflens.toml and edit it.",
                path
            );
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load from YAML file
    pub fn from_yaml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn diagnosis_options(&self) -> DiagnosisOptions {
        DiagnosisOptions {
            top_n_alternatives: self.diagnosis.top_n_alternatives,
            high_risk_threshold: self.diagnosis.high_risk_threshold,
            ..Default::default()
        }
    }
}
