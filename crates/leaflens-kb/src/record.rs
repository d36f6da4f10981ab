use serde::{Deserialize, Serialize};

/// A curated disease/condition entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    /// Canonical name; the unique key of the knowledge base, e.g. "Black Sigatoka"
    pub key: String,
    /// Display name, e.g. "Black and Yellow Sigatoka"
    pub name: String,
    /// Symptoms in display order
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Treatments in display order
    #[serde(default, alias = "treatment")]
    pub treatments: Vec<String>,
}

impl DiseaseRecord {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        symptoms: &[&str],
        treatments: &[&str],
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            treatments: treatments.iter().map(|s| s.to_string()).collect(),
        }
    }
}
