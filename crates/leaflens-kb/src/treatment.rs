//! Keyword grouping of treatment advice into organic and chemical options.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::record::DiseaseRecord;

fn organic_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)organic").unwrap())
}

fn chemical_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)spray|chemical|fungicide|icide").unwrap())
}

/// Treatments split by keyword. A line can land in both groups or in neither;
/// `all` keeps every line in curated order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreatmentGroups<'a> {
    pub organic: Vec<&'a str>,
    pub chemical: Vec<&'a str>,
    pub all: Vec<&'a str>,
}

impl<'a> TreatmentGroups<'a> {
    pub fn from_record(record: &'a DiseaseRecord) -> Self {
        let all: Vec<&str> = record.treatments.iter().map(String::as_str).collect();
        let organic = all.iter().copied().filter(|t| organic_pattern().is_match(t)).collect();
        let chemical = all.iter().copied().filter(|t| chemical_pattern().is_match(t)).collect();
        Self { organic, chemical, all }
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
