//! Bounded, newest-first history of finished diagnoses.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use leaflens_common::{DiagnosisRecorder, Result};

/// How many diagnoses are kept unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 5;

/// One recorded diagnosis.
///
/// New entries get a UUID v4 id and an RFC 3339 timestamp. Entries written
/// by the mobile client (millisecond id string, millisecond `at`) still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub label: String,
    pub probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "imageUri")]
    pub image_ref: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTimestamp {
    Rfc3339(DateTime<Utc>),
    EpochMillis(i64),
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match StoredTimestamp::deserialize(deserializer)? {
        StoredTimestamp::Rfc3339(at) => Ok(at),
        StoredTimestamp::EpochMillis(ms) => DateTime::<Utc>::from_timestamp_millis(ms)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {ms}"))),
    }
}

impl HistoryEntry {
    pub fn new(label: impl Into<String>, probability: f64, image_ref: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            probability,
            image_ref,
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiagnosisHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for DiagnosisHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl DiagnosisHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Insert a new entry at the front, dropping the oldest past capacity.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_back() {
                debug!("History full, evicting {} ({})", evicted.label, evicted.id);
            }
        }
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Restore from a stored blob. Malformed JSON gives an empty history;
    /// extra entries past `capacity` are dropped from the old end.
    pub fn from_json(json: &str, capacity: usize) -> Self {
        let mut history = Self::with_capacity(capacity);
        match serde_json::from_str::<Vec<HistoryEntry>>(json) {
            Ok(mut entries) => {
                entries.truncate(capacity);
                history.entries.extend(entries);
            }
            Err(e) => warn!("Discarding unreadable history: {}", e),
        }
        history
    }
}

impl DiagnosisRecorder for DiagnosisHistory {
    fn record(&mut self, label: &str, probability: f64, image_ref: Option<&str>) {
        self.push(HistoryEntry::new(label, probability, image_ref.map(str::to_string)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(h: &DiagnosisHistory) -> Vec<&str> {
        h.entries().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_newest_first_and_capped() {
        let mut h = DiagnosisHistory::default();
        for i in 0..7 {
            h.record(&format!("d{i}"), 0.5, None);
        }
        assert_eq!(h.len(), DEFAULT_CAPACITY);
        assert_eq!(labels(&h), vec!["d6", "d5", "d4", "d3", "d2"]);
        assert_eq!(h.latest().map(|e| e.label.as_str()), Some("d6"));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut h = DiagnosisHistory::default();
        h.record("a", 0.1, None);
        h.record("a", 0.1, None);
        let ids: Vec<&str> = h.entries().map(|e| e.id.as_str()).collect();
        assert_ne!(ids[0], ids[1]);
        assert!(Uuid::parse_str(ids[0]).is_ok());
    }

    #[test]
    fn test_json_restore() {
        let mut h = DiagnosisHistory::with_capacity(3);
        h.record("Healthy", 0.9, Some("file:///leaf.jpg"));
        h.record("moko", 0.4, None);
        let json = h.to_json().unwrap();

        let restored = DiagnosisHistory::from_json(&json, 3);
        assert_eq!(restored.entries().collect::<Vec<_>>(), h.entries().collect::<Vec<_>>());
        assert_eq!(restored.entries().nth(1).and_then(|e| e.image_ref.as_deref()), Some("file:///leaf.jpg"));
    }

    #[test]
    fn test_restore_truncates_to_capacity() {
        let mut h = DiagnosisHistory::with_capacity(5);
        for i in 0..5 {
            h.record(&format!("d{i}"), 0.5, None);
        }
        let restored = DiagnosisHistory::from_json(&h.to_json().unwrap(), 2);
        assert_eq!(labels(&restored), vec!["d4", "d3"]);
    }

    #[test]
    fn test_restores_mobile_client_records() {
        let stored = r#"[
            {"id":"1700000000000","label":"Healthy","probability":0.9,"imageUri":"file:///a.jpg","at":1700000000000},
            {"id":"1699999000000","label":"moko","probability":0.4,"at":1699999000000}
        ]"#;
        let h = DiagnosisHistory::from_json(stored, 5);
        assert_eq!(labels(&h), vec!["Healthy", "moko"]);

        let latest = h.latest().unwrap();
        assert_eq!(latest.id, "1700000000000");
        assert_eq!(latest.image_ref.as_deref(), Some("file:///a.jpg"));
        assert_eq!(latest.at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_mixed_formats_survive_a_new_record() {
        let stored = r#"[{"id":"1700000000000","label":"bsv","probability":0.6,"at":1700000000000}]"#;
        let mut h = DiagnosisHistory::from_json(stored, 5);
        h.record("Healthy", 0.8, None);

        let restored = DiagnosisHistory::from_json(&h.to_json().unwrap(), 5);
        assert_eq!(labels(&restored), vec!["Healthy", "bsv"]);
    }

    #[test]
    fn test_malformed_json_is_empty() {
        assert!(DiagnosisHistory::from_json("not json", 5).is_empty());
        assert!(DiagnosisHistory::from_json("{\"label\": 1}", 5).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut h = DiagnosisHistory::default();
        h.record("a", 0.1, None);
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.capacity(), DEFAULT_CAPACITY);
    }
}
