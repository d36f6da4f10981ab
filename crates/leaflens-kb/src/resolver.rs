//! Disease resolver.
//!
//! Builds an in-memory lookup from canonical keys and normalised aliases to
//! curated records. Build once at startup; share by reference (or use
//! [`KnowledgeBase::builtin`], which is initialised on first use).

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::builtin;
use crate::error::{KnowledgeBaseError, Result};
use crate::normalise::{alias_key, title_case};
use crate::record::DiseaseRecord;

/// Which rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Label was literally a canonical key
    Exact,
    /// Normalised label was found in the alias table
    Alias,
    /// Title-cased reconstruction was a canonical key
    TitleCase,
}

/// A successful resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub record: &'a DiseaseRecord,
    pub matched_by: MatchKind,
}

/// On-disk layout of a custom knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseFile {
    pub diseases: Vec<DiseaseRecord>,
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

/// Immutable disease table plus alias index.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    /// Records in curated order.
    records: Vec<DiseaseRecord>,
    /// Canonical key → index into `records`.
    by_key: HashMap<String, usize>,
    /// Normalised alias → index into `records`.
    by_alias: HashMap<String, usize>,
}

impl KnowledgeBase {
    // ── Constructors ──────────────────────────────────────────────────────────

    /// The built-in banana knowledge base, shared process-wide.
    pub fn builtin() -> &'static KnowledgeBase {
        static BUILTIN: OnceLock<KnowledgeBase> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let kb = Self::assemble(builtin::records(), builtin::aliases());
            info!(
                "Built-in knowledge base ready: {} records, {} aliases",
                kb.n_records(),
                kb.n_aliases()
            );
            kb
        })
    }

    /// Build from records and `(alias, canonical key)` pairs, rejecting
    /// duplicate keys and aliases that point nowhere.
    pub fn from_parts<A, K>(records: Vec<DiseaseRecord>, aliases: impl IntoIterator<Item = (A, K)>) -> Result<Self>
    where
        A: AsRef<str>,
        K: AsRef<str>,
    {
        let mut seen = HashSet::new();
        for r in &records {
            if r.key.trim().is_empty() {
                return Err(KnowledgeBaseError::EmptyKey(r.name.clone()));
            }
            if !seen.insert(r.key.as_str()) {
                return Err(KnowledgeBaseError::DuplicateKey(r.key.clone()));
            }
        }

        let aliases: Vec<(String, String)> = aliases
            .into_iter()
            .map(|(a, k)| (a.as_ref().to_string(), k.as_ref().to_string()))
            .collect();
        for (alias, target) in &aliases {
            if !seen.contains(target.as_str()) {
                return Err(KnowledgeBaseError::DanglingAlias {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
        }

        let kb = Self::assemble(records, aliases);
        info!("Knowledge base built: {} records, {} aliases", kb.n_records(), kb.n_aliases());
        Ok(kb)
    }

    /// Load a custom knowledge base from JSON (`{"diseases": [...], "aliases": {...}}`).
    pub fn from_json(json: &str) -> Result<Self> {
        let file: KnowledgeBaseFile = serde_json::from_str(json)?;
        Self::from_parts(file.diseases, file.aliases)
    }

    /// Load a custom knowledge base from TOML (`[[diseases]]` tables plus an `[aliases]` table).
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: KnowledgeBaseFile = toml::from_str(text)?;
        Self::from_parts(file.diseases, file.aliases)
    }

    /// Index records and aliases. Aliases must already point at known keys;
    /// unknown targets are skipped.
    fn assemble<A, K>(records: Vec<DiseaseRecord>, aliases: impl IntoIterator<Item = (A, K)>) -> Self
    where
        A: AsRef<str>,
        K: AsRef<str>,
    {
        let by_key: HashMap<String, usize> = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.key.clone(), i))
            .collect();

        let mut by_alias = HashMap::new();
        for (alias, target) in aliases {
            let (alias, target) = (alias.as_ref(), target.as_ref());
            let Some(&idx) = by_key.get(target) else {
                warn!("Skipping alias '{}': no record '{}'", alias, target);
                continue;
            };
            let normalised = alias_key(alias);
            if normalised.is_empty() {
                warn!("Skipping alias '{}': normalises to nothing", alias);
                continue;
            }
            by_alias.entry(normalised).or_insert(idx);
        }

        Self { records, by_key, by_alias }
    }

    // ── Lookup ────────────────────────────────────────────────────────────────

    /// Exact canonical-key lookup.
    pub fn get(&self, key: &str) -> Option<&DiseaseRecord> {
        self.by_key.get(key).map(|&i| &self.records[i])
    }

    /// Resolve a free-form label to a record. Returns `None` when nothing matches.
    pub fn resolve(&self, label: &str) -> Option<&DiseaseRecord> {
        self.resolve_match(label).map(|r| r.record)
    }

    /// Like [`resolve`](Self::resolve) for labels that may be absent.
    pub fn resolve_opt(&self, label: Option<&str>) -> Option<&DiseaseRecord> {
        label.and_then(|l| self.resolve(l))
    }

    /// Resolve and report which rule matched.
    pub fn resolve_match(&self, label: &str) -> Option<Resolved<'_>> {
        if label.is_empty() {
            return None;
        }

        if let Some(record) = self.get(label) {
            return Some(Resolved { record, matched_by: MatchKind::Exact });
        }

        let normalised = alias_key(label);
        if let Some(&i) = self.by_alias.get(&normalised) {
            debug!("Label '{}' resolved via alias '{}'", label, normalised);
            return Some(Resolved { record: &self.records[i], matched_by: MatchKind::Alias });
        }

        let guess = title_case(label);
        if let Some(record) = self.get(&guess) {
            debug!("Label '{}' resolved via title case '{}'", label, guess);
            return Some(Resolved { record, matched_by: MatchKind::TitleCase });
        }

        debug!("Label '{}' not in knowledge base", label);
        None
    }

    /// Canonical key an alias points to, if the alias is registered.
    pub fn alias_target(&self, alias: &str) -> Option<&str> {
        self.by_alias.get(&alias_key(alias)).map(|&i| self.records[i].key.as_str())
    }

    // ── Introspection ─────────────────────────────────────────────────────────

    /// Records in curated order.
    pub fn records(&self) -> &[DiseaseRecord] {
        &self.records
    }

    /// `(normalised alias, canonical key)` pairs, sorted by alias.
    pub fn aliases(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .by_alias
            .iter()
            .map(|(a, &i)| (a.as_str(), self.records[i].key.as_str()))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    pub fn n_records(&self) -> usize { self.records.len() }

    pub fn n_aliases(&self) -> usize { self.by_alias.len() }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kb() -> &'static KnowledgeBase {
        KnowledgeBase::builtin()
    }

    #[test]
    fn test_exact_key_wins() {
        let r = kb().resolve_match("Healthy").unwrap();
        assert_eq!(r.matched_by, MatchKind::Exact);
        assert_eq!(r.record.name, "Healthy Banana Leaf");
    }

    #[test]
    fn test_alias_path() {
        let r = kb().resolve_match("black_sigatoka").unwrap();
        assert_eq!(r.matched_by, MatchKind::Alias);
        assert_eq!(r.record.key, "Black Sigatoka");
    }

    #[test]
    fn test_dataset_slug_alias() {
        let r = kb().resolve("banana_fruit_scarring_beetle").unwrap();
        assert_eq!(r.key, "Banana Fruit-Scarring Beetle");
    }

    #[test]
    fn test_model_class_names_resolve() {
        assert_eq!(kb().resolve("Healthy Banana leaf").unwrap().key, "Healthy");
        assert_eq!(kb().resolve("Healthy Banana").unwrap().key, "Healthy");
        assert_eq!(kb().resolve("Panama Wilt Disease").unwrap().key, "Fusarium Wilt");
        for class in builtin::MODEL_CLASS_NAMES {
            assert!(kb().resolve(class).is_some(), "model class '{class}' unresolved");
        }
    }

    #[test]
    fn test_mixed_case_alias_literal_is_reachable() {
        assert_eq!(kb().resolve("BBTV").unwrap().key, "Banana Bunchy Top Virus");
        assert_eq!(kb().resolve("bbTV").unwrap().key, "Banana Bunchy Top Virus");
    }

    #[test]
    fn test_title_case_path() {
        let r = kb().resolve_match("banana-leaf-spot").unwrap();
        // "banana_leaf_spot" is not an alias, but "Banana Leaf Spot" is a key
        assert_eq!(r.matched_by, MatchKind::TitleCase);
        assert_eq!(r.record.key, "Banana Leaf Spot");
    }

    #[test]
    fn test_unknown_and_empty_return_none() {
        assert!(kb().resolve("totally_unknown_xyz").is_none());
        assert!(kb().resolve("").is_none());
        assert!(kb().resolve("   ").is_none());
        assert!(kb().resolve_opt(None).is_none());
        assert!(kb().resolve_opt(Some("")).is_none());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        for label in ["sigatoka", "Healthy", "moko", "nope", "Banana Streak Virus"] {
            assert_eq!(kb().resolve(label), kb().resolve(label));
        }
    }

    #[test]
    fn test_no_dangling_aliases() {
        for (alias, key) in kb().aliases() {
            let rec = kb().resolve(alias).unwrap_or_else(|| panic!("alias '{alias}' unresolved"));
            assert_eq!(rec.key, key);
            assert!(kb().get(key).is_some());
        }
        assert_eq!(kb().n_aliases(), 25);
        assert_eq!(kb().n_records(), 14);
    }

    #[test]
    fn test_from_parts_rejects_dangling_alias() {
        let records = vec![DiseaseRecord::new("Rust", "Leaf Rust", &[], &[])];
        let err = KnowledgeBase::from_parts(records, [("rust", "Rust"), ("blight", "Blight")]).unwrap_err();
        assert!(matches!(err, KnowledgeBaseError::DanglingAlias { ref target, .. } if target == "Blight"));
    }

    #[test]
    fn test_from_parts_rejects_duplicate_key() {
        let records = vec![
            DiseaseRecord::new("Rust", "Leaf Rust", &[], &[]),
            DiseaseRecord::new("Rust", "Stem Rust", &[], &[]),
        ];
        let err = KnowledgeBase::from_parts(records, Vec::<(String, String)>::new()).unwrap_err();
        assert!(matches!(err, KnowledgeBaseError::DuplicateKey(_)));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "diseases": [
                {"key": "Leaf Rust", "name": "Coffee Leaf Rust",
                 "symptoms": ["Orange powder"], "treatment": ["Copper fungicide spray"]}
            ],
            "aliases": {"hemileia_vastatrix": "Leaf Rust"}
        }"#;
        let kb = KnowledgeBase::from_json(json).unwrap();
        let rec = kb.resolve("Hemileia vastatrix").unwrap();
        assert_eq!(rec.name, "Coffee Leaf Rust");
        assert_eq!(rec.treatments, vec!["Copper fungicide spray".to_string()]);
        assert_eq!(kb.resolve("leaf-rust").unwrap().key, "Leaf Rust");
    }

    #[test]
    fn test_from_toml() {
        let text = r#"
            [[diseases]]
            key = "Leaf Rust"
            name = "Coffee Leaf Rust"
            symptoms = ["Orange powder"]
            treatments = ["Remove fallen leaves"]

            [aliases]
            roya = "Leaf Rust"
        "#;
        let kb = KnowledgeBase::from_toml(text).unwrap();
        assert_eq!(kb.alias_target("ROYA"), Some("Leaf Rust"));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(KnowledgeBase::from_json("{"), Err(KnowledgeBaseError::Json(_))));
    }
}
