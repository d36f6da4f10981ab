//! leaflens-kb — Canonical disease knowledge base and label resolution.
//!
//! Turns whatever string a model emits (`black_sigatoka`, `Healthy Banana leaf`,
//! `PANAMA-wilt`) into one curated [`DiseaseRecord`], or reports no match.
//!
//! Resolution order:
//! 1. exact canonical key
//! 2. normalised alias (`trim → lowercase → [^a-z0-9]+ → _`)
//! 3. title-cased reconstruction (`fusarium-wilt` → `Fusarium Wilt`)
//!
//! ```ignore
//! let rec = leaflens_kb::resolve("black_sigatoka");  // Some(DiseaseRecord { key: "Black Sigatoka", .. })
//! ```

pub mod builtin;
pub mod error;
pub mod normalise;
pub mod record;
pub mod resolver;
pub mod treatment;

pub use builtin::HEALTHY_KEY;
pub use error::KnowledgeBaseError;
pub use record::DiseaseRecord;
pub use resolver::{KnowledgeBase, MatchKind, Resolved};
pub use treatment::TreatmentGroups;

/// Resolve a label against the built-in knowledge base.
pub fn resolve(label: &str) -> Option<&'static DiseaseRecord> {
    KnowledgeBase::builtin().resolve(label)
}
