//! Error types for knowledge-base loading.
//!
//! Resolution itself never fails; only building a custom table can.

use thiserror::Error;

use leaflens_common::LeafLensError;

pub type Result<T> = std::result::Result<T, KnowledgeBaseError>;

#[derive(Error, Debug)]
pub enum KnowledgeBaseError {
    #[error("Alias '{alias}' points to unknown canonical key '{target}'")]
    DanglingAlias { alias: String, target: String },

    #[error("Duplicate canonical key: {0}")]
    DuplicateKey(String),

    #[error("Empty canonical key in record '{0}'")]
    EmptyKey(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<KnowledgeBaseError> for LeafLensError {
    fn from(e: KnowledgeBaseError) -> Self {
        LeafLensError::KnowledgeBase(e.to_string())
    }
}
