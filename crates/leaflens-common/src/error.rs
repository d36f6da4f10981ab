use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeafLensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LeafLensError>;
