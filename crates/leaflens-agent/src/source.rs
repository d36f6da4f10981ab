//! Inference sources backed by saved responses.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;

use leaflens_common::{InferenceSource, Result};

/// Reads a raw inference response from a JSON file, or from stdin when no
/// path is given.
pub struct FileInferenceSource {
    path: Option<PathBuf>,
}

impl FileInferenceSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl InferenceSource for FileInferenceSource {
    fn name(&self) -> &str {
        match self.path {
            Some(_) => "file",
            None => "stdin",
        }
    }

    async fn infer(&self, _image_ref: &str) -> Result<serde_json::Value> {
        let raw = match &self.path {
            Some(path) => tokio::fs::read_to_string(path).await?,
            None => {
                let mut buf = String::new();
                tokio::io::stdin().read_to_string(&mut buf).await?;
                buf
            }
        };
        Ok(serde_json::from_str(&raw)?)
    }
}
