use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding service agreement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Fixed vector dimension agreed with the embedding service.
    pub dimensions: usize,
    /// Model name under which vectors are stored on entities.
    pub model_name: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            model_name: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
        }
    }
}
