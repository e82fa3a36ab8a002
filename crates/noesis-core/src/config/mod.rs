pub mod defaults;
pub mod embedding_config;
pub mod research_config;
pub mod search_config;
pub mod synthesis_config;
pub mod validation_config;

pub use embedding_config::EmbeddingConfig;
pub use research_config::{ResearchConfig, ResearcherConfig};
pub use search_config::SearchConfig;
pub use synthesis_config::SynthesisConfig;
pub use validation_config::ValidationConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{NoesisError, NoesisResult};

/// Aggregate configuration for the whole system.
///
/// Passed as explicit structs — nothing in this layer reads environment
/// variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoesisConfig {
    pub embedding: EmbeddingConfig,
    pub search: SearchConfig,
    pub validation: ValidationConfig,
    pub synthesis: SynthesisConfig,
    pub research: ResearchConfig,
}

impl NoesisConfig {
    /// Parse a TOML document; absent sections/fields take their defaults.
    pub fn from_toml_str(raw: &str) -> NoesisResult<Self> {
        toml::from_str(raw).map_err(|e| NoesisError::Config {
            reason: e.to_string(),
        })
    }
}
