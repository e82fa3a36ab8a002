use serde::{Deserialize, Serialize};

use super::defaults;

/// Synthesis engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Validation confidence floor, and the similarity threshold for
    /// emitting `similar_to` relations.
    pub min_confidence: f64,
    /// Concurrent content-type groups.
    pub max_concurrent_groups: usize,
    /// Existing-entity candidates fetched per new entity when
    /// discovering external relations.
    pub candidate_batch_size: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            min_confidence: defaults::DEFAULT_SYNTHESIS_MIN_CONFIDENCE,
            max_concurrent_groups: defaults::DEFAULT_MAX_CONCURRENT_GROUPS,
            candidate_batch_size: defaults::DEFAULT_CANDIDATE_BATCH_SIZE,
        }
    }
}
