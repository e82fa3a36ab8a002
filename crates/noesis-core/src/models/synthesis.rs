use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entity::{KnowledgeEntity, RelationEdge};

/// Entities and relations produced from one batch of validated findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisResult {
    pub entities: Vec<KnowledgeEntity>,
    pub relations: Vec<RelationEdge>,
    /// Mean of the per-group confidences.
    pub confidence: f64,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl SynthesisResult {
    /// The typed empty result for a batch with no valid findings.
    /// This is a value, not an error.
    pub fn no_valid_findings(total_findings: usize) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert("status".to_string(), "no_valid_findings".into());
        metadata.insert("total_findings".to_string(), total_findings.into());
        Self {
            entities: Vec::new(),
            relations: Vec::new(),
            confidence: 0.0,
            metadata,
            timestamp: Utc::now(),
        }
    }

    /// Whether this result carries nothing to persist.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relations.is_empty()
    }
}
