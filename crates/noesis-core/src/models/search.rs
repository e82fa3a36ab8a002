use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{ContentType, KnowledgeEntity};

/// Index-native filter predicate.
///
/// Built once per query and applied identically to vector-index candidates
/// and to graph-discovered entities, so both legs of a hybrid search see
/// the same constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilter {
    /// Keep entities whose content type is one of these (empty = all).
    pub content_types: Vec<ContentType>,
    /// Confidence floor.
    pub min_confidence: Option<f64>,
    /// Entity must carry every one of these tags.
    pub tags_all: Vec<String>,
    /// Entity must carry at least one of these tags.
    pub tags_any: Vec<String>,
    /// Entity must carry none of these tags.
    pub exclude_tags: Vec<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

impl SearchFilter {
    /// Whether an entity satisfies every clause of this filter.
    pub fn matches(&self, entity: &KnowledgeEntity) -> bool {
        if !self.content_types.is_empty() && !self.content_types.contains(&entity.content_type()) {
            return false;
        }
        if let Some(min) = self.min_confidence {
            if entity.confidence.value() < min {
                return false;
            }
        }
        if !self.tags_all.is_empty() && !self.tags_all.iter().all(|t| entity.tags.contains(t)) {
            return false;
        }
        if !self.tags_any.is_empty() && !self.tags_any.iter().any(|t| entity.tags.contains(t)) {
            return false;
        }
        if self.exclude_tags.iter().any(|t| entity.tags.contains(t)) {
            return false;
        }
        if let Some(after) = self.created_after {
            if entity.created_at < after {
                return false;
            }
        }
        if let Some(before) = self.created_before {
            if entity.created_at > before {
                return false;
            }
        }
        true
    }

    /// Whether this filter constrains anything at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One vector-index match with its similarity to the query vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityHit {
    pub entity: KnowledgeEntity,
    /// Cosine similarity in [0, 1], best first in result lists.
    pub similarity: f64,
}
