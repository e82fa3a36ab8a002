use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::confidence::Confidence;
use super::content::{Content, ContentType};
use super::relation::{Relation, RelationKind};

/// A stored unit of knowledge: typed content, embeddings, confidence,
/// tags, and outgoing relations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeEntity {
    /// UUID v4 identifier.
    pub id: String,
    /// Typed content — per-modality payload, NOT an untyped blob.
    pub content: Content,
    /// Embedding vectors keyed by model name.
    #[serde(default)]
    pub embeddings: HashMap<String, Vec<f32>>,
    /// Confidence score assigned at synthesis or insert time.
    pub confidence: Confidence,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Outgoing relations, in insertion order.
    #[serde(default)]
    pub relations: Vec<Relation>,
    /// Monotonic version, bumped on every update.
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KnowledgeEntity {
    /// Create a fresh entity with a random id, version 1, and both
    /// timestamps set to now.
    pub fn new(content: Content, confidence: f64) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content,
            embeddings: HashMap::new(),
            confidence: Confidence::new(confidence),
            tags: Vec::new(),
            metadata: HashMap::new(),
            relations: Vec::new(),
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// The modality of this entity's content.
    pub fn content_type(&self) -> ContentType {
        self.content.content_type()
    }

    /// Append an outgoing relation.
    pub fn add_relation(&mut self, kind: RelationKind, target_id: impl Into<String>, confidence: f64) {
        self.relations.push(Relation::new(kind, target_id, confidence));
    }

    /// Store or replace the embedding vector for a model.
    pub fn set_embedding(&mut self, model: impl Into<String>, vector: Vec<f32>) {
        self.embeddings.insert(model.into(), vector);
    }

    /// Bump the version and refresh `updated_at`. Called by the store on
    /// every update; never mutate version directly.
    pub fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }

    /// Check structural invariants.
    ///
    /// Hard violations (self-relations, inverted timestamps) are errors.
    /// Duplicate `(kind, target)` relation pairs are returned as warnings.
    pub fn validate(&self) -> Result<Vec<String>, String> {
        if self.updated_at < self.created_at {
            return Err(format!(
                "updated_at {} precedes created_at {}",
                self.updated_at, self.created_at
            ));
        }
        let mut warnings = Vec::new();
        let mut seen: HashSet<(RelationKind, &str)> = HashSet::new();
        for relation in &self.relations {
            if relation.target_id == self.id {
                return Err(format!("self-relation {:?} on entity {}", relation.kind, self.id));
            }
            if !seen.insert((relation.kind, relation.target_id.as_str())) {
                warnings.push(format!(
                    "duplicate relation ({:?}, {})",
                    relation.kind, relation.target_id
                ));
            }
        }
        Ok(warnings)
    }

    /// Structural comparison: same content, modality, confidence, tags,
    /// metadata, and embeddings. Ignores server-assigned fields (version,
    /// timestamps) and graph-enriched relations.
    ///
    /// Distinct from `PartialEq`, which only compares ids.
    pub fn content_eq(&self, other: &Self) -> bool {
        self.content == other.content
            && self.confidence == other.confidence
            && self.tags == other.tags
            && self.metadata == other.metadata
            && self.embeddings == other.embeddings
    }
}

/// Identity equality: two entities are equal if they have the same id.
/// For structural comparison, use [`KnowledgeEntity::content_eq`].
impl PartialEq for KnowledgeEntity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> KnowledgeEntity {
        KnowledgeEntity::new(Content::Text("the sky is blue".into()), 0.9)
    }

    #[test]
    fn new_entity_passes_validation() {
        assert!(entity().validate().unwrap().is_empty());
    }

    #[test]
    fn self_relation_is_an_error() {
        let mut e = entity();
        let id = e.id.clone();
        e.add_relation(RelationKind::RelatedTo, id, 0.5);
        assert!(e.validate().is_err());
    }

    #[test]
    fn duplicate_relation_is_a_warning() {
        let mut e = entity();
        e.add_relation(RelationKind::Supports, "other", 0.5);
        e.add_relation(RelationKind::Supports, "other", 0.6);
        let warnings = e.validate().unwrap();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn touch_bumps_version_and_timestamp() {
        let mut e = entity();
        let before = e.updated_at;
        e.touch();
        assert_eq!(e.version, 2);
        assert!(e.updated_at >= before);
    }

    #[test]
    fn equality_is_by_id() {
        let a = entity();
        let mut b = a.clone();
        b.confidence = Confidence::new(0.1);
        assert_eq!(a, b);
        assert!(!a.content_eq(&b));
    }
}
