use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::confidence::Confidence;

/// The 9 relation kinds between knowledge entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    IsA,
    PartOf,
    RelatedTo,
    DerivedFrom,
    Contradicts,
    Supports,
    Temporal,
    Causal,
    /// Similarity edge emitted by synthesis.
    SimilarTo,
}

impl RelationKind {
    /// Total number of relation kinds.
    pub const COUNT: usize = 9;

    /// All variants for iteration.
    pub const ALL: [RelationKind; 9] = [
        Self::IsA,
        Self::PartOf,
        Self::RelatedTo,
        Self::DerivedFrom,
        Self::Contradicts,
        Self::Supports,
        Self::Temporal,
        Self::Causal,
        Self::SimilarTo,
    ];
}

/// A typed, directed, confidence-weighted edge owned by a source entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub kind: RelationKind,
    /// The entity this relation points at.
    pub target_id: String,
    /// Strength of the relation, 0.0–1.0.
    pub confidence: Confidence,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Relation {
    /// Create a relation with empty metadata.
    pub fn new(kind: RelationKind, target_id: impl Into<String>, confidence: f64) -> Self {
        Self {
            kind,
            target_id: target_id.into(),
            confidence: Confidence::new(confidence),
            metadata: HashMap::new(),
        }
    }
}

/// A relation paired with its source entity id — the free-standing form
/// produced by synthesis and consumed by graph writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationEdge {
    pub source_id: String,
    pub relation: Relation,
}

impl RelationEdge {
    pub fn new(source_id: impl Into<String>, relation: Relation) -> Self {
        Self {
            source_id: source_id.into(),
            relation,
        }
    }
}
