//! Entity and finding builders.

use chrono::Utc;

use noesis_core::constants::DEFAULT_EMBEDDING_MODEL;
use noesis_core::entity::{Confidence, Content, KnowledgeEntity};
use noesis_core::models::{ResearchFinding, SourceKind};

use crate::services::stub_vector;

/// A minimal text entity.
pub fn make_entity(text: &str, confidence: f64) -> KnowledgeEntity {
    KnowledgeEntity::new(Content::Text(text.to_string()), confidence)
}

/// A text entity carrying a default-model embedding consistent with
/// [`crate::StubEmbeddingService`], so it is searchable in a
/// [`crate::MemoryVectorIndex`].
pub fn embedded_entity(text: &str, confidence: f64, dims: usize) -> KnowledgeEntity {
    let mut entity = make_entity(text, confidence);
    let vector = stub_vector(&entity.content, dims);
    entity.set_embedding(DEFAULT_EMBEDDING_MODEL, vector);
    entity
}

/// A text research finding.
pub fn make_finding(text: &str, source_kind: SourceKind, confidence: f64) -> ResearchFinding {
    let source = match source_kind {
        SourceKind::Web => "web",
        SourceKind::Academic => "academic",
        SourceKind::Internal => "internal",
    };
    ResearchFinding {
        content: Content::Text(text.to_string()),
        source: source.to_string(),
        source_kind,
        source_url: None,
        confidence: Confidence::new(confidence),
        metadata: Default::default(),
        timestamp: Utc::now(),
    }
}
