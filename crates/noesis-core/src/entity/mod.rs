pub mod base;
pub mod confidence;
pub mod content;
pub mod relation;

pub use base::KnowledgeEntity;
pub use confidence::Confidence;
pub use content::{Content, ContentType, MediaPayload};
pub use relation::{Relation, RelationEdge, RelationKind};
