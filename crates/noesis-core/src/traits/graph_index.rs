use async_trait::async_trait;

use crate::entity::{KnowledgeEntity, Relation, RelationKind};
use crate::errors::NoesisResult;

/// The external relationship graph. Concrete engines live outside this
/// workspace; the hybrid store is their only caller for writes.
#[async_trait]
pub trait GraphIndex: Send + Sync {
    async fn add(&self, entity: &KnowledgeEntity) -> NoesisResult<()>;

    async fn get(&self, id: &str) -> NoesisResult<Option<KnowledgeEntity>>;

    async fn update(&self, entity: &KnowledgeEntity) -> NoesisResult<()>;

    /// Delete an entity node and its edges.
    async fn delete(&self, id: &str) -> NoesisResult<()>;

    /// Add one directed edge from `source_id`.
    async fn add_relation(&self, source_id: &str, relation: &Relation) -> NoesisResult<()>;

    /// Outgoing relations of an entity, optionally restricted to kinds.
    async fn relations(
        &self,
        id: &str,
        kinds: Option<&[RelationKind]>,
    ) -> NoesisResult<Vec<Relation>>;

    /// All paths between two entities up to `max_depth` hops, each path
    /// as the sequence of relations walked.
    async fn search_path(
        &self,
        from_id: &str,
        to_id: &str,
        max_depth: usize,
    ) -> NoesisResult<Vec<Vec<Relation>>>;

    /// Entities reachable from `id` within `max_depth` hops.
    async fn related_entities(
        &self,
        id: &str,
        max_depth: usize,
        limit: usize,
    ) -> NoesisResult<Vec<KnowledgeEntity>>;
}
