use async_trait::async_trait;

use crate::entity::KnowledgeEntity;
use crate::errors::NoesisResult;
use crate::models::{SearchFilter, SimilarityHit};

/// The external similarity index. Concrete engines live outside this
/// workspace; the hybrid store is their only caller for writes.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn add(&self, entity: &KnowledgeEntity) -> NoesisResult<()>;

    async fn get(&self, id: &str) -> NoesisResult<Option<KnowledgeEntity>>;

    async fn update(&self, entity: &KnowledgeEntity) -> NoesisResult<()>;

    async fn delete(&self, id: &str) -> NoesisResult<()>;

    /// Nearest neighbors of `vector`, best first, optionally constrained
    /// by an index-native filter.
    async fn search_similar(
        &self,
        vector: &[f32],
        limit: usize,
        filter: Option<&SearchFilter>,
    ) -> NoesisResult<Vec<SimilarityHit>>;
}
