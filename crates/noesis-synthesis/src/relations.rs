//! Relation discovery among new and existing entities.

use tracing::warn;

use noesis_core::entity::{KnowledgeEntity, Relation, RelationEdge, RelationKind};
use noesis_core::traits::EmbeddingService;
use noesis_store::HybridStore;

fn similar_edge(source_id: &str, target_id: &str, similarity: f64) -> RelationEdge {
    let mut relation = Relation::new(RelationKind::SimilarTo, target_id, similarity);
    relation
        .metadata
        .insert("similarity_score".to_string(), similarity.into());
    RelationEdge::new(source_id, relation)
}

/// Pairwise relations among the newly created entities. Every unordered
/// pair at or above the threshold yields TWO directed edges (A→B and
/// B→A) with the same confidence.
pub async fn internal(
    entities: &[KnowledgeEntity],
    embedder: &dyn EmbeddingService,
    min_confidence: f64,
) -> Vec<RelationEdge> {
    let mut edges = Vec::new();
    for (i, first) in entities.iter().enumerate() {
        for second in &entities[i + 1..] {
            match embedder.compare(&first.content, &second.content).await {
                Ok(similarity) if similarity >= min_confidence => {
                    edges.push(similar_edge(&first.id, &second.id, similarity));
                    edges.push(similar_edge(&second.id, &first.id, similarity));
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        first = %first.id,
                        second = %second.id,
                        error = %e,
                        "pairwise comparison failed; pair skipped"
                    );
                }
            }
        }
    }
    edges
}

/// Relations from each new entity to existing similar entities in the
/// store. One directed edge new→existing per candidate at or above the
/// threshold; self-id matches are skipped.
pub async fn external(
    entities: &[KnowledgeEntity],
    store: &HybridStore,
    embedder: &dyn EmbeddingService,
    min_confidence: f64,
    candidate_batch_size: usize,
    embedding_model: &str,
) -> Vec<RelationEdge> {
    let mut edges = Vec::new();
    for entity in entities {
        let Some(vector) = entity.embeddings.get(embedding_model) else {
            continue;
        };
        let hits = match store
            .vector()
            .search_similar(vector, candidate_batch_size, None)
            .await
        {
            Ok(hits) => hits,
            Err(e) => {
                warn!(entity = %entity.id, error = %e, "candidate fetch failed; entity skipped");
                continue;
            }
        };
        for hit in hits {
            if hit.entity.id == entity.id {
                continue;
            }
            match embedder.compare(&entity.content, &hit.entity.content).await {
                Ok(similarity) if similarity >= min_confidence => {
                    edges.push(similar_edge(&entity.id, &hit.entity.id, similarity));
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        entity = %entity.id,
                        candidate = %hit.entity.id,
                        error = %e,
                        "comparison failed; candidate skipped"
                    );
                }
            }
        }
    }
    edges
}
