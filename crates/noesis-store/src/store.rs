use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use noesis_core::entity::{KnowledgeEntity, Relation};
use noesis_core::errors::{NoesisResult, StoreError};
use noesis_core::models::SimilarityHit;
use noesis_core::traits::{GraphIndex, VectorIndex};

/// A relation edge that could not be written after a successful dual
/// write. Surfaced to the caller instead of being swallowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedRelation {
    pub relation: Relation,
    pub reason: String,
}

/// Outcome of a successful entity write. The entity itself is durable in
/// both indexes; individual relation edges may still have failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteReport {
    pub entity_id: String,
    pub failed_relations: Vec<FailedRelation>,
}

impl WriteReport {
    /// Whether every relation edge was written too.
    pub fn is_complete(&self) -> bool {
        self.failed_relations.is_empty()
    }
}

/// Direct similarity matches plus the graph paths that connect them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridSearchResult {
    pub direct_matches: Vec<SimilarityHit>,
    /// For every pair of matches, any path between them up to the
    /// requested depth — latent connections among otherwise-unrelated
    /// similarity hits.
    pub paths: Vec<Vec<Relation>>,
}

/// Coordinates the similarity index and the relationship graph.
///
/// Exclusively owns entity/relation persistence. No retries happen at
/// this layer; retrying is the caller's decision.
pub struct HybridStore {
    vector: Arc<dyn VectorIndex>,
    graph: Arc<dyn GraphIndex>,
}

impl HybridStore {
    pub fn new(vector: Arc<dyn VectorIndex>, graph: Arc<dyn GraphIndex>) -> Self {
        Self { vector, graph }
    }

    /// The underlying similarity index, for read-only similarity queries.
    pub fn vector(&self) -> &dyn VectorIndex {
        self.vector.as_ref()
    }

    /// The underlying graph, for read-only traversal queries.
    pub fn graph(&self) -> &dyn GraphIndex {
        self.graph.as_ref()
    }

    /// Add an entity to both indexes.
    ///
    /// Vector write first; if it fails, the graph is never touched. If the
    /// graph write fails, the vector write is deleted (compensating
    /// rollback) and the call fails with `StoreError::Inconsistency`.
    /// After a successful dual write, each of the entity's relations is
    /// written as a graph edge; edge failures land in the report.
    pub async fn add(&self, entity: &KnowledgeEntity) -> NoesisResult<WriteReport> {
        let warnings = entity.validate().map_err(|reason| StoreError::InvalidEntity {
            id: entity.id.clone(),
            reason,
        })?;
        for warning in &warnings {
            warn!(entity_id = %entity.id, warning, "entity validation warning");
        }

        self.vector.add(entity).await?;

        if let Err(graph_err) = self.graph.add(entity).await {
            if let Err(rollback_err) = self.vector.delete(&entity.id).await {
                warn!(
                    entity_id = %entity.id,
                    error = %rollback_err,
                    "compensating vector delete failed; indexes may diverge"
                );
            }
            return Err(StoreError::Inconsistency {
                entity_id: entity.id.clone(),
                reason: graph_err.to_string(),
            }
            .into());
        }

        let mut failed_relations = Vec::new();
        for relation in &entity.relations {
            if let Err(e) = self.graph.add_relation(&entity.id, relation).await {
                warn!(
                    entity_id = %entity.id,
                    target_id = %relation.target_id,
                    error = %e,
                    "relation write failed after dual write"
                );
                failed_relations.push(FailedRelation {
                    relation: relation.clone(),
                    reason: e.to_string(),
                });
            }
        }

        info!(
            entity_id = %entity.id,
            relations = entity.relations.len(),
            failed = failed_relations.len(),
            "entity stored"
        );
        Ok(WriteReport {
            entity_id: entity.id.clone(),
            failed_relations,
        })
    }

    /// Read an entity, enriching its relations from the graph.
    /// A vector-index miss is `Ok(None)`, not an error.
    pub async fn get(&self, id: &str) -> NoesisResult<Option<KnowledgeEntity>> {
        let Some(mut entity) = self.vector.get(id).await? else {
            return Ok(None);
        };
        entity.relations = self.graph.relations(id, None).await?;
        Ok(Some(entity))
    }

    /// Update an entity in both indexes, bumping its version.
    ///
    /// Same rollback contract as `add`: a failed graph update restores the
    /// previous vector state (or deletes the write when there was none).
    /// Returns the entity as stored, with the new version and timestamp.
    pub async fn update(&self, entity: &KnowledgeEntity) -> NoesisResult<KnowledgeEntity> {
        entity.validate().map_err(|reason| StoreError::InvalidEntity {
            id: entity.id.clone(),
            reason,
        })?;

        let previous = self.vector.get(&entity.id).await?;
        let mut next = entity.clone();
        next.touch();

        self.vector.update(&next).await?;

        if let Err(graph_err) = self.graph.update(&next).await {
            let restore = match &previous {
                Some(prev) => self.vector.update(prev).await,
                None => self.vector.delete(&next.id).await,
            };
            if let Err(restore_err) = restore {
                warn!(
                    entity_id = %next.id,
                    error = %restore_err,
                    "vector restore failed after graph update failure"
                );
            }
            return Err(StoreError::Inconsistency {
                entity_id: next.id.clone(),
                reason: graph_err.to_string(),
            }
            .into());
        }

        debug!(entity_id = %next.id, version = next.version, "entity updated");
        Ok(next)
    }

    /// Write one free-standing relation edge. Self-relations are
    /// rejected before touching the graph.
    pub async fn add_relation(&self, source_id: &str, relation: &Relation) -> NoesisResult<()> {
        if relation.target_id == source_id {
            return Err(StoreError::InvalidEntity {
                id: source_id.to_string(),
                reason: format!("self-relation {:?}", relation.kind),
            }
            .into());
        }
        self.graph.add_relation(source_id, relation).await?;
        debug!(
            source_id = %source_id,
            target_id = %relation.target_id,
            kind = ?relation.kind,
            "relation stored"
        );
        Ok(())
    }

    /// Delete an entity from both indexes. Both deletes are attempted
    /// even if the first fails; the first error is surfaced.
    pub async fn delete(&self, id: &str) -> NoesisResult<()> {
        let vector_result = self.vector.delete(id).await;
        let graph_result = self.graph.delete(id).await;
        info!(entity_id = %id, "entity deleted");
        vector_result?;
        graph_result
    }

    /// Similarity search enriched with the graph paths connecting the
    /// matches to each other.
    pub async fn search_knowledge(
        &self,
        query_vector: &[f32],
        limit: usize,
        max_path_depth: usize,
    ) -> NoesisResult<HybridSearchResult> {
        let direct_matches = self.vector.search_similar(query_vector, limit, None).await?;

        let mut paths = Vec::new();
        for (i, first) in direct_matches.iter().enumerate() {
            for second in &direct_matches[i + 1..] {
                let found = self
                    .graph
                    .search_path(&first.entity.id, &second.entity.id, max_path_depth)
                    .await?;
                paths.extend(found);
            }
        }

        debug!(
            matches = direct_matches.len(),
            paths = paths.len(),
            "hybrid search complete"
        );
        Ok(HybridSearchResult {
            direct_matches,
            paths,
        })
    }
}
