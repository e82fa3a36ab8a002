use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use noesis_core::config::SynthesisConfig;
use noesis_core::constants::DEFAULT_EMBEDDING_MODEL;
use noesis_core::entity::{ContentType, KnowledgeEntity, RelationEdge};
use noesis_core::errors::NoesisResult;
use noesis_core::models::{SynthesisResult, ValidationResult};
use noesis_core::traits::EmbeddingService;
use noesis_store::HybridStore;

use crate::relations;

/// The synthesis engine.
///
/// Stateless beyond configuration; reads the store only to discover
/// relations to existing knowledge.
pub struct SynthesisEngine {
    store: Arc<HybridStore>,
    embedder: Arc<dyn EmbeddingService>,
    config: SynthesisConfig,
    semaphore: Arc<Semaphore>,
}

impl SynthesisEngine {
    pub fn new(
        store: Arc<HybridStore>,
        embedder: Arc<dyn EmbeddingService>,
        config: SynthesisConfig,
    ) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_groups.max(1)));
        Self {
            store,
            embedder,
            config,
            semaphore,
        }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Synthesize a batch of validation results.
    ///
    /// Filters to `is_valid && confidence ≥ min_confidence`, groups by
    /// content type, and synthesizes the groups concurrently. A batch
    /// with nothing valid returns the typed empty result.
    pub async fn synthesize(
        &self,
        validation_results: &[ValidationResult],
    ) -> NoesisResult<SynthesisResult> {
        let valid: Vec<&ValidationResult> = validation_results
            .iter()
            .filter(|r| r.is_valid && r.confidence >= self.config.min_confidence)
            .collect();

        if valid.is_empty() {
            info!(
                total = validation_results.len(),
                "no valid findings to synthesize"
            );
            return Ok(SynthesisResult::no_valid_findings(validation_results.len()));
        }

        let mut groups: BTreeMap<ContentType, Vec<&ValidationResult>> = BTreeMap::new();
        for &result in &valid {
            groups
                .entry(result.finding.content_type())
                .or_default()
                .push(result);
        }
        let content_types: Vec<String> = groups
            .keys()
            .map(|ct| format!("{ct:?}").to_lowercase())
            .collect();

        let group_outputs = join_all(
            groups
                .into_iter()
                .map(|(content_type, members)| self.synthesize_group(content_type, members)),
        )
        .await;

        let mut entities = Vec::new();
        let mut edges = Vec::new();
        let mut confidences = Vec::new();
        for (group_entities, group_edges, group_confidence) in group_outputs {
            entities.extend(group_entities);
            edges.extend(group_edges);
            confidences.push(group_confidence);
        }

        let confidence = confidences.iter().sum::<f64>() / confidences.len() as f64;
        let mut metadata = std::collections::HashMap::new();
        metadata.insert("status".to_string(), "ok".into());
        metadata.insert(
            "total_findings".to_string(),
            validation_results.len().into(),
        );
        metadata.insert("valid_findings".to_string(), valid.len().into());
        metadata.insert(
            "content_types".to_string(),
            serde_json::Value::from(content_types),
        );

        info!(
            entities = entities.len(),
            relations = edges.len(),
            confidence,
            "synthesis complete"
        );
        Ok(SynthesisResult {
            entities,
            relations: edges,
            confidence,
            metadata,
            timestamp: Utc::now(),
        })
    }

    /// Synthesize one content-type group under the concurrency semaphore.
    /// Failures inside the group degrade it (fewer entities/relations)
    /// instead of failing the batch.
    async fn synthesize_group(
        &self,
        content_type: ContentType,
        results: Vec<&ValidationResult>,
    ) -> (Vec<KnowledgeEntity>, Vec<RelationEdge>, f64) {
        let _permit = match self.semaphore.acquire().await {
            Ok(permit) => permit,
            Err(_) => return (Vec::new(), Vec::new(), 0.0),
        };

        let mut entities = Vec::new();
        for &result in &results {
            match self.create_entity(result).await {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!(
                        source = %result.finding.source,
                        error = %e,
                        "entity creation failed; finding skipped"
                    );
                }
            }
        }
        if entities.is_empty() {
            return (Vec::new(), Vec::new(), 0.0);
        }

        let mut edges = relations::internal(
            &entities,
            self.embedder.as_ref(),
            self.config.min_confidence,
        )
        .await;
        edges.extend(
            relations::external(
                &entities,
                self.store.as_ref(),
                self.embedder.as_ref(),
                self.config.min_confidence,
                self.config.candidate_batch_size,
                DEFAULT_EMBEDDING_MODEL,
            )
            .await,
        );

        let confidence =
            results.iter().map(|r| r.confidence).sum::<f64>() / results.len() as f64;

        debug!(
            ?content_type,
            entities = entities.len(),
            relations = edges.len(),
            confidence,
            "group synthesized"
        );
        (entities, edges, confidence)
    }

    /// Create one entity from one validated finding, embedding its
    /// content through the embedding service.
    async fn create_entity(&self, result: &ValidationResult) -> NoesisResult<KnowledgeEntity> {
        let finding = &result.finding;
        let vector = self.embedder.align(&finding.content).await?;

        let mut entity = KnowledgeEntity::new(finding.content.clone(), result.confidence);
        entity.set_embedding(DEFAULT_EMBEDDING_MODEL, vector);
        entity.metadata = finding.metadata.clone();
        entity
            .metadata
            .insert("source".to_string(), finding.source.clone().into());
        if let Some(url) = &finding.source_url {
            entity
                .metadata
                .insert("source_url".to_string(), url.clone().into());
        }
        entity
            .metadata
            .insert("validated_at".to_string(), result.timestamp.to_rfc3339().into());
        Ok(entity)
    }
}
