use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tracing::{debug, warn};

use noesis_core::config::ResearcherConfig;
use noesis_core::entity::{Confidence, Content};
use noesis_core::errors::NoesisResult;
use noesis_core::models::{ResearchFinding, ResearchQuery, ResearchResult, SourceKind};
use noesis_core::traits::{EmbeddingService, LlmService, Researcher};
use noesis_store::HybridStore;

use super::{RateLimiter, ResearchCache};

/// Graph exploration depth when expanding from seed entities.
const MAX_HOPS: usize = 3;

/// Researcher over the knowledge base itself: re-surfaces related
/// stored knowledge and, when an LLM is available, derives one new
/// insight connecting the seeds.
pub struct InternalResearcher {
    store: Arc<HybridStore>,
    embedder: Arc<dyn EmbeddingService>,
    llm: Option<Arc<dyn LlmService>>,
    cache: ResearchCache,
    limiter: RateLimiter,
    /// Bounds concurrent index lookups, like a network researcher bounds
    /// concurrent downloads.
    requests: Arc<Semaphore>,
}

impl InternalResearcher {
    pub fn new(
        store: Arc<HybridStore>,
        embedder: Arc<dyn EmbeddingService>,
        config: &ResearcherConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            llm: None,
            cache: ResearchCache::new(config.cache_ttl_secs),
            limiter: RateLimiter::new(std::time::Duration::from_millis(
                config.min_request_delay_ms,
            )),
            requests: Arc::new(Semaphore::new(config.max_concurrent_requests.max(1))),
        }
    }

    /// Enable insight generation through an LLM.
    pub fn with_llm(mut self, llm: Arc<dyn LlmService>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// One LLM-phrased insight connecting the seed texts. Failures are
    /// isolated — research proceeds without the insight.
    async fn derive_insight(
        &self,
        query: &ResearchQuery,
        seed_texts: &[&str],
        seed_ids: &[String],
        seed_confidence: f64,
    ) -> Option<ResearchFinding> {
        let llm = self.llm.as_ref()?;
        if seed_texts.is_empty() {
            return None;
        }
        let prompt = format!(
            "Synthesize one new insight about \"{}\" connecting these notes:\n{}",
            query.text,
            seed_texts.join("\n"),
        );
        let text = match llm.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "insight generation failed; continuing without it");
                return None;
            }
        };
        if text.trim().is_empty() {
            return None;
        }
        let mut finding = ResearchFinding {
            content: Content::Text(text),
            source: "knowledge_base".to_string(),
            source_kind: SourceKind::Internal,
            source_url: None,
            confidence: Confidence::new(seed_confidence),
            metadata: Default::default(),
            timestamp: Utc::now(),
        };
        finding.metadata.insert(
            "derived_from".to_string(),
            serde_json::Value::from(seed_ids.to_vec()),
        );
        Some(finding)
    }
}

#[async_trait]
impl Researcher for InternalResearcher {
    fn name(&self) -> &str {
        "knowledge_base"
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::Internal
    }

    async fn open(&self) -> NoesisResult<()> {
        debug!("internal researcher ready");
        Ok(())
    }

    async fn close(&self) -> NoesisResult<()> {
        debug!("internal researcher closed");
        Ok(())
    }

    async fn research(&self, query: &ResearchQuery) -> NoesisResult<ResearchResult> {
        let started = Instant::now();
        self.limiter.acquire().await;

        if let Some(cached) = self.cache.get(query) {
            debug!(query = %query.text, "research cache hit");
            return Ok(cached);
        }

        // Seed entities: nearest stored knowledge to the query.
        let vector = self
            .embedder
            .align(&Content::Text(query.text.clone()))
            .await?;
        let seeds = self
            .store
            .vector()
            .search_similar(&vector, query.max_results, None)
            .await?;

        // Expand the neighborhood through the graph, bounding concurrent
        // lookups. Traversal errors leave us with the seeds we have.
        let expansions = join_all(seeds.iter().map(|seed| async {
            let _permit = self.requests.acquire().await.ok()?;
            match self
                .store
                .graph()
                .related_entities(&seed.entity.id, MAX_HOPS, query.max_results)
                .await
            {
                Ok(entities) => Some(entities),
                Err(e) => {
                    warn!(seed = %seed.entity.id, error = %e, "graph expansion failed");
                    None
                }
            }
        }))
        .await;

        let mut seen: HashSet<String> = seeds.iter().map(|s| s.entity.id.clone()).collect();
        let mut explored = Vec::new();
        for entity in expansions.into_iter().flatten().flatten() {
            if seen.insert(entity.id.clone()) {
                explored.push(entity);
            }
        }

        // Re-surface explored knowledge above the confidence floor.
        let mut findings: Vec<ResearchFinding> = Vec::new();
        for entity in &explored {
            if entity.confidence.value() < query.min_confidence {
                continue;
            }
            let mut finding = ResearchFinding {
                content: entity.content.clone(),
                source: self.name().to_string(),
                source_kind: SourceKind::Internal,
                source_url: None,
                confidence: entity.confidence,
                metadata: Default::default(),
                timestamp: Utc::now(),
            };
            finding
                .metadata
                .insert("origin_entity".to_string(), entity.id.clone().into());
            findings.push(finding);
        }

        // One derived insight connecting the seeds, if an LLM is wired.
        let seed_texts: Vec<&str> = seeds
            .iter()
            .filter_map(|s| s.entity.content.as_text())
            .take(5)
            .collect();
        let seed_ids: Vec<String> = seeds.iter().map(|s| s.entity.id.clone()).collect();
        let seed_confidence = if seeds.is_empty() {
            0.0
        } else {
            seeds.iter().map(|s| s.similarity).sum::<f64>() / seeds.len() as f64
        };
        if let Some(insight) = self
            .derive_insight(query, &seed_texts, &seed_ids, seed_confidence)
            .await
        {
            findings.push(insight);
        }

        findings.truncate(query.max_results);

        let mut result = ResearchResult {
            query: query.clone(),
            total_findings: findings.len(),
            findings,
            processing_time_secs: started.elapsed().as_secs_f64(),
            metadata: Default::default(),
        };
        result
            .metadata
            .insert("seed_entities".to_string(), seeds.len().into());
        result
            .metadata
            .insert("explored_entities".to_string(), explored.len().into());

        self.cache.put(query, &result);
        Ok(result)
    }
}
