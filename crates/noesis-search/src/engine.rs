use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use moka::sync::Cache;
use tracing::{debug, warn};

use noesis_core::config::SearchConfig;
use noesis_core::entity::{Content, KnowledgeEntity, Relation};
use noesis_core::errors::{NoesisResult, SearchError};
use noesis_core::models::{QueryLog, SearchFilter, SimilarityHit};
use noesis_core::traits::EmbeddingService;
use noesis_store::HybridStore;

use crate::query::{SearchMetadata, SearchQuery, SearchResult};
use crate::ranking;

/// The search engine.
///
/// Owns its result cache explicitly — state is injected at construction,
/// never process-wide.
pub struct SearchEngine {
    store: Arc<HybridStore>,
    embedder: Arc<dyn EmbeddingService>,
    config: SearchConfig,
    /// None when caching is disabled (cache_ttl_secs = 0).
    cache: Option<Cache<String, Arc<SearchResult>>>,
    query_log: Option<Arc<QueryLog>>,
}

impl SearchEngine {
    pub fn new(
        store: Arc<HybridStore>,
        embedder: Arc<dyn EmbeddingService>,
        config: SearchConfig,
    ) -> Self {
        let cache = (config.cache_ttl_secs > 0).then(|| {
            Cache::builder()
                .time_to_live(Duration::from_secs(config.cache_ttl_secs))
                .build()
        });
        Self {
            store,
            embedder,
            config,
            cache,
            query_log: None,
        }
    }

    /// Report executed queries to a log (feeds gap detection).
    pub fn with_query_log(mut self, log: Arc<QueryLog>) -> Self {
        self.query_log = Some(log);
        self
    }

    /// Execute a composite query: concurrent vector and graph legs,
    /// combined ranking, cached result.
    ///
    /// An embedding failure on the text leg aborts the query; a graph
    /// failure degrades the result to vector-only.
    pub async fn search(&self, query: &SearchQuery) -> NoesisResult<SearchResult> {
        let limit = query
            .limit
            .unwrap_or(self.config.default_limit)
            .min(self.config.max_limit);

        let key = cache_key(query, limit);
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&key) {
                debug!(key = %key, "search cache hit");
                let mut result = (*cached).clone();
                result.metadata.cache_hit = true;
                return Ok(result);
            }
        }

        let filter = query.to_filter();
        let (direct, graph_leg) = tokio::join!(
            self.vector_leg(query, &filter, limit),
            self.graph_leg(query, &filter),
        );
        let direct = direct?;
        let (related, paths, degraded) = graph_leg;

        let result = self.combine(direct, related, paths, degraded);

        if let Some(log) = &self.query_log {
            let top_score = result
                .scores
                .values()
                .copied()
                .fold(None::<f64>, |best, s| Some(best.map_or(s, |b| b.max(s))));
            log.record(
                query.text.clone().unwrap_or_default(),
                result.metadata.total_results,
                top_score,
            );
        }

        if let Some(cache) = &self.cache {
            // Concurrent misses may both compute and insert here; the
            // write is idempotent, so the race is benign and unlocked.
            cache.insert(key, Arc::new(result.clone()));
        }
        Ok(result)
    }

    async fn vector_leg(
        &self,
        query: &SearchQuery,
        filter: &SearchFilter,
        limit: usize,
    ) -> NoesisResult<Vec<SimilarityHit>> {
        let Some(text) = &query.text else {
            return Ok(Vec::new());
        };
        let vector = self
            .embedder
            .align(&Content::Text(text.clone()))
            .await
            .map_err(|e| SearchError::Embedding {
                message: e.to_string(),
            })?;
        self.store
            .vector()
            .search_similar(&vector, limit, Some(filter))
            .await
    }

    /// Graph traversal leg. Never fails the query: any error degrades
    /// the result to vector-only.
    async fn graph_leg(
        &self,
        query: &SearchQuery,
        filter: &SearchFilter,
    ) -> (Vec<KnowledgeEntity>, Vec<Vec<Relation>>, bool) {
        let Some(seed) = &query.related_to else {
            return (Vec::new(), Vec::new(), false);
        };
        let depth = query
            .relation_depth
            .unwrap_or(self.config.default_relation_depth);

        let entities = match self
            .store
            .graph()
            .related_entities(seed, depth, self.config.related_limit)
            .await
        {
            Ok(entities) => entities,
            Err(e) => {
                warn!(seed = %seed, error = %e, "graph leg failed; degrading to vector-only");
                return (Vec::new(), Vec::new(), true);
            }
        };

        let kept: Vec<KnowledgeEntity> =
            entities.into_iter().filter(|e| filter.matches(e)).collect();

        let mut paths = Vec::new();
        let mut degraded = false;
        for entity in &kept {
            match self.store.graph().search_path(seed, &entity.id, depth).await {
                Ok(found) => paths.extend(found),
                Err(e) => {
                    warn!(seed = %seed, target = %entity.id, error = %e, "path lookup failed");
                    degraded = true;
                }
            }
        }
        (kept, paths, degraded)
    }

    fn combine(
        &self,
        direct: Vec<SimilarityHit>,
        related: Vec<KnowledgeEntity>,
        paths: Vec<Vec<Relation>>,
        degraded: bool,
    ) -> SearchResult {
        let mut scores = ranking::score_direct(&direct);
        scores.extend(ranking::score_related(
            &related,
            &paths,
            self.config.path_penalty,
        ));

        let metadata = SearchMetadata {
            total_results: direct.len() + related.len(),
            direct_count: direct.len(),
            related_count: related.len(),
            paths_found: paths.len(),
            degraded,
            cache_hit: false,
            executed_at: Utc::now(),
        };
        SearchResult {
            direct_matches: direct.into_iter().map(|h| h.entity).collect(),
            related_entities: related,
            graph_paths: paths,
            scores,
            metadata,
        }
    }
}

/// Cache key: blake3 of the normalized query JSON, suffixed with the
/// effective limit.
fn cache_key(query: &SearchQuery, limit: usize) -> String {
    let normalized = query.normalized();
    let json = serde_json::to_string(&normalized).unwrap_or_default();
    format!("{}-{limit}", blake3::hash(json.as_bytes()).to_hex())
}
