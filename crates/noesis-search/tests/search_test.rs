//! Integration tests for the search engine: caching, degradation,
//! filters, and failure modes.

use std::sync::Arc;

use noesis_core::config::SearchConfig;
use noesis_core::entity::{ContentType, Relation, RelationKind};
use noesis_core::errors::{NoesisError, SearchError};
use noesis_core::models::QueryLog;
use noesis_core::traits::GraphIndex;
use noesis_search::{SearchEngine, SearchQuery};
use noesis_store::HybridStore;
use test_fixtures::{embedded_entity, MemoryGraphIndex, MemoryVectorIndex, StubEmbeddingService};

const DIMS: usize = 64;

struct Harness {
    engine: SearchEngine,
    embedder: Arc<StubEmbeddingService>,
    graph: Arc<MemoryGraphIndex>,
    store: Arc<HybridStore>,
}

fn harness(config: SearchConfig) -> Harness {
    let vector = Arc::new(MemoryVectorIndex::new());
    let graph = Arc::new(MemoryGraphIndex::new());
    let store = Arc::new(HybridStore::new(vector, graph.clone()));
    let embedder = Arc::new(StubEmbeddingService::new(DIMS));
    let engine = SearchEngine::new(store.clone(), embedder.clone(), config);
    Harness {
        engine,
        embedder,
        graph,
        store,
    }
}

async fn seed(h: &Harness, texts: &[(&str, f64)]) -> Vec<String> {
    let mut ids = Vec::new();
    for (text, confidence) in texts {
        let entity = embedded_entity(text, *confidence, DIMS);
        ids.push(entity.id.clone());
        h.store.add(&entity).await.unwrap();
    }
    ids
}

#[tokio::test]
async fn identical_query_within_ttl_embeds_once() {
    let h = harness(SearchConfig::default());
    seed(&h, &[("cached knowledge", 0.9)]).await;

    let query = SearchQuery::text("cached knowledge");
    let first = h.engine.search(&query).await.unwrap();
    assert!(!first.metadata.cache_hit);

    let second = h.engine.search(&query).await.unwrap();
    assert!(second.metadata.cache_hit);
    assert_eq!(second.direct_matches.len(), first.direct_matches.len());

    // The embedding/search path ran exactly once.
    assert_eq!(h.embedder.align_calls(), 1);
}

#[tokio::test]
async fn normalized_queries_share_a_cache_entry() {
    let h = harness(SearchConfig::default());
    seed(&h, &[("shared entry", 0.9)]).await;

    h.engine.search(&SearchQuery::text("  Shared Entry ")).await.unwrap();
    let second = h.engine.search(&SearchQuery::text("shared entry")).await.unwrap();
    assert!(second.metadata.cache_hit);
    assert_eq!(h.embedder.align_calls(), 1);
}

#[tokio::test]
async fn zero_ttl_disables_caching() {
    let h = harness(SearchConfig {
        cache_ttl_secs: 0,
        ..Default::default()
    });
    seed(&h, &[("uncached", 0.9)]).await;

    let query = SearchQuery::text("uncached");
    h.engine.search(&query).await.unwrap();
    let second = h.engine.search(&query).await.unwrap();
    assert!(!second.metadata.cache_hit);
    assert_eq!(h.embedder.align_calls(), 2);
}

#[tokio::test]
async fn embedding_failure_aborts_text_query() {
    let h = harness(SearchConfig::default());
    seed(&h, &[("anything", 0.9)]).await;
    h.embedder.set_failing(true);

    let err = h.engine.search(&SearchQuery::text("anything")).await.unwrap_err();
    assert!(matches!(
        err,
        NoesisError::Search(SearchError::Embedding { .. })
    ));
}

#[tokio::test]
async fn graph_failure_degrades_to_vector_only() {
    let h = harness(SearchConfig::default());
    let ids = seed(&h, &[("seed entity", 0.9), ("neighbor", 0.8)]).await;
    h.graph.set_fail_related(true);

    let mut query = SearchQuery::text("seed entity");
    query.related_to = Some(ids[0].clone());
    let result = h.engine.search(&query).await.unwrap();

    assert!(result.metadata.degraded);
    assert!(result.related_entities.is_empty());
    assert!(!result.direct_matches.is_empty());
}

#[tokio::test]
async fn graph_leg_filters_and_scores_related_entities() {
    let h = harness(SearchConfig::default());
    let ids = seed(&h, &[("the seed", 0.9), ("one hop away", 1.0)]).await;
    h.graph
        .add_relation(
            &ids[0],
            &Relation::new(RelationKind::RelatedTo, ids[1].clone(), 0.9),
        )
        .await
        .unwrap();

    let query = SearchQuery {
        related_to: Some(ids[0].clone()),
        min_confidence: 0.0,
        ..Default::default()
    };
    let result = h.engine.search(&query).await.unwrap();

    assert_eq!(result.related_entities.len(), 1);
    assert_eq!(result.metadata.paths_found, 1);
    // One hop: 0.7 × 1.0 − 0.1 × 1 = 0.6.
    let score = result.scores[&ids[1]];
    assert!((score - 0.6).abs() < 1e-9);
}

#[tokio::test]
async fn content_type_filter_drops_other_modalities() {
    let h = harness(SearchConfig::default());
    seed(&h, &[("text fact", 0.9)]).await;

    let mut query = SearchQuery::text("text fact");
    query.content_types = vec![ContentType::Image];
    let result = h.engine.search(&query).await.unwrap();
    assert!(result.direct_matches.is_empty());
}

#[tokio::test]
async fn executed_queries_land_in_the_query_log() {
    let log = Arc::new(QueryLog::new(16));
    let vector = Arc::new(MemoryVectorIndex::new());
    let graph = Arc::new(MemoryGraphIndex::new());
    let store = Arc::new(HybridStore::new(vector, graph));
    let embedder = Arc::new(StubEmbeddingService::new(DIMS));
    let engine = SearchEngine::new(store, embedder, SearchConfig::default())
        .with_query_log(log.clone());

    engine.search(&SearchQuery::text("unanswered question")).await.unwrap();
    let records = log.recent(10);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].result_count, 0);
}
