//! Integration tests for the synthesis engine.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use noesis_core::config::SynthesisConfig;
use noesis_core::entity::RelationKind;
use noesis_core::models::{SourceKind, ValidationResult};
use noesis_store::HybridStore;
use noesis_synthesis::SynthesisEngine;
use test_fixtures::{
    embedded_entity, make_finding, MemoryGraphIndex, MemoryVectorIndex, StubEmbeddingService,
};

const DIMS: usize = 64;

fn validated(text: &str, is_valid: bool, confidence: f64) -> ValidationResult {
    ValidationResult {
        finding: make_finding(text, SourceKind::Academic, confidence),
        rules_applied: vec!["content_length".into()],
        scores: HashMap::from([("content_length".into(), confidence)]),
        overall_score: confidence,
        is_valid,
        confidence,
        feedback: Vec::new(),
        timestamp: Utc::now(),
    }
}

struct Harness {
    engine: SynthesisEngine,
    embedder: Arc<StubEmbeddingService>,
    store: Arc<HybridStore>,
}

fn harness() -> Harness {
    let vector = Arc::new(MemoryVectorIndex::new());
    let graph = Arc::new(MemoryGraphIndex::new());
    let store = Arc::new(HybridStore::new(vector, graph));
    let embedder = Arc::new(StubEmbeddingService::new(DIMS));
    let engine = SynthesisEngine::new(store.clone(), embedder.clone(), SynthesisConfig::default());
    Harness {
        engine,
        embedder,
        store,
    }
}

#[tokio::test]
async fn similar_pair_produces_two_directed_relations() {
    let h = harness();
    h.embedder.set_fixed_compare(0.85);

    let batch = vec![
        validated("gut flora affects mood", true, 0.9),
        validated("microbiome influences serotonin", true, 0.9),
    ];
    let result = h.engine.synthesize(&batch).await.unwrap();

    assert_eq!(result.entities.len(), 2);
    assert_eq!(result.relations.len(), 2);
    let (a, b) = (&result.entities[0].id, &result.entities[1].id);
    let forward = result
        .relations
        .iter()
        .find(|e| &e.source_id == a && &e.relation.target_id == b)
        .unwrap();
    let backward = result
        .relations
        .iter()
        .find(|e| &e.source_id == b && &e.relation.target_id == a)
        .unwrap();
    for edge in [forward, backward] {
        assert_eq!(edge.relation.kind, RelationKind::SimilarTo);
        assert!((edge.relation.confidence.value() - 0.85).abs() < 1e-9);
    }
}

#[tokio::test]
async fn dissimilar_pair_produces_no_relations() {
    let h = harness();
    h.embedder.set_fixed_compare(0.3);

    let batch = vec![
        validated("the moon orbits the earth", true, 0.9),
        validated("sourdough needs a starter", true, 0.9),
    ];
    let result = h.engine.synthesize(&batch).await.unwrap();
    assert_eq!(result.entities.len(), 2);
    assert!(result.relations.is_empty());
}

#[tokio::test]
async fn all_invalid_yields_typed_empty_result() {
    let h = harness();
    let batch = vec![
        validated("rejected claim one", false, 0.9),
        validated("rejected claim two", false, 0.9),
    ];
    let result = h.engine.synthesize(&batch).await.unwrap();

    assert!(result.is_empty());
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.metadata["status"], "no_valid_findings");
}

#[tokio::test]
async fn low_confidence_findings_are_filtered_even_when_valid() {
    let h = harness();
    let batch = vec![validated("borderline claim", true, 0.5)];
    let result = h.engine.synthesize(&batch).await.unwrap();
    assert!(result.is_empty());
    assert_eq!(result.metadata["status"], "no_valid_findings");
}

#[tokio::test]
async fn external_relations_point_at_existing_entities_only() {
    let h = harness();
    let existing = embedded_entity("existing knowledge on fermentation", 0.9, DIMS);
    h.store.add(&existing).await.unwrap();
    h.embedder.set_fixed_compare(0.9);

    let batch = vec![validated("new fermentation insight", true, 0.9)];
    let result = h.engine.synthesize(&batch).await.unwrap();

    assert_eq!(result.entities.len(), 1);
    let new_id = &result.entities[0].id;
    // One external edge new→existing; no self-relations.
    assert_eq!(result.relations.len(), 1);
    let edge = &result.relations[0];
    assert_eq!(&edge.source_id, new_id);
    assert_eq!(edge.relation.target_id, existing.id);
    assert_ne!(edge.relation.target_id, *new_id);
}

#[tokio::test]
async fn groups_synthesize_per_content_type() {
    let h = harness();
    h.embedder.set_fixed_compare(0.2);

    let mut image_result = validated("unused", true, 0.9);
    image_result.finding.content = noesis_core::entity::Content::Image(
        noesis_core::entity::MediaPayload {
            uri: Some("file:///a.png".into()),
            width: Some(800),
            height: Some(600),
            ..Default::default()
        },
    );
    let batch = vec![validated("a text finding", true, 0.8), image_result];
    let result = h.engine.synthesize(&batch).await.unwrap();

    assert_eq!(result.entities.len(), 2);
    // Group confidences (0.8 and 0.9) average at the engine level.
    assert!((result.confidence - 0.85).abs() < 1e-9);
}
