//! Integration tests for the hybrid store's dual-write contract.

use std::sync::Arc;

use noesis_core::entity::{Content, RelationKind};
use noesis_core::errors::{NoesisError, StoreError};
use noesis_core::traits::GraphIndex;
use test_fixtures::{embedded_entity, stub_vector, MemoryGraphIndex, MemoryVectorIndex};

const DIMS: usize = 64;

fn store_with_indexes() -> (
    noesis_store::HybridStore,
    Arc<MemoryVectorIndex>,
    Arc<MemoryGraphIndex>,
) {
    let vector = Arc::new(MemoryVectorIndex::new());
    let graph = Arc::new(MemoryGraphIndex::new());
    let store = noesis_store::HybridStore::new(vector.clone(), graph.clone());
    (store, vector, graph)
}

#[tokio::test]
async fn round_trip_preserves_content() {
    let (store, _, graph) = store_with_indexes();
    let mut entity = embedded_entity("water boils at 100C at sea level", 0.9, DIMS);
    entity.tags = vec!["physics".into()];
    entity.add_relation(RelationKind::Supports, "other-entity", 0.8);

    let report = store.add(&entity).await.unwrap();
    assert!(report.is_complete());
    assert_eq!(graph.edge_count(&entity.id), 1);

    let loaded = store.get(&entity.id).await.unwrap().unwrap();
    assert!(loaded.content_eq(&entity));
    assert_eq!(loaded.relations, entity.relations);
}

#[tokio::test]
async fn missing_entity_is_none_not_error() {
    let (store, _, _) = store_with_indexes();
    assert!(store.get("no-such-id").await.unwrap().is_none());
}

#[tokio::test]
async fn graph_failure_rolls_back_vector_write() {
    let (store, vector, graph) = store_with_indexes();
    graph.set_fail_add(true);

    let entity = embedded_entity("doomed entity", 0.9, DIMS);
    let err = store.add(&entity).await.unwrap_err();
    assert!(matches!(
        err,
        NoesisError::Store(StoreError::Inconsistency { .. })
    ));

    // The compensating delete removed the vector write.
    assert!(store.get(&entity.id).await.unwrap().is_none());
    assert_eq!(vector.len(), 0);
}

#[tokio::test]
async fn vector_failure_never_touches_graph() {
    let (store, vector, graph) = store_with_indexes();
    vector.set_fail_add(true);
    let entity = embedded_entity("never lands", 0.9, DIMS);
    assert!(store.add(&entity).await.is_err());
    assert!(!graph.contains(&entity.id));
}

#[tokio::test]
async fn failed_relation_writes_are_reported_not_rolled_back() {
    let (store, _, graph) = store_with_indexes();
    graph.set_fail_add_relation(true);

    let mut entity = embedded_entity("entity with edges", 0.9, DIMS);
    entity.add_relation(RelationKind::RelatedTo, "a", 0.5);
    entity.add_relation(RelationKind::Supports, "b", 0.6);

    let report = store.add(&entity).await.unwrap();
    assert_eq!(report.failed_relations.len(), 2);
    assert!(!report.is_complete());
    // The entity itself survived in both indexes.
    assert!(store.get(&entity.id).await.unwrap().is_some());
    assert!(graph.contains(&entity.id));
}

#[tokio::test]
async fn self_relation_is_rejected_before_any_write() {
    let (store, vector, graph) = store_with_indexes();
    let mut entity = embedded_entity("self-referential", 0.9, DIMS);
    let id = entity.id.clone();
    entity.add_relation(RelationKind::RelatedTo, id, 1.0);

    let err = store.add(&entity).await.unwrap_err();
    assert!(matches!(
        err,
        NoesisError::Store(StoreError::InvalidEntity { .. })
    ));
    assert_eq!(vector.len(), 0);
    assert!(!graph.contains(&entity.id));
}

#[tokio::test]
async fn failed_rollback_still_surfaces_inconsistency() {
    let (store, vector, graph) = store_with_indexes();
    graph.set_fail_add(true);
    vector.set_fail_delete(true);

    let entity = embedded_entity("stuck entity", 0.9, DIMS);
    let err = store.add(&entity).await.unwrap_err();
    // The compensating delete failed too; the caller still sees the
    // inconsistency, and the orphaned vector write remains.
    assert!(matches!(
        err,
        NoesisError::Store(StoreError::Inconsistency { .. })
    ));
    assert_eq!(vector.len(), 1);
}

#[tokio::test]
async fn update_bumps_version_in_both_indexes() {
    let (store, _, graph) = store_with_indexes();
    let entity = embedded_entity("versioned fact", 0.9, DIMS);
    store.add(&entity).await.unwrap();

    let mut changed = entity.clone();
    changed.content = Content::Text("versioned fact, revised".into());
    let stored = store.update(&changed).await.unwrap();
    assert_eq!(stored.version, 2);

    let loaded = store.get(&entity.id).await.unwrap().unwrap();
    assert_eq!(loaded.version, 2);
    assert_eq!(graph.get(&entity.id).await.unwrap().unwrap().version, 2);
}

#[tokio::test]
async fn delete_cascades_to_both_indexes() {
    let (store, vector, graph) = store_with_indexes();
    let entity = embedded_entity("ephemeral", 0.9, DIMS);
    store.add(&entity).await.unwrap();

    store.delete(&entity.id).await.unwrap();
    assert_eq!(vector.len(), 0);
    assert!(!graph.contains(&entity.id));
}

#[tokio::test]
async fn search_knowledge_surfaces_paths_between_matches() {
    let (store, _, graph) = store_with_indexes();
    let a = embedded_entity("rust ownership model", 0.9, DIMS);
    let b = embedded_entity("rust borrow checker", 0.9, DIMS);
    store.add(&a).await.unwrap();
    store.add(&b).await.unwrap();

    // Connect a -> b in the graph.
    let relation = noesis_core::entity::Relation::new(RelationKind::RelatedTo, b.id.clone(), 0.9);
    graph.add_relation(&a.id, &relation).await.unwrap();

    let query = stub_vector(&a.content, DIMS);
    let result = store.search_knowledge(&query, 5, 2).await.unwrap();

    assert_eq!(result.direct_matches.len(), 2);
    assert_eq!(result.paths.len(), 1);
    assert_eq!(result.paths[0][0].target_id, b.id);
}
