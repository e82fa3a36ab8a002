//! Relevance scoring for combined vector + graph results.

use std::collections::HashMap;

use noesis_core::constants::RELATED_BASE_SCORE;
use noesis_core::entity::{KnowledgeEntity, Relation};
use noesis_core::models::SimilarityHit;

/// Score direct similarity matches by position and confidence:
/// `(1 − rank/total) × confidence`, so earlier results score higher.
pub fn score_direct(hits: &[SimilarityHit]) -> HashMap<String, f64> {
    let total = hits.len();
    hits.iter()
        .enumerate()
        .map(|(rank, hit)| {
            let positional = 1.0 - (rank as f64 / total as f64);
            (
                hit.entity.id.clone(),
                positional * hit.entity.confidence.value(),
            )
        })
        .collect()
}

/// Score graph-discovered entities.
///
/// Base score is `0.7 × confidence`. When paths connect the entity to the
/// traversal seed, the score becomes the best path-derived value:
/// `base − path_penalty × path_length`, maximized over all paths (the
/// shortest path wins).
pub fn score_related(
    related: &[KnowledgeEntity],
    paths: &[Vec<Relation>],
    path_penalty: f64,
) -> HashMap<String, f64> {
    related
        .iter()
        .map(|entity| {
            let base = RELATED_BASE_SCORE * entity.confidence.value();
            let best_path = paths
                .iter()
                .filter(|path| path.iter().any(|r| r.target_id == entity.id))
                .map(|path| base - path_penalty * path.len() as f64)
                .fold(None::<f64>, |best, score| {
                    Some(best.map_or(score, |b| b.max(score)))
                });
            (entity.id.clone(), best_path.unwrap_or(base).max(0.0))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use noesis_core::entity::{Content, KnowledgeEntity, RelationKind};

    fn hit(confidence: f64) -> SimilarityHit {
        SimilarityHit {
            entity: KnowledgeEntity::new(Content::Text("x".into()), confidence),
            similarity: confidence,
        }
    }

    #[test]
    fn direct_scores_decay_by_position() {
        let hits = vec![hit(1.0), hit(0.8), hit(0.6)];
        let scores = score_direct(&hits);
        let values: Vec<f64> = hits
            .iter()
            .map(|h| scores[&h.entity.id])
            .collect();
        assert!((values[0] - 1.0).abs() < 1e-9);
        assert!((values[1] - (2.0 / 3.0) * 0.8).abs() < 1e-9);
        assert!((values[2] - (1.0 / 3.0) * 0.6).abs() < 1e-9);
        assert!(values[0] > values[1] && values[1] > values[2]);
    }

    #[test]
    fn shortest_path_gives_best_related_score() {
        let entity = KnowledgeEntity::new(Content::Text("related".into()), 1.0);
        let one_hop = vec![Relation::new(RelationKind::RelatedTo, entity.id.clone(), 1.0)];
        let two_hops = vec![
            Relation::new(RelationKind::RelatedTo, "middle", 1.0),
            Relation::new(RelationKind::RelatedTo, entity.id.clone(), 1.0),
        ];
        let scores = score_related(
            std::slice::from_ref(&entity),
            &[two_hops, one_hop],
            0.1,
        );
        // 0.7 × 1.0 − 0.1 × 1 hop = 0.6, better than 0.5 for two hops.
        assert!((scores[&entity.id] - 0.6).abs() < 1e-9);
    }

    #[test]
    fn unconnected_related_entity_keeps_base_score() {
        let entity = KnowledgeEntity::new(Content::Text("floating".into()), 0.5);
        let scores = score_related(std::slice::from_ref(&entity), &[], 0.1);
        assert!((scores[&entity.id] - 0.35).abs() < 1e-9);
    }
}
