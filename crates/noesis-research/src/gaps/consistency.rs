use tracing::warn;

use noesis_core::entity::RelationKind;
use noesis_core::models::{DetectionMethod, KnowledgeGap};
use noesis_store::HybridStore;

use crate::state::IntegrationLedger;

/// Recently integrated entities that carry `contradicts` edges mark
/// topics whose knowledge disagrees with itself — worth re-researching.
pub async fn detect(
    store: &HybridStore,
    ledger: &IntegrationLedger,
    sample: usize,
) -> Vec<KnowledgeGap> {
    let mut gaps = Vec::new();
    for record in ledger.recent(sample) {
        let contradictions = match store
            .graph()
            .relations(&record.entity_id, Some(&[RelationKind::Contradicts]))
            .await
        {
            Ok(relations) => relations,
            Err(e) => {
                warn!(entity = %record.entity_id, error = %e, "consistency probe failed");
                continue;
            }
        };
        if contradictions.is_empty() {
            continue;
        }
        let mut gap = KnowledgeGap::new(
            record.topic.clone(),
            format!(
                "{} contradiction(s) recorded against stored knowledge",
                contradictions.len()
            ),
            0.9,
            DetectionMethod::Consistency,
            0.9,
        );
        gap.related_entities.push(record.entity_id.clone());
        gap.related_entities
            .extend(contradictions.into_iter().map(|r| r.target_id));
        gaps.push(gap);
    }
    gaps
}
