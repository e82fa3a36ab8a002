use chrono::{DateTime, Utc};

use noesis_core::models::{DetectionMethod, KnowledgeGap};

use crate::state::IntegrationLedger;

/// Knowledge integrated long enough ago to be suspect. Emits one refresh
/// gap per stale ledger record; dispatch dedup collapses same-topic
/// duplicates.
pub fn detect(
    ledger: &IntegrationLedger,
    max_age_days: i64,
    now: DateTime<Utc>,
) -> Vec<KnowledgeGap> {
    ledger
        .stale(max_age_days, now)
        .into_iter()
        .map(|record| {
            let age_days = (now - record.integrated_at).num_days();
            let mut gap = KnowledgeGap::new(
                record.topic.clone(),
                format!("knowledge integrated {age_days} days ago may be outdated"),
                0.4,
                DetectionMethod::TemporalStaleness,
                0.7,
            );
            gap.modalities = vec![record.content_type];
            gap.related_entities.push(record.entity_id);
            gap
        })
        .collect()
}
