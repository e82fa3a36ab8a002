//! Property tests for core type invariants.

use noesis_core::entity::{Confidence, Content, KnowledgeEntity, RelationKind};
use proptest::prelude::*;

proptest! {
    // ── Confidence stays inside [0, 1] under construction and arithmetic ──

    #[test]
    fn confidence_clamps_any_input(raw in -10.0f64..10.0) {
        let c = Confidence::new(raw);
        prop_assert!((0.0..=1.0).contains(&c.value()));
    }

    #[test]
    fn confidence_scaling_stays_in_range(base in 0.0f64..1.0, factor in 0.0f64..5.0) {
        let c = Confidence::new(base) * factor;
        prop_assert!((0.0..=1.0).contains(&c.value()));
    }

    // ── Entity invariants hold for arbitrary relation fan-out ──

    #[test]
    fn distinct_targets_never_warn(count in 0usize..20) {
        let mut entity = KnowledgeEntity::new(Content::Text("fact".into()), 0.9);
        for i in 0..count {
            entity.add_relation(RelationKind::RelatedTo, format!("target-{i}"), 0.5);
        }
        prop_assert!(entity.validate().unwrap().is_empty());
    }

    #[test]
    fn repeated_touch_keeps_version_monotonic(touches in 1usize..50) {
        let mut entity = KnowledgeEntity::new(Content::Text("fact".into()), 0.9);
        let mut last = entity.version;
        for _ in 0..touches {
            entity.touch();
            prop_assert!(entity.version > last);
            last = entity.version;
            prop_assert!(entity.updated_at >= entity.created_at);
        }
    }
}
