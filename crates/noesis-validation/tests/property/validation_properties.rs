//! Property tests for rule scoring invariants.

use chrono::{Duration, Utc};
use noesis_core::entity::{Confidence, Content};
use noesis_core::models::{ResearchFinding, SourceKind};
use noesis_validation::rules::{content_length, source, temporal};
use proptest::prelude::*;

fn text_finding(text: String, days_old: i64) -> ResearchFinding {
    ResearchFinding {
        content: Content::Text(text),
        source: "web".into(),
        source_kind: SourceKind::Web,
        source_url: None,
        confidence: Confidence::new(0.8),
        metadata: Default::default(),
        timestamp: Utc::now() - Duration::days(days_old),
    }
}

proptest! {
    // ── Content length: scores stay in [0, 1] and never decrease with length ──

    #[test]
    fn content_length_score_in_unit_range(len in 0usize..500, min in 1usize..200) {
        let outcome = content_length::apply(&text_finding("x".repeat(len), 0), min);
        prop_assert!((0.0..=1.0).contains(&outcome.score));
    }

    #[test]
    fn content_length_is_monotonic(len in 0usize..400, extra in 0usize..100) {
        let short = content_length::apply(&text_finding("x".repeat(len), 0), 50);
        let long = content_length::apply(&text_finding("x".repeat(len + extra), 0), 50);
        prop_assert!(long.score >= short.score);
    }

    // ── Temporal relevance: older never scores higher ──

    #[test]
    fn temporal_score_is_antitonic_in_age(age in 0i64..800, extra in 0i64..100) {
        let now = Utc::now();
        let newer = temporal::apply(&text_finding("t".into(), age), 365, now);
        let older = temporal::apply(&text_finding("t".into(), age + extra), 365, now);
        prop_assert!(older.score <= newer.score + 1e-9);
    }

    // ── Source reliability: bounded, and metadata only helps ──

    #[test]
    fn source_score_in_half_to_one(days in 0i64..10) {
        let outcome = source::apply(&text_finding("s".into(), days));
        prop_assert!((0.5..=1.0).contains(&outcome.score));
    }
}
