//! Gap prioritization: importance × detection confidence × freshness.

use chrono::{DateTime, Utc};

use noesis_core::models::KnowledgeGap;

/// Priority score for one gap:
/// `importance × detection_confidence × exp(−age_secs / decay_secs)`.
/// Fresh gaps win; the decay constant defaults to 24 hours.
pub fn score(gap: &KnowledgeGap, now: DateTime<Utc>, decay_secs: f64) -> f64 {
    let age_secs = (now - gap.detected_at).num_milliseconds() as f64 / 1000.0;
    let freshness = (-age_secs.max(0.0) / decay_secs).exp();
    gap.importance * gap.detection_confidence * freshness
}

/// Sort gaps by descending priority.
pub fn prioritize(mut gaps: Vec<KnowledgeGap>, now: DateTime<Utc>, decay_secs: f64) -> Vec<KnowledgeGap> {
    gaps.sort_by(|a, b| {
        score(b, now, decay_secs).total_cmp(&score(a, now, decay_secs))
    });
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use noesis_core::models::DetectionMethod;

    fn gap(topic: &str, importance: f64, confidence: f64, age_hours: i64) -> KnowledgeGap {
        let mut g = KnowledgeGap::new(topic, "", importance, DetectionMethod::Coverage, confidence);
        g.detected_at = Utc::now() - Duration::hours(age_hours);
        g
    }

    #[test]
    fn day_old_gap_decays_to_e_inverse() {
        let g = gap("old", 1.0, 1.0, 24);
        let s = score(&g, Utc::now(), 86_400.0);
        assert!((s - (-1.0f64).exp()).abs() < 0.01);
    }

    #[test]
    fn fresh_low_importance_can_beat_stale_high_importance() {
        let fresh = gap("fresh", 0.5, 0.9, 0);
        let stale = gap("stale", 0.9, 0.9, 72);
        let ranked = prioritize(vec![stale, fresh], Utc::now(), 86_400.0);
        assert_eq!(ranked[0].topic, "fresh");
    }

    #[test]
    fn equal_ages_rank_by_importance_times_confidence() {
        let a = gap("a", 0.9, 0.5, 1);
        let b = gap("b", 0.6, 0.9, 1);
        let ranked = prioritize(vec![a, b], Utc::now(), 86_400.0);
        assert_eq!(ranked[0].topic, "b"); // 0.54 > 0.45
    }
}
