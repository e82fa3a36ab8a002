use chrono::{DateTime, Utc};

use noesis_core::models::ResearchFinding;

use super::RuleOutcome;

/// Scores freshness against a maximum age. The publish date from the
/// finding's metadata wins over the finding timestamp when present and
/// parseable.
pub fn apply(finding: &ResearchFinding, max_age_days: i64, now: DateTime<Utc>) -> RuleOutcome {
    let published = finding
        .metadata
        .get("publish_date")
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(finding.timestamp);

    let age_days = (now - published).num_days();
    if age_days > max_age_days {
        return RuleOutcome::failed(format!("content too old: {age_days} days"));
    }
    RuleOutcome::score((1.0 - age_days as f64 / max_age_days as f64).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use noesis_core::entity::{Confidence, Content};
    use noesis_core::models::SourceKind;

    fn finding_aged(days: i64) -> ResearchFinding {
        ResearchFinding {
            content: Content::Text("some dated fact".into()),
            source: "web".into(),
            source_kind: SourceKind::Web,
            source_url: None,
            confidence: Confidence::new(0.8),
            metadata: Default::default(),
            timestamp: Utc::now() - Duration::days(days),
        }
    }

    #[test]
    fn over_age_limit_fails_with_feedback() {
        let outcome = apply(&finding_aged(400), 365, Utc::now());
        assert_eq!(outcome.score, 0.0);
        assert!(outcome.feedback[0].contains("too old"));
    }

    #[test]
    fn hundred_days_of_a_year_scores_point_seven_three() {
        let outcome = apply(&finding_aged(100), 365, Utc::now());
        assert!((outcome.score - (1.0 - 100.0 / 365.0)).abs() < 0.01);
    }

    #[test]
    fn metadata_publish_date_wins_over_timestamp() {
        let mut finding = finding_aged(0);
        let published = (Utc::now() - Duration::days(200)).to_rfc3339();
        finding
            .metadata
            .insert("publish_date".into(), published.into());
        let outcome = apply(&finding, 365, Utc::now());
        assert!((outcome.score - (1.0 - 200.0 / 365.0)).abs() < 0.01);
    }
}
