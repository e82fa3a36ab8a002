use noesis_core::models::{ResearchFinding, SourceKind};

use super::RuleOutcome;

/// Heuristic source trust.
///
/// Base 0.5; academic sources +0.3, internal +0.2, web sources with a URL
/// +0.1; +0.1 each for author and publish-date metadata. Capped at 1.0.
pub fn apply(finding: &ResearchFinding) -> RuleOutcome {
    let mut score: f64 = 0.5;
    match finding.source_kind {
        SourceKind::Academic => score += 0.3,
        SourceKind::Internal => score += 0.2,
        SourceKind::Web => {
            if finding.source_url.is_some() {
                score += 0.1;
            }
        }
    }
    if finding.metadata.contains_key("authors") {
        score += 0.1;
    }
    if finding.metadata.contains_key("publish_date") {
        score += 0.1;
    }
    RuleOutcome::score(score.min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use noesis_core::entity::{Confidence, Content};

    fn finding(kind: SourceKind, url: Option<&str>) -> ResearchFinding {
        ResearchFinding {
            content: Content::Text("claim".into()),
            source: "s".into(),
            source_kind: kind,
            source_url: url.map(String::from),
            confidence: Confidence::new(0.8),
            metadata: Default::default(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn academic_beats_bare_web() {
        let academic = apply(&finding(SourceKind::Academic, None)).score;
        let web = apply(&finding(SourceKind::Web, None)).score;
        assert_eq!(academic, 0.8);
        assert_eq!(web, 0.5);
    }

    #[test]
    fn url_and_citation_metadata_raise_the_score() {
        let mut f = finding(SourceKind::Web, Some("https://example.org/a"));
        f.metadata.insert("authors".into(), serde_json::json!(["doe"]));
        f.metadata
            .insert("publish_date".into(), "2024-01-01T00:00:00Z".into());
        assert!((apply(&f).score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn score_is_capped_at_one() {
        let mut f = finding(SourceKind::Academic, None);
        f.metadata.insert("authors".into(), serde_json::json!([]));
        f.metadata
            .insert("publish_date".into(), "2024-01-01T00:00:00Z".into());
        assert_eq!(apply(&f).score, 1.0);
    }
}
