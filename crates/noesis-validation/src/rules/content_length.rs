use noesis_core::models::ResearchFinding;

use super::RuleOutcome;

/// Fails text shorter than the minimum; otherwise scores linearly up to
/// twice the minimum: `min(1.0, length / (2 × min_length))`.
/// Non-text content is exempt.
pub fn apply(finding: &ResearchFinding, min_length: usize) -> RuleOutcome {
    let Some(text) = finding.content.as_text() else {
        return RuleOutcome::score(1.0);
    };
    let length = text.chars().count();
    if length < min_length {
        return RuleOutcome::failed(format!(
            "content length ({length}) below minimum ({min_length})"
        ));
    }
    RuleOutcome::score((length as f64 / (min_length as f64 * 2.0)).min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use noesis_core::entity::{Confidence, Content};
    use noesis_core::models::SourceKind;

    fn finding(text: &str) -> ResearchFinding {
        ResearchFinding {
            content: Content::Text(text.to_string()),
            source: "web".into(),
            source_kind: SourceKind::Web,
            source_url: None,
            confidence: Confidence::new(0.8),
            metadata: Default::default(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn short_text_fails() {
        let outcome = apply(&finding(&"x".repeat(30)), 50);
        assert_eq!(outcome.score, 0.0);
        assert!(!outcome.feedback.is_empty());
    }

    #[test]
    fn double_minimum_scores_full() {
        assert_eq!(apply(&finding(&"x".repeat(100)), 50).score, 1.0);
    }

    #[test]
    fn between_minimum_and_double_scores_linearly() {
        let outcome = apply(&finding(&"x".repeat(80)), 50);
        assert!((outcome.score - 0.8).abs() < 1e-9);
    }
}
