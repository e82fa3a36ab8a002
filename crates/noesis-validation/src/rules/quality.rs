use noesis_core::entity::ContentType;
use noesis_core::models::ResearchFinding;

use super::RuleOutcome;

/// Surface quality checks on text: word count, sentence structure, and
/// language match. Non-text content is exempt.
pub fn language(finding: &ResearchFinding, expected_language: &str) -> RuleOutcome {
    let Some(text) = finding.content.as_text() else {
        return RuleOutcome::score(1.0);
    };
    if text.split_whitespace().count() < 3 {
        return RuleOutcome::failed("text too short");
    }

    let mut score: f64 = 0.5;
    let mut feedback = Vec::new();

    let sentences = text.split('.').filter(|s| !s.trim().is_empty()).count();
    if sentences < 2 {
        score -= 0.1;
        feedback.push("single sentence".to_string());
    }
    if finding.metadata.get("language").and_then(|v| v.as_str()) == Some(expected_language) {
        score += 0.2;
    }

    RuleOutcome {
        score: score.max(0.0),
        feedback,
    }
}

/// Dimension/duration sanity checks on media payloads. Text is exempt.
pub fn media(finding: &ResearchFinding) -> RuleOutcome {
    let Some(payload) = finding.content.as_media() else {
        return RuleOutcome::score(1.0);
    };

    let mut score: f64 = 0.5;
    let mut feedback = Vec::new();

    match finding.content_type() {
        ContentType::Image => {
            if let (Some(width), Some(height)) = (payload.width, payload.height) {
                if width < 100 || height < 100 {
                    score -= 0.2;
                    feedback.push("image too small".to_string());
                } else if width > 4000 || height > 4000 {
                    score -= 0.1;
                    feedback.push("image too large".to_string());
                }
            }
        }
        ContentType::Audio => {
            if let Some(duration) = payload.duration_secs {
                if duration < 1.0 {
                    score -= 0.2;
                    feedback.push("audio too short".to_string());
                } else if duration > 300.0 {
                    score -= 0.1;
                    feedback.push("audio too long".to_string());
                }
            }
        }
        _ => {}
    }

    RuleOutcome {
        score: score.max(0.0),
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use noesis_core::entity::{Confidence, Content, MediaPayload};
    use noesis_core::models::SourceKind;

    fn media_finding(content: Content) -> ResearchFinding {
        ResearchFinding {
            content,
            source: "web".into(),
            source_kind: SourceKind::Web,
            source_url: None,
            confidence: Confidence::new(0.8),
            metadata: Default::default(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn tiny_image_is_penalized() {
        let finding = media_finding(Content::Image(MediaPayload {
            width: Some(32),
            height: Some(32),
            ..Default::default()
        }));
        let outcome = media(&finding);
        assert!((outcome.score - 0.3).abs() < 1e-9);
        assert_eq!(outcome.feedback, vec!["image too small"]);
    }

    #[test]
    fn reasonable_audio_keeps_base_score() {
        let finding = media_finding(Content::Audio(MediaPayload {
            duration_secs: Some(45.0),
            ..Default::default()
        }));
        assert!((media(&finding).score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn short_text_fails_language_quality() {
        let finding = media_finding(Content::Text("two words".into()));
        assert_eq!(language(&finding, "en").score, 0.0);
    }

    #[test]
    fn language_match_raises_score() {
        let mut finding = media_finding(Content::Text(
            "This is a sentence. And here is another one.".into(),
        ));
        finding.metadata.insert("language".into(), "en".into());
        assert!((language(&finding, "en").score - 0.7).abs() < 1e-9);
    }
}
