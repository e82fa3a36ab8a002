use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entity::ContentType;

use super::research::ResearchFinding;

/// The rule battery, typed. Each variant carries its own parameters, so
/// rules are resolved when the battery is built — there is no string
/// dispatch at validation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleKind {
    /// Fails short text outright, scores longer text up to 2× the minimum.
    ContentLength { min_length: usize },
    /// Similarity of the finding to the nearest stored knowledge.
    ContentRelevance,
    /// Heuristic source trust from source kind and citation metadata.
    SourceReliability,
    /// Age of the finding against a freshness horizon.
    TemporalRelevance { max_age_days: i64 },
    /// Agreement with nearest existing entities of any modality.
    InternalConsistency,
    /// Agreement of non-text content with nearby text knowledge.
    CrossModalConsistency,
    /// Surface quality checks on text.
    LanguageQuality { language: String },
    /// Dimension/duration sanity checks on media payloads.
    MediaQuality,
}

impl RuleKind {
    /// Stable rule name used in score maps and feedback.
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::ContentLength { .. } => "content_length",
            RuleKind::ContentRelevance => "content_relevance",
            RuleKind::SourceReliability => "source_reliability",
            RuleKind::TemporalRelevance { .. } => "temporal_relevance",
            RuleKind::InternalConsistency => "internal_consistency",
            RuleKind::CrossModalConsistency => "cross_modal_consistency",
            RuleKind::LanguageQuality { .. } => "language_quality",
            RuleKind::MediaQuality => "media_quality",
        }
    }
}

/// Immutable configuration for one validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    pub kind: RuleKind,
    /// 1 (highest) to 5 (lowest). Drives the confidence weighting.
    pub priority: u8,
    /// Content types this rule applies to.
    pub content_types: Vec<ContentType>,
    /// Per-rule score floor; scores below it produce feedback.
    pub threshold: f64,
}

impl ValidationRule {
    pub fn new(kind: RuleKind, priority: u8, content_types: &[ContentType], threshold: f64) -> Self {
        Self {
            kind,
            priority: priority.clamp(1, 5),
            content_types: content_types.to_vec(),
            threshold,
        }
    }

    /// Whether this rule applies to a given content type.
    pub fn applies_to(&self, content_type: ContentType) -> bool {
        self.content_types.contains(&content_type)
    }

    /// Confidence weight — higher priority (lower number) weighs more.
    pub fn weight(&self) -> f64 {
        1.0 / f64::from(self.priority)
    }
}

/// The outcome of running the battery against one finding.
/// Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub finding: ResearchFinding,
    /// Names of the rules that were applied.
    pub rules_applied: Vec<String>,
    /// Per-rule scores, including 0.0 for timed-out rules.
    pub scores: HashMap<String, f64>,
    /// Arithmetic mean of all produced scores.
    pub overall_score: f64,
    /// `overall_score >= min_overall_score`.
    pub is_valid: bool,
    /// Priority-weighted aggregate — high-priority rules dominate.
    pub confidence: f64,
    pub feedback: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_is_clamped() {
        let rule = ValidationRule::new(RuleKind::ContentRelevance, 9, &[ContentType::Text], 0.5);
        assert_eq!(rule.priority, 5);
    }

    #[test]
    fn weight_favors_high_priority() {
        let p1 = ValidationRule::new(RuleKind::ContentRelevance, 1, &[ContentType::Text], 0.5);
        let p4 = ValidationRule::new(RuleKind::MediaQuality, 4, &[ContentType::Image], 0.5);
        assert!(p1.weight() > p4.weight());
        assert_eq!(p4.weight(), 0.25);
    }
}
