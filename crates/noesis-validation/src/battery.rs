//! The default rule battery, mirroring the reference deployment.

use noesis_core::config::ValidationConfig;
use noesis_core::entity::ContentType;
use noesis_core::models::{RuleKind, ValidationRule};

/// Minimum text length enforced by the default content-length rule.
pub const DEFAULT_MIN_CONTENT_LENGTH: usize = 50;

/// Maximum age accepted by the default temporal-relevance rule.
pub const DEFAULT_MAX_AGE_DAYS: i64 = 365;

/// Build the default battery. Priorities run 1 (highest) to 5 (lowest);
/// the confidence aggregate weighs rules by 1/priority.
pub fn default_battery(config: &ValidationConfig) -> Vec<ValidationRule> {
    use ContentType::{Audio, Image, Text};
    vec![
        // Content quality
        ValidationRule::new(
            RuleKind::ContentLength {
                min_length: DEFAULT_MIN_CONTENT_LENGTH,
            },
            1,
            &[Text],
            0.7,
        ),
        ValidationRule::new(RuleKind::ContentRelevance, 1, &[Text, Image, Audio], 0.8),
        // Source
        ValidationRule::new(RuleKind::SourceReliability, 2, &[Text, Image, Audio], 0.7),
        ValidationRule::new(
            RuleKind::TemporalRelevance {
                max_age_days: DEFAULT_MAX_AGE_DAYS,
            },
            2,
            &[Text, Image, Audio],
            0.7,
        ),
        // Consistency
        ValidationRule::new(RuleKind::InternalConsistency, 3, &[Text, Image, Audio], 0.8),
        ValidationRule::new(
            RuleKind::CrossModalConsistency,
            3,
            &[Text, Image, Audio],
            0.8,
        ),
        // Quality
        ValidationRule::new(
            RuleKind::LanguageQuality {
                language: config.language.clone(),
            },
            4,
            &[Text],
            0.7,
        ),
        ValidationRule::new(RuleKind::MediaQuality, 4, &[Image, Audio], 0.7),
    ]
}
