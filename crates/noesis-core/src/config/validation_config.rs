use serde::{Deserialize, Serialize};

use super::defaults;

/// Validation engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum mean rule score for a finding to be valid.
    pub min_overall_score: f64,
    /// Confidence floor applied downstream by synthesis.
    pub min_confidence: f64,
    /// Concurrent finding validations in a batch.
    pub max_concurrent_validations: usize,
    /// Per-rule timeout. A timed-out rule scores 0.0 and never fails
    /// the finding.
    pub rule_timeout_secs: u64,
    /// Expected language for the language-quality rule.
    pub language: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_overall_score: defaults::DEFAULT_MIN_OVERALL_SCORE,
            min_confidence: defaults::DEFAULT_VALIDATION_MIN_CONFIDENCE,
            max_concurrent_validations: defaults::DEFAULT_MAX_CONCURRENT_VALIDATIONS,
            rule_timeout_secs: defaults::DEFAULT_RULE_TIMEOUT_SECS,
            language: defaults::DEFAULT_RULE_LANGUAGE.to_string(),
        }
    }
}
