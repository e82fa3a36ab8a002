use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use noesis_core::config::ValidationConfig;
use noesis_core::errors::{NoesisResult, ValidationError};
use noesis_core::models::{ResearchFinding, ValidationResult, ValidationRule};
use noesis_core::traits::{EmbeddingService, VectorIndex};

use crate::battery;
use crate::rules::{self, RuleContext, RuleOutcome};

/// The validation engine.
///
/// Holds an immutable rule battery and the service handles the
/// consistency rules need. No persistent state beyond configuration.
pub struct ValidationEngine {
    rules: Vec<ValidationRule>,
    config: ValidationConfig,
    embedder: Arc<dyn EmbeddingService>,
    vector: Arc<dyn VectorIndex>,
    semaphore: Arc<Semaphore>,
}

impl ValidationEngine {
    /// Create an engine with the default battery.
    pub fn new(
        config: ValidationConfig,
        embedder: Arc<dyn EmbeddingService>,
        vector: Arc<dyn VectorIndex>,
    ) -> Self {
        let rules = battery::default_battery(&config);
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_validations.max(1)));
        Self {
            rules,
            config,
            embedder,
            vector,
            semaphore,
        }
    }

    /// Replace the battery with a custom one.
    pub fn with_rules(mut self, rules: Vec<ValidationRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a batch with full concurrency, bounded by the engine's
    /// semaphore. Per-finding failures are logged and excluded; there is
    /// no cross-finding ordering guarantee.
    pub async fn validate_batch(&self, findings: &[ResearchFinding]) -> Vec<ValidationResult> {
        let results = join_all(findings.iter().map(|finding| async move {
            let _permit = match self.semaphore.acquire().await {
                Ok(permit) => permit,
                Err(_) => return None,
            };
            match self.validate(finding).await {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!(source = %finding.source, error = %e, "finding validation failed; excluded");
                    None
                }
            }
        }))
        .await;
        results.into_iter().flatten().collect()
    }

    /// Validate one finding against every applicable rule.
    ///
    /// Rules run concurrently, each under the configured timeout. A
    /// timed-out or erroring rule contributes 0.0 and feedback — it never
    /// fails the validation. A battery with no rule for the finding's
    /// content type is a configuration error.
    pub async fn validate(&self, finding: &ResearchFinding) -> NoesisResult<ValidationResult> {
        if self.rules.is_empty() {
            return Err(ValidationError::EmptyBattery.into());
        }
        let applicable: Vec<&ValidationRule> = self
            .rules
            .iter()
            .filter(|rule| rule.applies_to(finding.content_type()))
            .collect();
        if applicable.is_empty() {
            return Err(ValidationError::UnsupportedContentType {
                content_type: finding.content_type(),
            }
            .into());
        }

        let ctx = RuleContext::new(self.embedder.as_ref(), self.vector.as_ref());
        let rule_timeout = Duration::from_secs(self.config.rule_timeout_secs);

        let outcomes = join_all(applicable.iter().map(|&rule| {
            let ctx = &ctx;
            async move {
                let name = rule.kind.name();
                match tokio::time::timeout(rule_timeout, rules::apply(rule, finding, ctx)).await {
                    Ok(Ok(outcome)) => outcome,
                    Ok(Err(e)) => {
                        warn!(rule = name, error = %e, "rule application failed");
                        RuleOutcome::failed(format!("error in {name}: {e}"))
                    }
                    Err(_) => {
                        warn!(rule = name, "rule timed out");
                        RuleOutcome::failed(format!("timeout applying rule {name}"))
                    }
                }
            }
        }))
        .await;

        let mut scores = HashMap::new();
        let mut feedback = Vec::new();
        let mut rules_applied = Vec::new();
        for (rule, outcome) in applicable.iter().zip(outcomes) {
            let name = rule.kind.name().to_string();
            if outcome.score < rule.threshold {
                feedback.push(format!(
                    "{name} score {:.2} below threshold {:.2}",
                    outcome.score, rule.threshold
                ));
            }
            feedback.extend(outcome.feedback);
            scores.insert(name.clone(), outcome.score);
            rules_applied.push(name);
        }

        let overall_score = scores.values().sum::<f64>() / scores.len() as f64;
        let confidence = weighted_confidence(&applicable, &scores);
        let is_valid = overall_score >= self.config.min_overall_score;

        debug!(
            source = %finding.source,
            overall_score,
            confidence,
            is_valid,
            "finding validated"
        );
        Ok(ValidationResult {
            finding: finding.clone(),
            rules_applied,
            scores,
            overall_score,
            is_valid,
            confidence,
            feedback,
            timestamp: Utc::now(),
        })
    }
}

/// Priority-weighted confidence: each rule contributes
/// `score × (1/priority)`, normalized by the weights actually applied.
/// High-priority (low-number) rules dominate even when the plain mean
/// would not reflect that.
fn weighted_confidence(rules: &[&ValidationRule], scores: &HashMap<String, f64>) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for rule in rules {
        if let Some(score) = scores.get(rule.kind.name()) {
            let weight = rule.weight();
            weighted_sum += score * weight;
            total_weight += weight;
        }
    }
    if total_weight == 0.0 {
        return 0.0;
    }
    weighted_sum / total_weight
}
