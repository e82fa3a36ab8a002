//! Per-iteration consolidation metrics, derived from integration
//! counters and validation statistics. Telemetry only — nothing
//! downstream branches on these numbers.

use chrono::Utc;

use noesis_core::models::{ConsolidationMetrics, ValidationResult};

/// Counters accumulated across one research iteration.
#[derive(Debug, Default, Clone)]
pub struct IterationStats {
    pub gaps_detected: usize,
    pub gaps_researched: usize,
    /// Gaps whose research produced at least one stored entity.
    pub gaps_integrated: usize,
    pub findings_total: usize,
    pub findings_valid: usize,
    pub entities_stored: usize,
    pub relation_failures: usize,
    validation_score_sum: f64,
    validation_score_count: usize,
    consistency_score_sum: f64,
    consistency_score_count: usize,
}

impl IterationStats {
    /// Fold one validation result into the running statistics.
    pub fn record_validation(&mut self, result: &ValidationResult) {
        if result.is_valid {
            self.findings_valid += 1;
        }
        self.validation_score_sum += result.overall_score;
        self.validation_score_count += 1;
        if let Some(score) = result.scores.get("internal_consistency") {
            self.consistency_score_sum += score;
            self.consistency_score_count += 1;
        }
    }
}

/// Render the counters into the metrics record. An idle iteration
/// (nothing researched) reads as lossless and fully accurate.
pub fn metrics(stats: &IterationStats, elapsed_secs: f64) -> ConsolidationMetrics {
    let mean_validation = if stats.validation_score_count > 0 {
        stats.validation_score_sum / stats.validation_score_count as f64
    } else {
        1.0
    };
    let accuracy = if stats.findings_total > 0 {
        stats.findings_valid as f64 / stats.findings_total as f64
    } else {
        1.0
    };
    let coverage_improvement = if stats.gaps_researched > 0 {
        stats.gaps_integrated as f64 / stats.gaps_researched as f64
    } else {
        0.0
    };
    let consistency_score = if stats.consistency_score_count > 0 {
        stats.consistency_score_sum / stats.consistency_score_count as f64
    } else {
        1.0
    };

    ConsolidationMetrics {
        loss: 1.0 - mean_validation,
        accuracy,
        coverage_improvement,
        consistency_score,
        training_time_secs: elapsed_secs,
        timestamp: Utc::now(),
    }
}
