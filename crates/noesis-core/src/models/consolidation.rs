use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Telemetry emitted by the consolidation step of each research iteration.
/// Informational only — nothing downstream branches on these numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationMetrics {
    /// 1 − mean validation score of the iteration's findings.
    pub loss: f64,
    /// Fraction of findings that passed validation.
    pub accuracy: f64,
    /// Fraction of researched gaps that produced stored knowledge.
    pub coverage_improvement: f64,
    /// Mean internal-consistency score observed during validation.
    pub consistency_score: f64,
    /// Wall-clock seconds the iteration spent.
    pub training_time_secs: f64,
    pub timestamp: DateTime<Utc>,
}
