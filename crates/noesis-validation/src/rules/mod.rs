//! Rule implementations. Dispatch is over the typed `RuleKind` — the
//! battery was resolved when it was built, so there is no string
//! matching here.

pub mod consistency;
pub mod content_length;
pub mod quality;
pub mod relevance;
pub mod source;
pub mod temporal;

use chrono::{DateTime, Utc};

use noesis_core::errors::NoesisResult;
use noesis_core::models::{ResearchFinding, RuleKind, ValidationRule};
use noesis_core::traits::{EmbeddingService, VectorIndex};

/// Nearest-neighbor sample size for the consistency/relevance rules.
pub const NEIGHBOR_LIMIT: usize = 5;

/// External context a rule may need. Groups the service handles so rule
/// signatures stay small.
pub struct RuleContext<'a> {
    pub embedder: &'a dyn EmbeddingService,
    pub vector: &'a dyn VectorIndex,
    pub now: DateTime<Utc>,
}

impl<'a> RuleContext<'a> {
    pub fn new(embedder: &'a dyn EmbeddingService, vector: &'a dyn VectorIndex) -> Self {
        Self {
            embedder,
            vector,
            now: Utc::now(),
        }
    }
}

/// What one rule produced for one finding.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    pub score: f64,
    pub feedback: Vec<String>,
}

impl RuleOutcome {
    pub fn score(score: f64) -> Self {
        Self {
            score,
            feedback: Vec::new(),
        }
    }

    pub fn with_feedback(score: f64, feedback: impl Into<String>) -> Self {
        Self {
            score,
            feedback: vec![feedback.into()],
        }
    }

    /// A hard failure: score 0.0 plus the reason.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::with_feedback(0.0, reason)
    }
}

/// Apply one rule to one finding.
pub async fn apply(
    rule: &ValidationRule,
    finding: &ResearchFinding,
    ctx: &RuleContext<'_>,
) -> NoesisResult<RuleOutcome> {
    match &rule.kind {
        RuleKind::ContentLength { min_length } => {
            Ok(content_length::apply(finding, *min_length))
        }
        RuleKind::ContentRelevance => relevance::apply(finding, ctx).await,
        RuleKind::SourceReliability => Ok(source::apply(finding)),
        RuleKind::TemporalRelevance { max_age_days } => {
            Ok(temporal::apply(finding, *max_age_days, ctx.now))
        }
        RuleKind::InternalConsistency => consistency::internal(finding, ctx).await,
        RuleKind::CrossModalConsistency => consistency::cross_modal(finding, ctx).await,
        RuleKind::LanguageQuality { language } => Ok(quality::language(finding, language)),
        RuleKind::MediaQuality => Ok(quality::media(finding)),
    }
}
