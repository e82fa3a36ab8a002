pub mod consolidation;
pub mod gap;
pub mod query_log;
pub mod research;
pub mod search;
pub mod synthesis;
pub mod validation;

pub use consolidation::ConsolidationMetrics;
pub use gap::{DetectionMethod, KnowledgeGap};
pub use query_log::{QueryLog, QueryRecord};
pub use research::{ResearchFinding, ResearchQuery, ResearchResult, SourceKind};
pub use search::{SearchFilter, SimilarityHit};
pub use synthesis::SynthesisResult;
pub use validation::{RuleKind, ValidationResult, ValidationRule};
