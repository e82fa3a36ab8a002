use async_trait::async_trait;

use crate::errors::NoesisResult;
use crate::models::{ResearchQuery, ResearchResult, SourceKind};

/// A pluggable research source.
///
/// Implementations are scoped resources: `open` before first use,
/// `close` when done. They are expected to rate-limit their own outbound
/// requests and to cache responses keyed by a deterministic query hash
/// with TTL-based staleness — `noesis-research` ships `RateLimiter` and
/// `ResearchCache` for exactly that.
#[async_trait]
pub trait Researcher: Send + Sync {
    /// Stable source name, used in findings and logs.
    fn name(&self) -> &str;

    fn source_kind(&self) -> SourceKind;

    /// Acquire underlying resources (sessions, handles).
    async fn open(&self) -> NoesisResult<()>;

    /// Release underlying resources.
    async fn close(&self) -> NoesisResult<()>;

    /// Run one research query to completion.
    async fn research(&self, query: &ResearchQuery) -> NoesisResult<ResearchResult>;
}
