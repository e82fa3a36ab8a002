/// Errors from the research coordinator.
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    /// A single gap's research task failed. Isolated — excluded from the
    /// iteration's results, never escapes into the loop.
    #[error("research task for topic '{topic}' failed: {reason}")]
    TaskFailed { topic: String, reason: String },

    #[error("research task for topic '{topic}' timed out after {secs}s")]
    TaskTimeout { topic: String, secs: u64 },

    /// The run loop saw too many consecutive iteration failures and
    /// refuses to continue masking them.
    #[error("circuit breaker open after {failures} consecutive failures")]
    CircuitBreakerOpen { failures: u32 },
}
