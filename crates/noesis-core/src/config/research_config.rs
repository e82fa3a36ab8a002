use serde::{Deserialize, Serialize};

use super::defaults;

/// Research coordinator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// Gap research tasks dispatched per iteration.
    pub max_concurrent_tasks: usize,
    /// Confidence floor for findings handed to synthesis.
    pub min_confidence: f64,
    /// Wall-clock budget for a single gap's research.
    pub max_research_secs: u64,
    /// Findings requested from each researcher per gap.
    pub max_sources_per_gap: usize,
    /// Sleep between successful iterations.
    pub refresh_interval_secs: u64,
    /// Sleep after a failed iteration.
    pub backoff_secs: u64,
    /// Exponential decay constant for gap prioritization (seconds).
    /// The reference deployment decays over 24 hours.
    pub gap_decay_secs: f64,
    /// Consecutive iteration failures before the run loop gives up.
    pub circuit_breaker_threshold: u32,
    /// Capacity of the query log consumed by gap detection.
    pub query_log_capacity: usize,
    /// Topics whose coverage is probed by the coverage detector.
    pub tracked_topics: Vec<String>,
    /// Minimum hits a tracked topic must have to count as covered.
    pub coverage_min_results: usize,
    /// Age at which integrated knowledge counts as stale.
    pub staleness_max_age_days: i64,
    pub researcher: ResearcherConfig,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_tasks: defaults::DEFAULT_MAX_CONCURRENT_TASKS,
            min_confidence: defaults::DEFAULT_RESEARCH_MIN_CONFIDENCE,
            max_research_secs: defaults::DEFAULT_MAX_RESEARCH_SECS,
            max_sources_per_gap: defaults::DEFAULT_MAX_SOURCES_PER_GAP,
            refresh_interval_secs: defaults::DEFAULT_REFRESH_INTERVAL_SECS,
            backoff_secs: defaults::DEFAULT_BACKOFF_SECS,
            gap_decay_secs: defaults::DEFAULT_GAP_DECAY_SECS,
            circuit_breaker_threshold: defaults::DEFAULT_CIRCUIT_BREAKER_THRESHOLD,
            query_log_capacity: defaults::DEFAULT_QUERY_LOG_CAPACITY,
            tracked_topics: Vec::new(),
            coverage_min_results: defaults::DEFAULT_COVERAGE_MIN_RESULTS,
            staleness_max_age_days: defaults::DEFAULT_STALENESS_MAX_AGE_DAYS,
            researcher: ResearcherConfig::default(),
        }
    }
}

/// Per-researcher resource limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearcherConfig {
    /// Minimum wall-clock delay between two requests from one researcher.
    pub min_request_delay_ms: u64,
    /// Response cache TTL. 0 disables caching.
    pub cache_ttl_secs: u64,
    /// Concurrent downloads per researcher.
    pub max_concurrent_requests: usize,
}

impl Default for ResearcherConfig {
    fn default() -> Self {
        Self {
            min_request_delay_ms: defaults::DEFAULT_MIN_REQUEST_DELAY_MS,
            cache_ttl_secs: defaults::DEFAULT_RESEARCH_CACHE_TTL_SECS,
            max_concurrent_requests: defaults::DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}
