//! Named defaults for every config field. Values mirror the reference
//! deployment; deployments override them via TOML.

// Embedding
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 512;
pub const DEFAULT_EMBEDDING_MODEL: &str = "default";

// Search
pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const DEFAULT_MAX_SEARCH_LIMIT: usize = 100;
pub const DEFAULT_SEARCH_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_PATH_PENALTY: f64 = 0.1;
pub const DEFAULT_RELATION_DEPTH: usize = 2;
pub const DEFAULT_RELATED_LIMIT: usize = 50;

// Validation
pub const DEFAULT_MIN_OVERALL_SCORE: f64 = 0.7;
pub const DEFAULT_VALIDATION_MIN_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_MAX_CONCURRENT_VALIDATIONS: usize = 10;
pub const DEFAULT_RULE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RULE_LANGUAGE: &str = "en";

// Synthesis
pub const DEFAULT_SYNTHESIS_MIN_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_MAX_CONCURRENT_GROUPS: usize = 5;
pub const DEFAULT_CANDIDATE_BATCH_SIZE: usize = 100;

// Research
pub const DEFAULT_MAX_CONCURRENT_TASKS: usize = 5;
pub const DEFAULT_RESEARCH_MIN_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_MAX_RESEARCH_SECS: u64 = 3600;
pub const DEFAULT_MAX_SOURCES_PER_GAP: usize = 10;
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_BACKOFF_SECS: u64 = 60;
pub const DEFAULT_GAP_DECAY_SECS: f64 = 86_400.0;
pub const DEFAULT_CIRCUIT_BREAKER_THRESHOLD: u32 = 5;
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 256;
pub const DEFAULT_COVERAGE_MIN_RESULTS: usize = 3;
pub const DEFAULT_STALENESS_MAX_AGE_DAYS: i64 = 365;

// Researchers
pub const DEFAULT_MIN_REQUEST_DELAY_MS: u64 = 1000;
pub const DEFAULT_RESEARCH_CACHE_TTL_SECS: u64 = 86_400;
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 3;
