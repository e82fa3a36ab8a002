use serde::{Deserialize, Serialize};

use super::defaults;

/// Search engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result limit when the query does not specify one.
    pub default_limit: usize,
    /// Hard cap on any requested limit.
    pub max_limit: usize,
    /// Result cache TTL. 0 disables caching.
    pub cache_ttl_secs: u64,
    /// Score reduction per hop for path-connected related entities.
    pub path_penalty: f64,
    /// Graph traversal depth when the query does not specify one.
    pub default_relation_depth: usize,
    /// Cap on entities pulled from the graph leg.
    pub related_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: defaults::DEFAULT_SEARCH_LIMIT,
            max_limit: defaults::DEFAULT_MAX_SEARCH_LIMIT,
            cache_ttl_secs: defaults::DEFAULT_SEARCH_CACHE_TTL_SECS,
            path_penalty: defaults::DEFAULT_PATH_PENALTY,
            default_relation_depth: defaults::DEFAULT_RELATION_DEPTH,
            related_limit: defaults::DEFAULT_RELATED_LIMIT,
        }
    }
}
