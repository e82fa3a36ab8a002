use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use noesis_core::models::{ResearchQuery, ResearchResult};

/// TTL-based response cache for researchers, keyed by a deterministic
/// hash of the normalized query. Stale entries expire lazily.
///
/// The check-then-store around this cache is deliberately unlocked:
/// two concurrent misses may both research and both insert, which is
/// idempotent and cheaper than a lock.
pub struct ResearchCache {
    cache: Option<Cache<String, Arc<ResearchResult>>>,
}

impl ResearchCache {
    /// `ttl_secs = 0` disables caching entirely.
    pub fn new(ttl_secs: u64) -> Self {
        let cache = (ttl_secs > 0).then(|| {
            Cache::builder()
                .time_to_live(Duration::from_secs(ttl_secs))
                .build()
        });
        Self { cache }
    }

    /// Deterministic cache key: blake3 over the normalized query text,
    /// modalities, and result limit.
    pub fn key(query: &ResearchQuery) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(query.text.trim().to_lowercase().as_bytes());
        for modality in &query.modalities {
            hasher.update(format!("{modality:?}").as_bytes());
        }
        hasher.update(&query.max_results.to_le_bytes());
        hasher.finalize().to_hex().to_string()
    }

    pub fn get(&self, query: &ResearchQuery) -> Option<ResearchResult> {
        self.cache
            .as_ref()
            .and_then(|c| c.get(&Self::key(query)))
            .map(|cached| (*cached).clone())
    }

    pub fn put(&self, query: &ResearchQuery, result: &ResearchResult) {
        if let Some(cache) = &self.cache {
            cache.insert(Self::key(query), Arc::new(result.clone()));
        }
    }
}
