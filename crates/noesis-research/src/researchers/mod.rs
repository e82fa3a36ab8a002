//! Researcher support: rate limiting, response caching, and the
//! in-tree internal researcher. Web/academic researchers are external
//! implementations of the `Researcher` trait built on the same pieces.

pub mod cache;
pub mod internal;
pub mod rate_limit;

pub use cache::ResearchCache;
pub use rate_limit::RateLimiter;
