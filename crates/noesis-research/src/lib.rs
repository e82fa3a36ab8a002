//! # noesis-research
//!
//! The top of the stack: a continuous, gap-directed research loop.
//!
//! Each iteration runs Detect → Prioritize → Dispatch → Integrate →
//! Consolidate → Sleep. Gap research is bounded by a semaphore and
//! deduplicated by topic; researcher failures are isolated per source;
//! the loop itself never dies on a single bad iteration — but a circuit
//! breaker stops it from masking sustained failure.

pub mod consolidation;
pub mod coordinator;
pub mod gaps;
pub mod priority;
pub mod researchers;
pub mod state;

pub use coordinator::ResearchCoordinator;
pub use researchers::internal::InternalResearcher;
pub use researchers::{RateLimiter, ResearchCache};
pub use state::{InFlightTopics, IntegrationLedger};
