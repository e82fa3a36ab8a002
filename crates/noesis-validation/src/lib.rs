//! # noesis-validation
//!
//! Scores raw research findings against an immutable battery of typed
//! validation rules.
//!
//! ## Contract
//! - Rules run concurrently per finding, each under its own timeout; a
//!   timed-out rule contributes 0.0 and feedback, never a failure.
//! - `overall_score` is the arithmetic mean of produced scores;
//!   `confidence` is the priority-weighted aggregate, so high-priority
//!   rules dominate it.
//! - Batches validate with full concurrency under a semaphore; there is
//!   no cross-finding ordering.

pub mod battery;
pub mod engine;
pub mod rules;

pub use battery::default_battery;
pub use engine::ValidationEngine;
