//! # noesis-synthesis
//!
//! Consumes validation results and produces persistable entities and
//! relations. Findings are grouped by content type; groups synthesize
//! concurrently under a semaphore. A batch with no valid findings yields
//! a typed empty result, never an error.

pub mod engine;
pub mod relations;

pub use engine::SynthesisEngine;
