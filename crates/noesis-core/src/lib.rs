//! # noesis-core
//!
//! Foundation crate for the Noesis knowledge system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod entity;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::NoesisConfig;
pub use entity::{Confidence, Content, ContentType, KnowledgeEntity, Relation, RelationKind};
pub use errors::{NoesisError, NoesisResult};
