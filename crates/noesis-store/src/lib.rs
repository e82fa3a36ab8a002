//! # noesis-store
//!
//! The hybrid store: a single write/read surface over the similarity
//! index and the relationship graph, keeping the two from diverging.
//!
//! Write contract per entity: vector first, then graph. A failed graph
//! write triggers a compensating vector delete and surfaces as
//! `StoreError::Inconsistency`. Relation-edge writes after a successful
//! dual write are reported, not rolled back.

pub mod store;

pub use store::{FailedRelation, HybridSearchResult, HybridStore, WriteReport};
