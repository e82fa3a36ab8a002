//! Gap detectors. Each returns zero or more gaps; the coordinator
//! concatenates them. Detectors read only state the coordinator owns
//! (query log, integration ledger, tracked topics) plus the store.

pub mod consistency;
pub mod coverage;
pub mod query_patterns;
pub mod staleness;

/// How many log/ledger entries each detector samples per iteration.
pub const DETECTOR_SAMPLE: usize = 100;
