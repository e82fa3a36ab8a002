//! Mutable state owned by the coordinator: the in-flight topic set and
//! the ledger of integrated knowledge. Injected at construction — never
//! process-wide.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashSet;

use noesis_core::entity::ContentType;

/// Topics with research currently in flight. At most one task per topic.
#[derive(Debug, Default)]
pub struct InFlightTopics {
    topics: DashSet<String>,
}

impl InFlightTopics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a topic. Returns a guard that releases the claim on drop —
    /// success or failure, the topic always leaves the set.
    /// `None` if the topic is already in flight.
    pub fn claim(&self, topic: &str) -> Option<ClaimGuard<'_>> {
        if self.topics.insert(topic.to_string()) {
            Some(ClaimGuard {
                topics: self,
                topic: topic.to_string(),
            })
        } else {
            None
        }
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.topics.contains(topic)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

/// Releases a claimed topic when dropped.
#[must_use = "dropping the guard releases the topic claim"]
pub struct ClaimGuard<'a> {
    topics: &'a InFlightTopics,
    topic: String,
}

impl Drop for ClaimGuard<'_> {
    fn drop(&mut self) {
        self.topics.topics.remove(&self.topic);
    }
}

/// One entity the coordinator integrated.
#[derive(Debug, Clone)]
pub struct IntegratedRecord {
    pub entity_id: String,
    pub topic: String,
    pub content_type: ContentType,
    pub integrated_at: DateTime<Utc>,
}

/// Bounded ledger of recently integrated knowledge. Feeds the
/// consistency and staleness gap detectors.
#[derive(Debug)]
pub struct IntegrationLedger {
    records: Mutex<VecDeque<IntegratedRecord>>,
    capacity: usize,
}

impl IntegrationLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn record(&self, entity_id: impl Into<String>, topic: impl Into<String>, content_type: ContentType) {
        let mut records = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(IntegratedRecord {
            entity_id: entity_id.into(),
            topic: topic.into(),
            content_type,
            integrated_at: Utc::now(),
        });
    }

    /// The most recent `n` records, oldest first.
    pub fn recent(&self, n: usize) -> Vec<IntegratedRecord> {
        let records = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.iter().rev().take(n).rev().cloned().collect()
    }

    /// Records older than `max_age_days` as of `now`.
    pub fn stale(&self, max_age_days: i64, now: DateTime<Utc>) -> Vec<IntegratedRecord> {
        let cutoff = now - Duration::days(max_age_days);
        let records = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        records
            .iter()
            .filter(|r| r.integrated_at < cutoff)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        match self.records.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
