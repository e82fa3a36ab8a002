use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One executed search, as seen by gap detection.
#[derive(Debug, Clone)]
pub struct QueryRecord {
    pub text: String,
    pub result_count: usize,
    /// Best relevance score of the result set, if any.
    pub top_score: Option<f64>,
    pub at: DateTime<Utc>,
}

/// Bounded in-memory log of recent queries.
///
/// Owned by whoever wires the system together and shared between the
/// search engine (writer) and the research coordinator's query-pattern
/// gap detector (reader). Deliberately not a process-wide singleton.
#[derive(Debug)]
pub struct QueryLog {
    records: Mutex<VecDeque<QueryRecord>>,
    capacity: usize,
}

impl QueryLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Append a record, evicting the oldest when full.
    pub fn record(&self, text: impl Into<String>, result_count: usize, top_score: Option<f64>) {
        let mut records = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(QueryRecord {
            text: text.into(),
            result_count,
            top_score,
            at: Utc::now(),
        });
    }

    /// Snapshot of the most recent `n` records, oldest first.
    pub fn recent(&self, n: usize) -> Vec<QueryRecord> {
        let records = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.iter().rev().take(n).rev().cloned().collect()
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
