//! Re-orders results arriving from worker threads
//!
//! Results are released strictly in (year, day, part) order: each one waits in
//! a min-heap until every key before it in the expected list has been seen.

use crate::executor::SolverResult;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Ordering key for a result
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Heap entry ordered so the smallest key sits on top
struct Pending {
    key: ResultKey,
    result: SolverResult,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key.cmp(&self.key)
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Pending {}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

pub struct ResultAggregator {
    expected: BinaryHeap<Reverse<ResultKey>>,
    pending: BinaryHeap<Pending>,
}

impl ResultAggregator {
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// Buffer `result` and return whatever is now releasable, in order
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.push(Pending {
            key: ResultKey::from(&result),
            result,
        });

        let mut ready = Vec::new();
        loop {
            let next_matches = match (self.expected.peek(), self.pending.peek()) {
                (Some(Reverse(expected)), Some(top)) => top.key == *expected,
                _ => false,
            };
            if !next_matches {
                break;
            }
            self.expected.pop();
            if let Some(entry) = self.pending.pop() {
                ready.push(entry.result);
            }
        }
        ready
    }

    /// Everything still buffered, in key order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let mut rest: Vec<Pending> = self.pending.drain().collect();
        rest.sort_by_key(|p| p.key);
        rest.into_iter().map(|p| p.result).collect()
    }

    /// Whether every expected key has been released
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}
