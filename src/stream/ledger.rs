// ABOUTME: Ledger of service event IDs that have already been processed.
// ABOUTME: Grows monotonically and only answers membership queries.

use crate::types::EventId;
use std::collections::HashSet;

/// Event IDs seen so far by a streamer.
///
/// Entries are never removed, and the set is deliberately not iterable.
#[derive(Debug, Default)]
pub struct EventLedger {
    seen: HashSet<EventId>,
}

impl EventLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an ID. Returns `false` if it was already present.
    pub fn insert(&mut self, id: EventId) -> bool {
        self.seen.insert(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
