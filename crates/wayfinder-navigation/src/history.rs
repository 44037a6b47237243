//! Back/forward history
//!
//! One instance per pane. Holds at least one entry at all times; the current
//! index always points at an existing entry.

use serde::{Deserialize, Serialize};

use crate::error::NavigationError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub address: String,
}

impl HistoryEntry {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HistorySnapshot", into = "HistorySnapshot")]
pub struct NavigationHistory {
    entries: Vec<HistoryEntry>,
    current: usize,
    limit: usize,
}

/// Serialized form, validated on the way back in.
#[derive(Serialize, Deserialize)]
struct HistorySnapshot {
    entries: Vec<HistoryEntry>,
    current: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    NavigationHistory::DEFAULT_LIMIT
}

impl NavigationHistory {
    pub const DEFAULT_LIMIT: usize = 200;

    /// Start a history at `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_limit(initial, Self::DEFAULT_LIMIT)
    }

    /// Start a history that keeps at most `limit` entries, dropping the oldest.
    pub fn with_limit(initial: impl Into<String>, limit: usize) -> Self {
        Self {
            entries: vec![HistoryEntry::new(initial)],
            current: 0,
            limit: limit.max(1),
        }
    }

    /// Rebuild a history from stored parts.
    pub fn from_parts(entries: Vec<HistoryEntry>, current: usize, limit: usize) -> Result<Self> {
        if entries.is_empty() {
            return Err(NavigationError::EmptyHistory);
        }
        if current >= entries.len() {
            return Err(NavigationError::IndexOutOfRange {
                index: current,
                len: entries.len(),
            });
        }

        let mut history = Self {
            entries,
            current,
            limit: limit.max(1),
        };
        history.enforce_limit();
        Ok(history)
    }

    /// Record a navigation to `address`.
    ///
    /// Re-navigating to the current entry is a no-op. Pushing from the middle
    /// of the history discards the forward branch first. Returns whether an
    /// entry was appended.
    pub fn push(&mut self, address: impl Into<String>) -> bool {
        let address = address.into();
        if self.current().address == address {
            return false;
        }

        if self.current + 1 < self.entries.len() {
            let dropped = self.entries.len() - self.current - 1;
            self.entries.truncate(self.current + 1);
            tracing::debug!(dropped, "Discarded forward history");
        }

        self.entries.push(HistoryEntry::new(address));
        self.current = self.entries.len() - 1;
        self.enforce_limit();
        true
    }

    /// Step back one entry and return its address.
    ///
    /// This only moves the index; the caller resolves and applies the address.
    pub fn back(&mut self) -> Option<String> {
        if !self.can_back() {
            return None;
        }
        self.current -= 1;
        Some(self.current().address.clone())
    }

    /// Step forward one entry and return its address.
    pub fn forward(&mut self) -> Option<String> {
        if !self.can_forward() {
            return None;
        }
        self.current += 1;
        Some(self.current().address.clone())
    }

    pub fn can_back(&self) -> bool {
        self.current > 0
    }

    pub fn can_forward(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a history is never empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the limit, trimming entries around the current one if needed.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.enforce_limit();
    }

    /// Entries behind the current one, nearest first (for a back drop-down).
    pub fn back_entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries[..self.current].iter().rev()
    }

    /// Entries ahead of the current one, nearest first.
    pub fn forward_entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries[self.current + 1..].iter()
    }

    fn enforce_limit(&mut self) {
        if self.entries.len() <= self.limit {
            return;
        }
        // Drop from the front, never past the current entry; then the far end.
        let overflow = self.entries.len() - self.limit;
        let dropped = overflow.min(self.current);
        self.entries.drain(0..dropped);
        self.current -= dropped;
        self.entries.truncate(self.limit);
    }
}

impl TryFrom<HistorySnapshot> for NavigationHistory {
    type Error = NavigationError;

    fn try_from(snapshot: HistorySnapshot) -> Result<Self> {
        Self::from_parts(snapshot.entries, snapshot.current, snapshot.limit)
    }
}

impl From<NavigationHistory> for HistorySnapshot {
    fn from(history: NavigationHistory) -> Self {
        Self {
            entries: history.entries,
            current: history.current,
            limit: history.limit,
        }
    }
}
