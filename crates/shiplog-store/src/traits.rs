use std::collections::BTreeSet;

use shiplog_types::{CreateOptions, LogGroup, LogId, LogKey};

use crate::error::StoreResult;
use crate::snapshot::StoreSnapshot;
use crate::types::{AppendOutcome, TimelineEntry};

/// Storage backend for ship log groups.
///
/// All implementations must satisfy these invariants:
/// - A bounded group never holds more than `max_len` entries once an append
///   returns; the oldest entries are evicted first.
/// - Appends by id resolve to the most recently created group with that id
///   (or the most recently created unnamed group for the empty id).
/// - Creation without overwrite never deletes anything.
/// - A failed operation leaves the store unchanged.
pub trait LogStore: Send + Sync {
    /// Create a new, empty group and return its handle.
    ///
    /// With `options.overwrite`, every existing group whose addressable key
    /// equals `key` is deleted first, entries included.
    fn create_log(&self, key: LogKey, options: CreateOptions) -> StoreResult<LogId>;

    /// Append a message to the group `id` resolves to.
    ///
    /// Returns `StoreError::LogNotFound` if no group resolves.
    fn append(&self, id: &str, message: &str) -> StoreResult<AppendOutcome>;

    /// Append a message to a specific group.
    fn append_to(&self, handle: LogId, message: &str) -> StoreResult<AppendOutcome>;

    /// Read a group by handle. Returns `Ok(None)` if it does not exist.
    fn group(&self, handle: LogId) -> StoreResult<Option<LogGroup>>;

    /// The handle an append with `id` would target.
    fn resolve(&self, id: &str) -> StoreResult<Option<LogId>>;

    /// All groups in creation order.
    fn groups(&self) -> StoreResult<Vec<LogGroup>>;

    /// Delete a group. Returns `true` if it existed.
    fn delete_group(&self, handle: LogId) -> StoreResult<bool>;

    /// Delete every group of the given type. Returns the number removed.
    fn delete_type(&self, log_type: &str) -> StoreResult<usize>;

    /// Remove every group. Handle and sequence counters keep advancing.
    fn clear(&self) -> StoreResult<()>;

    /// Copy out the full store state.
    fn snapshot(&self) -> StoreResult<StoreSnapshot>;

    /// Replace the full store state. Invalid snapshots are rejected and the
    /// current state is kept.
    fn restore(&self, snapshot: StoreSnapshot) -> StoreResult<()>;

    /// Groups of one type, in creation order.
    fn groups_of_type(&self, log_type: &str) -> StoreResult<Vec<LogGroup>> {
        Ok(self
            .groups()?
            .into_iter()
            .filter(|g| g.log_type == log_type)
            .collect())
    }

    /// Distinct group types, sorted.
    fn types(&self) -> StoreResult<Vec<String>> {
        let types: BTreeSet<String> = self.groups()?.into_iter().map(|g| g.log_type).collect();
        Ok(types.into_iter().collect())
    }

    /// The `limit` most recent entries across all groups, oldest first.
    /// A `limit` of zero returns everything.
    fn timeline(&self, limit: usize) -> StoreResult<Vec<TimelineEntry>> {
        let mut all: Vec<TimelineEntry> = self
            .groups()?
            .into_iter()
            .flat_map(|g| {
                let handle = g.handle;
                g.entries.into_iter().map(move |e| TimelineEntry {
                    handle,
                    seq: e.seq,
                    message: e.message,
                })
            })
            .collect();
        all.sort_by_key(|e| e.seq);
        if limit > 0 && all.len() > limit {
            all.drain(..all.len() - limit);
        }
        Ok(all)
    }

    /// Whether a group with this handle exists.
    fn contains(&self, handle: LogId) -> StoreResult<bool> {
        Ok(self.group(handle)?.is_some())
    }

    /// Total entries across all groups.
    fn entry_count(&self) -> StoreResult<usize> {
        Ok(self.groups()?.iter().map(LogGroup::len).sum())
    }
}
