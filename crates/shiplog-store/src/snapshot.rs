use serde::{Deserialize, Serialize};
use shiplog_types::{LogGroup, LogId};

/// Point-in-time copy of a store's full state.
///
/// Groups are listed in creation (handle) order. The counters are carried
/// so a restored store never reissues a handle or sequence number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub next_handle: LogId,
    pub next_seq: u64,
    pub groups: Vec<LogGroup>,
}

impl StoreSnapshot {
    /// Snapshot of a store that has never been written to.
    pub fn empty() -> Self {
        Self {
            next_handle: LogId::FIRST,
            next_seq: 1,
            groups: Vec::new(),
        }
    }

    /// Total entries across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(LogGroup::len).sum()
    }
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
