use serde::{Deserialize, Serialize};
use shiplog_types::LogId;

/// What a successful append did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendOutcome {
    /// The group the message landed in.
    pub handle: LogId,
    /// Sequence number assigned to the new entry.
    pub seq: u64,
    /// Entries evicted to keep the group within its bound.
    pub evicted: usize,
}

/// An entry in the cross-group timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub handle: LogId,
    pub seq: u64,
    pub message: String,
}
