use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::handle::LogId;
use crate::options::normalize_id;

/// A single message in a log group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Store-wide append sequence number (strictly increasing).
    pub seq: u64,
    /// The logged text.
    pub message: String,
}

impl LogEntry {
    pub fn new(seq: u64, message: impl Into<String>) -> Self {
        Self {
            seq,
            message: message.into(),
        }
    }
}

/// The `(id, name, type)` identity triple of a log group.
///
/// Only keys with a non-empty id are addressable: two unnamed keys never
/// match each other, even when name and type agree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogKey {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub log_type: String,
}

impl LogKey {
    /// Build a key, treating an empty `id` as unnamed.
    pub fn new(id: &str, name: impl Into<String>, log_type: impl Into<String>) -> Self {
        Self {
            id: normalize_id(id),
            name: name.into(),
            log_type: log_type.into(),
        }
    }

    /// Returns `true` if the key carries a caller id.
    pub fn is_addressable(&self) -> bool {
        self.id.is_some()
    }

    /// Overwrite match: both keys addressable and all three fields equal.
    pub fn matches(&self, other: &LogKey) -> bool {
        self.is_addressable() && self == other
    }
}

impl fmt::Display for LogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.as_deref().unwrap_or("<unnamed>");
        write!(f, "{id}/{}/{}", self.name, self.log_type)
    }
}

/// A named, typed collection of chronologically ordered entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogGroup {
    pub handle: LogId,
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub log_type: String,
    /// Entry bound; `0` is unbounded.
    pub max_len: usize,
    /// Oldest first.
    pub entries: VecDeque<LogEntry>,
}

impl LogGroup {
    /// Create an empty group for `key`.
    pub fn new(handle: LogId, key: LogKey, max_len: usize) -> Self {
        Self {
            handle,
            id: key.id,
            name: key.name,
            log_type: key.log_type,
            max_len,
            entries: VecDeque::new(),
        }
    }

    /// This group's identity triple.
    pub fn key(&self) -> LogKey {
        LogKey {
            id: self.id.clone(),
            name: self.name.clone(),
            log_type: self.log_type.clone(),
        }
    }

    pub fn is_unnamed(&self) -> bool {
        self.id.is_none()
    }

    pub fn is_bounded(&self) -> bool {
        self.max_len > 0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently appended entry.
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Messages, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.message.as_str())
    }

    /// Append an entry and evict from the front until the bound holds.
    ///
    /// Returns the number of evicted entries.
    pub fn push(&mut self, entry: LogEntry) -> usize {
        self.entries.push_back(entry);
        if !self.is_bounded() {
            return 0;
        }
        let mut evicted = 0;
        while self.entries.len() > self.max_len {
            self.entries.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// Check the bound and sequence ordering, e.g. after decoding a
    /// group from durable storage.
    pub fn check_invariants(&self) -> Result<(), TypeError> {
        if self.is_bounded() && self.entries.len() > self.max_len {
            return Err(TypeError::EntriesExceedBound {
                handle: self.handle,
                len: self.entries.len(),
                max_len: self.max_len,
            });
        }
        let mut prev: Option<u64> = None;
        for entry in &self.entries {
            if prev.is_some_and(|p| entry.seq <= p) {
                return Err(TypeError::NonMonotonicSeq {
                    handle: self.handle,
                    seq: entry.seq,
                });
            }
            prev = Some(entry.seq);
        }
        Ok(())
    }
}
