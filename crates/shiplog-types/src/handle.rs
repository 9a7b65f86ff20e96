use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Store-assigned handle for a log group.
///
/// Handles are allocated monotonically by the owning store and are never
/// reused, so ordering handles orders groups by creation time. Unlike the
/// caller-supplied id string, every group has a handle, including unnamed
/// ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(u64);

impl LogId {
    /// The first handle a fresh store hands out.
    pub const FIRST: LogId = LogId(1);

    /// Wrap a raw handle value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw handle value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The handle allocated after this one.
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "log#{}", self.0)
    }
}

impl FromStr for LogId {
    type Err = TypeError;

    /// Parses either the display form (`log#7`) or a bare number (`7`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("log#").unwrap_or(s);
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| TypeError::InvalidHandle(s.to_string()))
    }
}

impl From<LogId> for u64 {
    fn from(id: LogId) -> Self {
        id.0
    }
}
