use thiserror::Error;

use crate::handle::LogId;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid log handle: {0}")]
    InvalidHandle(String),

    #[error("{handle} holds {len} entries but is bounded to {max_len}")]
    EntriesExceedBound {
        handle: LogId,
        len: usize,
        max_len: usize,
    },

    #[error("{handle} has out-of-order entry seq {seq}")]
    NonMonotonicSeq { handle: LogId, seq: u64 },
}
