use shiplog_types::{LogId, TypeError};

/// Errors from log store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No group resolves for the given caller id.
    #[error("no log group with id {0:?}")]
    LogNotFound(String),

    /// The handle does not name a live group.
    #[error("unknown log handle: {0}")]
    UnknownHandle(LogId),

    /// A snapshot violates store invariants and cannot be restored.
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    /// A group failed its own invariant check.
    #[error("invalid group: {0}")]
    InvalidGroup(#[from] TypeError),

    /// The store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// I/O error from a durable backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A durable backend failed to persist or recover state.
    #[error("persistence error: {0}")]
    Persistence(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
