use std::io;

use shiplog_store::StoreError;

/// Errors produced by the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// I/O error during snapshot or journal operations.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The in-memory store rejected an operation or a snapshot.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The snapshot file was written by an incompatible version.
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedSnapshotVersion { found: u32, expected: u32 },

    /// The configuration file could not be parsed.
    #[error("invalid config: {0}")]
    Config(String),

    /// The session writer lock was poisoned.
    #[error("session lock poisoned")]
    LockPoisoned,
}

impl From<PersistError> for StoreError {
    fn from(err: PersistError) -> Self {
        match err {
            PersistError::Store(inner) => inner,
            PersistError::Io(inner) => StoreError::Io(inner),
            PersistError::LockPoisoned => StoreError::LockPoisoned,
            other => StoreError::Persistence(other.to_string()),
        }
    }
}

/// Convenience alias used throughout the persistence crate.
pub type Result<T> = std::result::Result<T, PersistError>;
