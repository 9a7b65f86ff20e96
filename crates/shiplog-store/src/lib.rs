//! Log group storage for the ship log.
//!
//! A ship log is a flat collection of [`LogGroup`]s. Each group is a named,
//! typed sequence of messages, optionally addressed by a caller-supplied id
//! and optionally bounded in length. Callers create groups and append
//! messages by id; the store resolves the target group and enforces the
//! bound by evicting the oldest entries.
//!
//! # Resolution
//!
//! Several groups may share an id (creation without overwrite never erases
//! anything). Appends by id always target the most recently created group
//! with that id; appends with the empty id target the most recently created
//! unnamed group. The store keeps an explicit id index so resolution never
//! depends on scanning order.
//!
//! # Storage Backends
//!
//! All backends implement the [`LogStore`] trait:
//!
//! - [`InMemoryLogStore`] -- `RwLock`-guarded store for sessions and tests
//!
//! Durable backends wrap an in-memory store and persist it through
//! [`StoreSnapshot`].
//!
//! # Design Rules
//!
//! 1. Entries are only ever appended; the only removals are eviction,
//!    overwrite, and explicit deletion.
//! 2. After every append, a bounded group holds at most `max_len` entries.
//! 3. Bad input is normalised, never rejected: an empty id is unnamed and
//!    negative bounds are floored by the caller before reaching the store.
//! 4. Failed appends leave the store unchanged.

pub mod error;
pub mod memory;
pub mod snapshot;
pub mod traits;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryLogStore;
pub use snapshot::StoreSnapshot;
pub use traits::LogStore;
pub use types::{AppendOutcome, TimelineEntry};

pub use shiplog_types::{CreateOptions, LogEntry, LogGroup, LogId, LogKey};
