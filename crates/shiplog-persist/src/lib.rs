//! Durable ship log sessions.
//!
//! A [`ShipLog`] wraps an in-memory log store with two pieces of durable
//! state:
//!
//! - a **snapshot** file holding the full store as JSON, rewritten
//!   atomically on every checkpoint, and
//! - a **journal** of every mutation since that snapshot, framed with a
//!   length prefix and CRC32 so torn writes from a crash are detected.
//!
//! Opening a session loads the snapshot and replays the journal on top of
//! it. Saving writes a new snapshot and truncates the journal.

pub mod config;
pub mod error;
pub mod journal;
pub mod session;
pub mod snapshot;

pub use config::ShipLogConfig;
pub use error::{PersistError, Result};
pub use journal::{Journal, JournalOp, JournalRecord, SyncMode};
pub use session::ShipLog;
pub use snapshot::{read_snapshot, write_snapshot, SnapshotFile, SNAPSHOT_VERSION};
