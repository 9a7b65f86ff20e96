//! Foundation types for the ship log.
//!
//! This crate provides the data model shared by every other ship log crate:
//! the store, the persistence layer, and the script binding all speak in
//! these types.
//!
//! # Key Types
//!
//! - [`LogId`]: Store-assigned handle addressing a single log group
//! - [`LogKey`]: The `(id, name, type)` identity triple used for overwrite
//! - [`LogGroup`]: A named, typed, optionally bounded sequence of entries
//! - [`LogEntry`]: One message plus its store-wide sequence number
//! - [`CreateOptions`]: Optional creation parameters with their defaults

pub mod error;
pub mod group;
pub mod handle;
pub mod options;

pub use error::TypeError;
pub use group::{LogEntry, LogGroup, LogKey};
pub use handle::LogId;
pub use options::{clamp_max_len, normalize_id, CreateOptions};
