use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PersistError, Result};
use crate::journal::SyncMode;

/// Configuration for a durable [`ShipLog`](crate::ShipLog) session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipLogConfig {
    /// Directory holding the snapshot and journal.
    pub data_dir: PathBuf,
    /// Snapshot file name inside `data_dir`.
    pub snapshot_file: String,
    /// Journal file name inside `data_dir`.
    pub journal_file: String,
    /// Journal flush strategy.
    pub sync_mode: SyncMode,
    /// Checkpoint automatically after this many journaled operations.
    /// `None` leaves checkpointing to the caller.
    pub autosave_every: Option<u64>,
}

impl Default for ShipLogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".shiplog"),
            snapshot_file: "shiplog.json".into(),
            journal_file: "shiplog.journal".into(),
            sync_mode: SyncMode::default(),
            autosave_every: None,
        }
    }
}

impl ShipLogConfig {
    /// Default configuration rooted at `data_dir`.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }

    pub fn journal_path(&self) -> PathBuf {
        self.data_dir.join(&self.journal_file)
    }

    /// Parse a TOML configuration. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| PersistError::Config(e.to_string()))
    }

    /// Load a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}
