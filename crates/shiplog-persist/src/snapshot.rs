use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use shiplog_store::StoreSnapshot;
use tracing::debug;

use crate::error::{PersistError, Result};

/// Current on-disk snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk snapshot: the full store plus the last journal operation it
/// already includes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub version: u32,
    /// Journal records with `op_seq <= last_op` are already reflected in
    /// `store` and must not be replayed.
    pub last_op: u64,
    pub store: StoreSnapshot,
}

impl SnapshotFile {
    pub fn new(last_op: u64, store: StoreSnapshot) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            last_op,
            store,
        }
    }
}

/// Write a snapshot atomically: temp file in the target directory, fsync,
/// then rename over the old snapshot.
pub fn write_snapshot(path: &Path, snapshot: &SnapshotFile) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let tmp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut writer, snapshot)
            .map_err(|e| PersistError::Serialization(e.to_string()))?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| PersistError::Io(e.error))?;

    debug!(
        path = %path.display(),
        groups = snapshot.store.groups.len(),
        last_op = snapshot.last_op,
        "snapshot written"
    );
    Ok(())
}

/// Read a snapshot. Returns `Ok(None)` if the file does not exist.
pub fn read_snapshot(path: &Path) -> Result<Option<SnapshotFile>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let snapshot: SnapshotFile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| PersistError::Serialization(e.to_string()))?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(PersistError::UnsupportedSnapshotVersion {
            found: snapshot.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    Ok(Some(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiplog_store::{CreateOptions, InMemoryLogStore, LogKey, LogStore};

    fn populated_store() -> InMemoryLogStore {
        let store = InMemoryLogStore::new();
        store
            .create_log(LogKey::new("", "Travels", "travel"), CreateOptions::default())
            .unwrap();
        store
            .create_log(
                LogKey::new("trade1", "Trade Log", "trade"),
                CreateOptions::default().max_len(2),
            )
            .unwrap();
        store.append("", "Visited Zhiru").unwrap();
        for m in ["A", "B", "C"] {
            store.append("trade1", m).unwrap();
        }
        store
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_snapshot(&dir.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn write_then_read_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shiplog.json");
        let file = SnapshotFile::new(7, populated_store().snapshot().unwrap());

        write_snapshot(&path, &file).unwrap();
        let back = read_snapshot(&path).unwrap().expect("snapshot should exist");
        assert_eq!(back, file);

        let tuples: Vec<(Option<String>, String, String, usize, Vec<String>)> = back
            .store
            .groups
            .iter()
            .map(|g| {
                (
                    g.id.clone(),
                    g.name.clone(),
                    g.log_type.clone(),
                    g.max_len,
                    g.messages().map(str::to_string).collect(),
                )
            })
            .collect();
        assert_eq!(
            tuples,
            vec![
                (None, "Travels".into(), "travel".into(), 0, vec!["Visited Zhiru".into()]),
                (Some("trade1".into()), "Trade Log".into(), "trade".into(), 2, vec!["B".into(), "C".into()]),
            ]
        );
    }

    #[test]
    fn overwrite_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shiplog.json");
        write_snapshot(&path, &SnapshotFile::new(1, StoreSnapshot::empty())).unwrap();
        let second = SnapshotFile::new(2, populated_store().snapshot().unwrap());
        write_snapshot(&path, &second).unwrap();
        assert_eq!(read_snapshot(&path).unwrap(), Some(second));
    }

    #[test]
    fn rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.json");
        let mut file = SnapshotFile::new(0, StoreSnapshot::empty());
        file.version = 99;
        write_snapshot(&path, &file).unwrap();
        assert!(matches!(
            read_snapshot(&path),
            Err(PersistError::UnsupportedSnapshotVersion { found: 99, expected: 1 })
        ));
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, b"{ not json").unwrap();
        assert!(matches!(read_snapshot(&path), Err(PersistError::Serialization(_))));
    }
}
