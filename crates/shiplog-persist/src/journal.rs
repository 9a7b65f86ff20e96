use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use shiplog_store::{CreateOptions, LogId, LogKey, LogStore, StoreError, StoreResult};
use tracing::{debug, warn};

use crate::error::{PersistError, Result};

/// A store mutation, recorded so it can be replayed after a restart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JournalOp {
    Create { key: LogKey, options: CreateOptions },
    Append { id: String, message: String },
    AppendTo { handle: LogId, message: String },
    DeleteGroup { handle: LogId },
    DeleteType { log_type: String },
    Clear,
}

impl JournalOp {
    /// Re-apply this mutation to a store.
    ///
    /// The store is deterministic, so replaying the same ops in the same
    /// order against the same starting snapshot reproduces the same
    /// handles and sequence numbers.
    pub fn apply(&self, store: &dyn LogStore) -> StoreResult<()> {
        match self {
            Self::Create { key, options } => store.create_log(key.clone(), *options).map(drop),
            Self::Append { id, message } => store.append(id, message).map(drop),
            Self::AppendTo { handle, message } => store.append_to(*handle, message).map(drop),
            Self::DeleteGroup { handle } => store.delete_group(*handle).map(drop),
            Self::DeleteType { log_type } => store.delete_type(log_type).map(drop),
            Self::Clear => store.clear(),
        }
    }

    /// Fail the way [`apply`](Self::apply) would, without touching the store.
    ///
    /// Only appends can be refused; every other op succeeds on any state.
    pub fn precheck(&self, store: &dyn LogStore) -> StoreResult<()> {
        match self {
            Self::Append { id, .. } => match store.resolve(id)? {
                Some(_) => Ok(()),
                None => Err(StoreError::LogNotFound(id.clone())),
            },
            Self::AppendTo { handle, .. } => match store.contains(*handle)? {
                true => Ok(()),
                false => Err(StoreError::UnknownHandle(*handle)),
            },
            _ => Ok(()),
        }
    }
}

/// Journal record: an operation and its session-wide operation number.
///
/// On-disk format:
/// ```text
/// [4 bytes: payload length (little-endian u32)]
/// [4 bytes: CRC32 of payload (little-endian u32)]
/// [N bytes: payload (bincode-serialized JournalRecord)]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// Strictly increasing across the life of a ship log, including
    /// across checkpoints.
    pub op_seq: u64,
    pub op: JournalOp,
}

/// Flush/sync strategy for the journal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// `fsync` after every record.
    EveryWrite,
    /// Flush to the OS and rely on its page cache.
    #[default]
    OsDefault,
}

/// Header size: 4 bytes length + 4 bytes CRC.
const HEADER_SIZE: usize = 8;

fn encode_frame(record: &JournalRecord) -> Result<Vec<u8>> {
    let payload =
        bincode::serialize(record).map_err(|e| PersistError::Serialization(e.to_string()))?;
    let length = u32::try_from(payload.len()).map_err(|_| {
        PersistError::Serialization(format!("journal record of {} bytes", payload.len()))
    })?;

    let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
    frame.extend_from_slice(&length.to_le_bytes());
    frame.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// One complete frame cut from the front of a buffer.
enum Frame<'a> {
    Intact(&'a [u8]),
    BadChecksum,
}

/// Split the next frame off `buf`, returning it and its total size.
/// `None` means `buf` holds no complete frame.
fn next_frame(buf: &[u8]) -> Option<(Frame<'_>, usize)> {
    let length = u32::from_le_bytes(buf.get(0..4)?.try_into().ok()?) as usize;
    let crc = u32::from_le_bytes(buf.get(4..HEADER_SIZE)?.try_into().ok()?);
    if length == 0 {
        return None;
    }
    let size = HEADER_SIZE.checked_add(length)?;
    let payload = buf.get(HEADER_SIZE..size)?;
    let frame = if crc32fast::hash(payload) == crc {
        Frame::Intact(payload)
    } else {
        Frame::BadChecksum
    };
    Some((frame, size))
}

/// Records decoded from a journal image, plus the length of its intact
/// prefix. Bytes past `valid_len` are a torn write.
struct Scan {
    records: Vec<JournalRecord>,
    valid_len: u64,
}

fn scan(buf: &[u8]) -> Scan {
    let mut records = Vec::new();
    let mut pos = 0;
    while let Some((frame, size)) = next_frame(&buf[pos..]) {
        match frame {
            Frame::Intact(payload) => match bincode::deserialize::<JournalRecord>(payload) {
                Ok(record) => records.push(record),
                Err(e) => warn!(offset = pos, error = %e, "undecodable journal record; skipping"),
            },
            Frame::BadChecksum => warn!(offset = pos, "journal CRC mismatch; skipping record"),
        }
        pos += size;
    }
    Scan {
        records,
        valid_len: pos as u64,
    }
}

struct JournalWriter {
    file: File,
    /// End of the last complete frame; the next record starts here.
    offset: u64,
}

/// Append-only, crash-recoverable operation journal.
///
/// Each record is written as a single frame. A frame that fails to land
/// whole is cut off again before `append` returns, and [`recover`]
/// drops any torn tail left by a crash, so new records always follow an
/// intact prefix.
///
/// [`recover`]: Journal::recover
pub struct Journal {
    path: PathBuf,
    writer: Mutex<JournalWriter>,
    sync_mode: SyncMode,
}

impl Journal {
    /// Open (or create) the journal file at the given path.
    pub fn open(path: &Path, sync_mode: SyncMode) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;
        let offset = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(JournalWriter { file, offset }),
            sync_mode,
        })
    }

    /// Append a record. Returns the byte offset it was written at.
    pub fn append(&self, record: &JournalRecord) -> Result<u64> {
        let frame = encode_frame(record)?;
        let mut w = self.lock_writer()?;
        let at = w.offset;

        let mut written = w.file.write_all(&frame);
        if written.is_ok() && self.sync_mode == SyncMode::EveryWrite {
            written = w.file.sync_data();
        }
        if let Err(e) = written {
            if let Err(cut) = w.file.set_len(at) {
                warn!(offset = at, error = %cut, "could not cut partial journal record");
            }
            return Err(e.into());
        }
        w.offset = at + frame.len() as u64;

        debug!(offset = at, op_seq = record.op_seq, len = frame.len(), "journal append");
        Ok(at)
    }

    /// Read back every intact record, in write order.
    ///
    /// Records with a bad checksum are skipped. A torn tail ends the scan
    /// and is cut from the file, so later appends follow the last intact
    /// record instead of the garbage.
    pub fn recover(&self) -> Result<Vec<JournalRecord>> {
        let mut w = self.lock_writer()?;

        let mut image = Vec::new();
        let file = File::open(&self.path)?;
        let file_len = file.metadata()?.len();
        file.take(file_len).read_to_end(&mut image)?;

        let Scan { records, valid_len } = scan(&image);
        if valid_len < file_len {
            warn!(valid_len, file_len, "discarding torn journal tail");
            w.file.set_len(valid_len)?;
            w.file.sync_all()?;
        }
        w.offset = valid_len;

        debug!(recovered = records.len(), "journal recovery complete");
        Ok(records)
    }

    /// Drop everything from `offset` on, undoing appends made at or after it.
    pub fn rewind(&self, offset: u64) -> Result<()> {
        let mut w = self.lock_writer()?;
        if offset < w.offset {
            w.file.set_len(offset)?;
            w.offset = offset;
        }
        Ok(())
    }

    /// Discard every record.
    pub fn truncate(&self) -> Result<()> {
        let mut w = self.lock_writer()?;
        w.file.set_len(0)?;
        w.file.sync_all()?;
        w.offset = 0;
        debug!("journal truncated");
        Ok(())
    }

    /// Current end-of-journal offset in bytes.
    pub fn offset(&self) -> Result<u64> {
        Ok(self.lock_writer()?.offset)
    }

    /// Path to the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_writer(&self) -> Result<MutexGuard<'_, JournalWriter>> {
        self.writer.lock().map_err(|_| PersistError::LockPoisoned)
    }
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journal")
            .field("path", &self.path)
            .field("sync_mode", &self.sync_mode)
            .finish()
    }
}
