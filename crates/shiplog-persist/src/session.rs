use std::sync::{Mutex, MutexGuard};

use shiplog_store::{
    AppendOutcome, CreateOptions, InMemoryLogStore, LogGroup, LogId, LogKey, LogStore,
    StoreResult, StoreSnapshot,
};
use tracing::{info, warn};

use crate::config::ShipLogConfig;
use crate::error::{PersistError, Result};
use crate::journal::{Journal, JournalOp, JournalRecord};
use crate::snapshot::{read_snapshot, write_snapshot, SnapshotFile};

/// Journal bookkeeping guarded by the session writer lock.
struct WriterState {
    next_op: u64,
    since_save: u64,
}

/// A durable ship log session.
///
/// Every mutation is applied to the in-memory store and then appended to
/// the journal while the writer lock is held, so journal order always
/// equals apply order and a checkpoint never observes a half-journaled
/// operation. Reads go straight to the in-memory store.
pub struct ShipLog {
    store: InMemoryLogStore,
    journal: Journal,
    config: ShipLogConfig,
    writer: Mutex<WriterState>,
}

impl ShipLog {
    /// Open a session, restoring the last snapshot and replaying the
    /// journal on top of it.
    pub fn open(config: ShipLogConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let (store, last_op) = match read_snapshot(&config.snapshot_path())? {
            Some(file) => (InMemoryLogStore::from_snapshot(file.store)?, file.last_op),
            None => (InMemoryLogStore::new(), 0),
        };

        let journal = Journal::open(&config.journal_path(), config.sync_mode.clone())?;

        let mut next_op = last_op + 1;
        let mut replayed = 0u64;
        let mut stale = 0u64;
        for record in journal.recover()? {
            if record.op_seq <= last_op {
                stale += 1;
                continue;
            }
            if let Err(e) = record.op.apply(&store) {
                warn!(op_seq = record.op_seq, error = %e, "journal op failed to replay; skipping");
            } else {
                replayed += 1;
            }
            next_op = next_op.max(record.op_seq + 1);
        }

        info!(
            data_dir = %config.data_dir.display(),
            groups = store.len()?,
            replayed,
            stale,
            "ship log opened"
        );

        Ok(Self {
            store,
            journal,
            config,
            writer: Mutex::new(WriterState {
                next_op,
                since_save: replayed,
            }),
        })
    }

    /// Checkpoint: write a snapshot and truncate the journal.
    pub fn save(&self) -> Result<()> {
        let mut w = self.lock_writer()?;
        self.checkpoint(&mut w)
    }

    /// Save and end the session.
    pub fn close(self) -> Result<()> {
        self.save()
    }

    /// Operations journaled since the last checkpoint.
    pub fn pending_ops(&self) -> Result<u64> {
        Ok(self.lock_writer()?.since_save)
    }

    pub fn config(&self) -> &ShipLogConfig {
        &self.config
    }

    /// Direct read access to the in-memory state.
    pub fn store(&self) -> &InMemoryLogStore {
        &self.store
    }

    fn checkpoint(&self, w: &mut WriterState) -> Result<()> {
        let file = SnapshotFile::new(w.next_op - 1, self.store.snapshot()?);
        write_snapshot(&self.config.snapshot_path(), &file)?;
        // A crash between these two steps leaves stale records in the
        // journal; `last_op` makes replay skip them.
        self.journal.truncate()?;
        w.since_save = 0;
        info!(last_op = file.last_op, groups = file.store.groups.len(), "ship log checkpoint");
        Ok(())
    }

    /// Journal `op`, then apply it.
    ///
    /// Ops the store would refuse are rejected before they reach the
    /// journal, and a journal write failure leaves the store untouched, so
    /// an `Err` always means nothing changed. Autosave runs after the op is
    /// committed; if it fails the op still stands and the journal keeps it.
    fn commit<T>(
        &self,
        op: JournalOp,
        apply: impl FnOnce(&InMemoryLogStore) -> StoreResult<T>,
    ) -> Result<T> {
        let mut w = self.lock_writer()?;
        op.precheck(&self.store)?;

        let record = JournalRecord {
            op_seq: w.next_op,
            op,
        };
        let offset = self.journal.append(&record)?;

        let out = match apply(&self.store) {
            Ok(out) => out,
            Err(e) => {
                if let Err(cut) = self.journal.rewind(offset) {
                    warn!(op_seq = record.op_seq, error = %cut, "could not drop journal record of failed op");
                }
                return Err(e.into());
            }
        };
        w.next_op += 1;
        w.since_save += 1;

        if let Some(every) = self.config.autosave_every {
            if every > 0 && w.since_save >= every {
                if let Err(e) = self.checkpoint(&mut w) {
                    warn!(pending = w.since_save, error = %e, "autosave failed; journal kept");
                }
            }
        }
        Ok(out)
    }

    fn lock_writer(&self) -> Result<MutexGuard<'_, WriterState>> {
        self.writer.lock().map_err(|_| PersistError::LockPoisoned)
    }
}

impl LogStore for ShipLog {
    fn create_log(&self, key: LogKey, options: CreateOptions) -> StoreResult<LogId> {
        let op = JournalOp::Create {
            key: key.clone(),
            options,
        };
        Ok(self.commit(op, |store| store.create_log(key, options))?)
    }

    fn append(&self, id: &str, message: &str) -> StoreResult<AppendOutcome> {
        let op = JournalOp::Append {
            id: id.to_string(),
            message: message.to_string(),
        };
        Ok(self.commit(op, |store| store.append(id, message))?)
    }

    fn append_to(&self, handle: LogId, message: &str) -> StoreResult<AppendOutcome> {
        let op = JournalOp::AppendTo {
            handle,
            message: message.to_string(),
        };
        Ok(self.commit(op, |store| store.append_to(handle, message))?)
    }

    fn group(&self, handle: LogId) -> StoreResult<Option<LogGroup>> {
        self.store.group(handle)
    }

    fn resolve(&self, id: &str) -> StoreResult<Option<LogId>> {
        self.store.resolve(id)
    }

    fn groups(&self) -> StoreResult<Vec<LogGroup>> {
        self.store.groups()
    }

    fn delete_group(&self, handle: LogId) -> StoreResult<bool> {
        Ok(self.commit(JournalOp::DeleteGroup { handle }, |store| {
            store.delete_group(handle)
        })?)
    }

    fn delete_type(&self, log_type: &str) -> StoreResult<usize> {
        let op = JournalOp::DeleteType {
            log_type: log_type.to_string(),
        };
        Ok(self.commit(op, |store| store.delete_type(log_type))?)
    }

    fn clear(&self) -> StoreResult<()> {
        Ok(self.commit(JournalOp::Clear, |store| store.clear())?)
    }

    fn snapshot(&self) -> StoreResult<StoreSnapshot> {
        self.store.snapshot()
    }

    /// Restoring replaces everything, so it checkpoints immediately rather
    /// than journaling the whole snapshot.
    fn restore(&self, snapshot: StoreSnapshot) -> StoreResult<()> {
        let mut w = self.lock_writer()?;
        self.store.restore(snapshot)?;
        Ok(self.checkpoint(&mut w)?)
    }

    fn contains(&self, handle: LogId) -> StoreResult<bool> {
        self.store.contains(handle)
    }

    fn entry_count(&self) -> StoreResult<usize> {
        self.store.entry_count()
    }
}

impl std::fmt::Debug for ShipLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShipLog")
            .field("data_dir", &self.config.data_dir)
            .field("journal", &self.journal)
            .finish()
    }
}
