use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use shiplog_types::{CreateOptions, LogEntry, LogGroup, LogId, LogKey};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::snapshot::StoreSnapshot;
use crate::traits::LogStore;
use crate::types::AppendOutcome;

/// In-memory ship log store.
///
/// Groups live in a `BTreeMap` keyed by handle, which is also creation
/// order. Two side indexes make append resolution a constant-time lookup:
/// a multi-map from caller id to handles, and a stack of unnamed handles,
/// both in creation order so the last element is always the append target.
///
/// All state sits behind one `RwLock`; mutations (create, append with its
/// eviction, delete, restore) take the write lock, so the store can be
/// shared with a background saver.
pub struct InMemoryLogStore {
    state: RwLock<StoreState>,
}

struct StoreState {
    groups: BTreeMap<LogId, LogGroup>,
    by_id: HashMap<String, Vec<LogId>>,
    unnamed: Vec<LogId>,
    next_handle: LogId,
    next_seq: u64,
}

impl StoreState {
    fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
            by_id: HashMap::new(),
            unnamed: Vec::new(),
            next_handle: LogId::FIRST,
            next_seq: 1,
        }
    }

    fn from_snapshot(mut snapshot: StoreSnapshot) -> StoreResult<Self> {
        let mut state = Self {
            next_handle: snapshot.next_handle,
            next_seq: snapshot.next_seq,
            ..Self::new()
        };

        // Index vectors must come out in creation order.
        snapshot.groups.sort_by_key(|g| g.handle);

        // Sequence numbers are store-wide; the timeline orders by them.
        let mut seqs = HashSet::new();
        for mut group in snapshot.groups {
            group.check_invariants()?;
            if let Some(dup) = group.entries.iter().find(|e| !seqs.insert(e.seq)) {
                return Err(StoreError::CorruptSnapshot(format!(
                    "entry seq {} appears in more than one group ({})",
                    dup.seq, group.handle
                )));
            }
            if group.handle >= state.next_handle {
                return Err(StoreError::CorruptSnapshot(format!(
                    "{} is not below next handle {}",
                    group.handle, state.next_handle
                )));
            }
            if let Some(last) = group.last() {
                if last.seq >= state.next_seq {
                    return Err(StoreError::CorruptSnapshot(format!(
                        "{} has entry seq {} at or beyond next seq {}",
                        group.handle, last.seq, state.next_seq
                    )));
                }
            }
            if state.groups.contains_key(&group.handle) {
                return Err(StoreError::CorruptSnapshot(format!(
                    "duplicate handle {}",
                    group.handle
                )));
            }
            if group.id.as_deref() == Some("") {
                group.id = None;
            }
            state.insert(group);
        }
        Ok(state)
    }

    fn insert(&mut self, group: LogGroup) {
        match &group.id {
            Some(id) => self.by_id.entry(id.clone()).or_default().push(group.handle),
            None => self.unnamed.push(group.handle),
        }
        self.groups.insert(group.handle, group);
    }

    fn remove(&mut self, handle: LogId) -> Option<LogGroup> {
        let group = self.groups.remove(&handle)?;
        match &group.id {
            Some(id) => {
                if let Some(handles) = self.by_id.get_mut(id) {
                    handles.retain(|h| *h != handle);
                    if handles.is_empty() {
                        self.by_id.remove(id);
                    }
                }
            }
            None => self.unnamed.retain(|h| *h != handle),
        }
        Some(group)
    }

    fn resolve(&self, id: &str) -> Option<LogId> {
        if id.is_empty() {
            self.unnamed.last().copied()
        } else {
            self.by_id.get(id).and_then(|handles| handles.last()).copied()
        }
    }

    fn push(&mut self, handle: LogId, message: &str) -> StoreResult<AppendOutcome> {
        let group = self
            .groups
            .get_mut(&handle)
            .ok_or(StoreError::UnknownHandle(handle))?;
        let seq = self.next_seq;
        let evicted = group.push(LogEntry::new(seq, message));
        self.next_seq += 1;
        Ok(AppendOutcome {
            handle,
            seq,
            evicted,
        })
    }
}

impl InMemoryLogStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::new()),
        }
    }

    /// Build a store from a snapshot.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> StoreResult<Self> {
        Ok(Self {
            state: RwLock::new(StoreState::from_snapshot(snapshot)?),
        })
    }

    /// Number of groups currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read_state()?.groups.len())
    }

    /// Returns `true` if the store holds no groups.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read_state()?.groups.is_empty())
    }

    fn read_state(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write_state(&self) -> StoreResult<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryLogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LogStore for InMemoryLogStore {
    fn create_log(&self, key: LogKey, options: CreateOptions) -> StoreResult<LogId> {
        if key.name.is_empty() || key.log_type.is_empty() {
            warn!(key = %key, "creating log group with empty name or type");
        }
        let key = LogKey {
            id: key.id.filter(|id| !id.is_empty()),
            ..key
        };

        let mut state = self.write_state()?;

        let mut replaced = 0;
        if let (true, Some(id)) = (options.overwrite, key.id.as_deref()) {
            let doomed: Vec<LogId> = state
                .by_id
                .get(id)
                .map(|handles| {
                    handles
                        .iter()
                        .copied()
                        .filter(|h| {
                            state
                                .groups
                                .get(h)
                                .is_some_and(|g| g.name == key.name && g.log_type == key.log_type)
                        })
                        .collect()
                })
                .unwrap_or_default();
            for handle in doomed {
                if state.remove(handle).is_some() {
                    replaced += 1;
                }
            }
        }

        let handle = state.next_handle;
        state.next_handle = handle.next();
        state.insert(LogGroup::new(handle, key, options.max_len));

        debug!(%handle, replaced, max_len = options.max_len, "log group created");
        Ok(handle)
    }

    fn append(&self, id: &str, message: &str) -> StoreResult<AppendOutcome> {
        let mut state = self.write_state()?;
        let handle = state
            .resolve(id)
            .ok_or_else(|| StoreError::LogNotFound(id.to_string()))?;
        let outcome = state.push(handle, message)?;
        debug!(id, handle = %outcome.handle, seq = outcome.seq, evicted = outcome.evicted, "log append");
        Ok(outcome)
    }

    fn append_to(&self, handle: LogId, message: &str) -> StoreResult<AppendOutcome> {
        let outcome = self.write_state()?.push(handle, message)?;
        debug!(%handle, seq = outcome.seq, evicted = outcome.evicted, "log append");
        Ok(outcome)
    }

    fn group(&self, handle: LogId) -> StoreResult<Option<LogGroup>> {
        Ok(self.read_state()?.groups.get(&handle).cloned())
    }

    fn resolve(&self, id: &str) -> StoreResult<Option<LogId>> {
        Ok(self.read_state()?.resolve(id))
    }

    fn groups(&self) -> StoreResult<Vec<LogGroup>> {
        Ok(self.read_state()?.groups.values().cloned().collect())
    }

    fn delete_group(&self, handle: LogId) -> StoreResult<bool> {
        let removed = self.write_state()?.remove(handle).is_some();
        if removed {
            debug!(%handle, "log group deleted");
        }
        Ok(removed)
    }

    fn delete_type(&self, log_type: &str) -> StoreResult<usize> {
        let mut state = self.write_state()?;
        let doomed: Vec<LogId> = state
            .groups
            .values()
            .filter(|g| g.log_type == log_type)
            .map(|g| g.handle)
            .collect();
        for handle in &doomed {
            state.remove(*handle);
        }
        debug!(log_type, removed = doomed.len(), "log type deleted");
        Ok(doomed.len())
    }

    fn clear(&self) -> StoreResult<()> {
        let mut state = self.write_state()?;
        state.groups.clear();
        state.by_id.clear();
        state.unnamed.clear();
        Ok(())
    }

    fn snapshot(&self) -> StoreResult<StoreSnapshot> {
        let state = self.read_state()?;
        Ok(StoreSnapshot {
            next_handle: state.next_handle,
            next_seq: state.next_seq,
            groups: state.groups.values().cloned().collect(),
        })
    }

    fn restore(&self, snapshot: StoreSnapshot) -> StoreResult<()> {
        let fresh = StoreState::from_snapshot(snapshot)?;
        *self.write_state()? = fresh;
        Ok(())
    }

    fn contains(&self, handle: LogId) -> StoreResult<bool> {
        Ok(self.read_state()?.groups.contains_key(&handle))
    }

    fn entry_count(&self) -> StoreResult<usize> {
        Ok(self.read_state()?.groups.values().map(LogGroup::len).sum())
    }
}

impl std::fmt::Debug for InMemoryLogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len().unwrap_or(0);
        f.debug_struct("InMemoryLogStore")
            .field("group_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn create(store: &InMemoryLogStore, id: &str, name: &str, ty: &str, overwrite: bool, max_len: usize) -> LogId {
        store
            .create_log(
                LogKey::new(id, name, ty),
                CreateOptions::default().overwrite(overwrite).max_len(max_len),
            )
            .unwrap()
    }

    fn messages(store: &InMemoryLogStore, handle: LogId) -> Vec<String> {
        store
            .group(handle)
            .unwrap()
            .expect("group should exist")
            .messages()
            .map(str::to_string)
            .collect()
    }

    // -----------------------------------------------------------------------
    // Reference scenarios
    // -----------------------------------------------------------------------

    #[test]
    fn unnamed_group_receives_empty_id_appends() {
        let store = InMemoryLogStore::new();
        let h = create(&store, "", "Travels", "travel", false, 0);
        store.append("", "Visited Zhiru").unwrap();
        assert_eq!(messages(&store, h), vec!["Visited Zhiru"]);
        assert!(store.group(h).unwrap().unwrap().is_unnamed());
    }

    #[test]
    fn bounded_group_keeps_most_recent() {
        let store = InMemoryLogStore::new();
        let h = create(&store, "trade1", "Trade Log", "trade", false, 2);
        store.append("trade1", "A").unwrap();
        store.append("trade1", "B").unwrap();
        let outcome = store.append("trade1", "C").unwrap();
        assert_eq!(outcome.evicted, 1);
        assert_eq!(messages(&store, h), vec!["B", "C"]);
    }

    #[test]
    fn overwrite_discards_matching_group() {
        let store = InMemoryLogStore::new();
        let first = create(&store, "x", "Log", "misc", false, 0);
        store.append("x", "old").unwrap();

        let second = create(&store, "x", "Log", "misc", true, 0);
        assert!(store.group(first).unwrap().is_none());
        assert!(store.group(second).unwrap().unwrap().is_empty());

        let outcome = store.append("x", "new").unwrap();
        assert_eq!(outcome.handle, second);
        assert_eq!(messages(&store, second), vec!["new"]);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn append_to_unknown_id_fails_and_leaves_store_unchanged() {
        let store = InMemoryLogStore::new();
        create(&store, "known", "Log", "misc", false, 0);
        let before = store.snapshot().unwrap();

        let err = store.append("nonexistent", "msg").unwrap_err();
        assert!(matches!(err, StoreError::LogNotFound(ref id) if id == "nonexistent"));
        assert_eq!(store.snapshot().unwrap(), before);
    }

    // -----------------------------------------------------------------------
    // Resolution and overwrite
    // -----------------------------------------------------------------------

    #[test]
    fn non_overwrite_keeps_both_and_targets_newest() {
        let store = InMemoryLogStore::new();
        let first = create(&store, "x", "Log", "misc", false, 0);
        store.append("x", "one").unwrap();
        let second = create(&store, "x", "Log", "misc", false, 0);
        store.append("x", "two").unwrap();

        assert_eq!(messages(&store, first), vec!["one"]);
        assert_eq!(messages(&store, second), vec!["two"]);
        assert_eq!(store.resolve("x").unwrap(), Some(second));
    }

    #[test]
    fn overwrite_only_touches_exact_key() {
        let store = InMemoryLogStore::new();
        let other_name = create(&store, "x", "Other", "misc", false, 0);
        let other_type = create(&store, "x", "Log", "trade", false, 0);
        let other_id = create(&store, "y", "Log", "misc", false, 0);
        create(&store, "x", "Log", "misc", true, 0);

        assert!(store.group(other_name).unwrap().is_some());
        assert!(store.group(other_type).unwrap().is_some());
        assert!(store.group(other_id).unwrap().is_some());
        assert_eq!(store.len().unwrap(), 4);
    }

    #[test]
    fn overwrite_removes_every_duplicate() {
        let store = InMemoryLogStore::new();
        create(&store, "x", "Log", "misc", false, 0);
        create(&store, "x", "Log", "misc", false, 0);
        create(&store, "x", "Log", "misc", false, 0);
        let survivor = create(&store, "x", "Log", "misc", true, 0);
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(store.resolve("x").unwrap(), Some(survivor));
    }

    #[test]
    fn overwrite_of_unnamed_group_is_a_plain_create() {
        let store = InMemoryLogStore::new();
        let first = create(&store, "", "Travels", "travel", false, 0);
        store.append("", "kept").unwrap();
        let second = create(&store, "", "Travels", "travel", true, 0);

        assert_eq!(messages(&store, first), vec!["kept"]);
        assert_eq!(store.resolve("").unwrap(), Some(second));
    }

    #[test]
    fn resolution_falls_back_after_delete() {
        let store = InMemoryLogStore::new();
        let first = create(&store, "x", "Log", "misc", false, 0);
        let second = create(&store, "x", "Log", "misc", false, 0);
        assert!(store.delete_group(second).unwrap());
        assert_eq!(store.resolve("x").unwrap(), Some(first));
        assert!(store.delete_group(first).unwrap());
        assert_eq!(store.resolve("x").unwrap(), None);
        assert!(!store.delete_group(first).unwrap());
    }

    #[test]
    fn named_and_unnamed_resolve_independently() {
        let store = InMemoryLogStore::new();
        let unnamed = create(&store, "", "Travels", "travel", false, 0);
        let named = create(&store, "x", "Log", "misc", false, 0);
        assert_eq!(store.resolve("").unwrap(), Some(unnamed));
        assert_eq!(store.resolve("x").unwrap(), Some(named));
    }

    #[test]
    fn empty_id_without_unnamed_group_fails() {
        let store = InMemoryLogStore::new();
        create(&store, "x", "Log", "misc", false, 0);
        assert!(matches!(store.append("", "msg"), Err(StoreError::LogNotFound(_))));
    }

    #[test]
    fn empty_name_and_type_are_accepted() {
        let store = InMemoryLogStore::new();
        let h = create(&store, "x", "", "", false, 0);
        assert!(store.group(h).unwrap().is_some());
    }

    #[test]
    fn handles_are_never_reused() {
        let store = InMemoryLogStore::new();
        let a = create(&store, "x", "Log", "misc", false, 0);
        let b = create(&store, "x", "Log", "misc", true, 0);
        store.clear().unwrap();
        let c = create(&store, "x", "Log", "misc", false, 0);
        assert!(a < b && b < c);
    }

    // -----------------------------------------------------------------------
    // Append by handle
    // -----------------------------------------------------------------------

    #[test]
    fn append_to_specific_older_group() {
        let store = InMemoryLogStore::new();
        let first = create(&store, "x", "Log", "misc", false, 1);
        create(&store, "x", "Log", "misc", false, 0);
        store.append_to(first, "a").unwrap();
        store.append_to(first, "b").unwrap();
        assert_eq!(messages(&store, first), vec!["b"]);
    }

    #[test]
    fn contains_tracks_deletes() {
        let store = InMemoryLogStore::new();
        let h = create(&store, "x", "Log", "misc", false, 0);
        assert!(store.contains(h).unwrap());
        store.delete_group(h).unwrap();
        assert!(!store.contains(h).unwrap());
    }

    #[test]
    fn append_to_unknown_handle_fails() {
        let store = InMemoryLogStore::new();
        let err = store.append_to(LogId::new(99), "msg").unwrap_err();
        assert!(matches!(err, StoreError::UnknownHandle(h) if h == LogId::new(99)));
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[test]
    fn types_and_groups_of_type() {
        let store = InMemoryLogStore::new();
        create(&store, "a", "A", "trade", false, 0);
        create(&store, "b", "B", "travel", false, 0);
        create(&store, "c", "C", "trade", false, 0);

        assert_eq!(store.types().unwrap(), vec!["trade", "travel"]);
        let trade: Vec<String> = store
            .groups_of_type("trade")
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(trade, vec!["A", "C"]);
    }

    #[test]
    fn timeline_orders_across_groups() {
        let store = InMemoryLogStore::new();
        let a = create(&store, "a", "A", "trade", false, 0);
        let b = create(&store, "b", "B", "travel", false, 0);
        store.append("a", "1").unwrap();
        store.append("b", "2").unwrap();
        store.append("a", "3").unwrap();

        let all = store.timeline(0).unwrap();
        let msgs: Vec<&str> = all.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(msgs, vec!["1", "2", "3"]);
        assert_eq!(all[1].handle, b);

        let recent = store.timeline(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "2");
        assert_eq!(recent[1].handle, a);
    }

    #[test]
    fn delete_type_removes_only_that_type() {
        let store = InMemoryLogStore::new();
        create(&store, "a", "A", "trade", false, 0);
        create(&store, "", "B", "trade", false, 0);
        let keep = create(&store, "c", "C", "travel", false, 0);

        assert_eq!(store.delete_type("trade").unwrap(), 2);
        assert_eq!(store.len().unwrap(), 1);
        assert!(store.group(keep).unwrap().is_some());
        assert_eq!(store.resolve("").unwrap(), None);
        assert_eq!(store.resolve("a").unwrap(), None);
    }

    #[test]
    fn entry_count_sums_groups() {
        let store = InMemoryLogStore::new();
        create(&store, "a", "A", "trade", false, 0);
        create(&store, "b", "B", "trade", false, 0);
        store.append("a", "1").unwrap();
        store.append("b", "2").unwrap();
        store.append("b", "3").unwrap();
        assert_eq!(store.entry_count().unwrap(), 3);
    }

    // -----------------------------------------------------------------------
    // Snapshot / restore
    // -----------------------------------------------------------------------

    #[test]
    fn snapshot_restore_preserves_groups_and_counters() {
        let store = InMemoryLogStore::new();
        create(&store, "", "Travels", "travel", false, 0);
        create(&store, "trade1", "Trade Log", "trade", false, 2);
        store.append("", "Visited Zhiru").unwrap();
        for m in ["A", "B", "C"] {
            store.append("trade1", m).unwrap();
        }
        let snap = store.snapshot().unwrap();

        let restored = InMemoryLogStore::from_snapshot(snap.clone()).unwrap();
        assert_eq!(restored.snapshot().unwrap(), snap);
        assert_eq!(restored.resolve("").unwrap(), store.resolve("").unwrap());

        let next = restored.append("trade1", "D").unwrap();
        assert_eq!(next.seq, snap.next_seq);
        let h = create(&restored, "new", "New", "misc", false, 0);
        assert_eq!(h, snap.next_handle);
    }

    #[test]
    fn restore_rebuilds_resolution_order_from_handles() {
        let store = InMemoryLogStore::new();
        create(&store, "x", "Log", "misc", false, 0);
        let newest = create(&store, "x", "Log", "misc", false, 0);
        let mut snap = store.snapshot().unwrap();
        snap.groups.reverse();

        let restored = InMemoryLogStore::from_snapshot(snap).unwrap();
        assert_eq!(restored.resolve("x").unwrap(), Some(newest));
    }

    #[test]
    fn restore_rejects_overfull_group_and_keeps_state() {
        let store = InMemoryLogStore::new();
        let h = create(&store, "x", "Log", "misc", false, 1);
        store.append("x", "only").unwrap();
        let good = store.snapshot().unwrap();

        let mut bad = good.clone();
        bad.groups[0].entries.push_back(LogEntry::new(bad.next_seq, "extra"));
        bad.next_seq += 1;
        assert!(matches!(store.restore(bad), Err(StoreError::InvalidGroup(_))));
        assert_eq!(messages(&store, h), vec!["only"]);
    }

    #[test]
    fn restore_rejects_duplicate_and_future_handles() {
        let store = InMemoryLogStore::new();
        create(&store, "x", "Log", "misc", false, 0);
        let snap = store.snapshot().unwrap();

        let mut dup = snap.clone();
        dup.groups.push(dup.groups[0].clone());
        assert!(matches!(store.restore(dup), Err(StoreError::CorruptSnapshot(_))));

        let mut future = snap.clone();
        future.groups[0].handle = future.next_handle;
        assert!(matches!(store.restore(future), Err(StoreError::CorruptSnapshot(_))));
    }

    #[test]
    fn restore_rejects_seq_beyond_counter() {
        let store = InMemoryLogStore::new();
        create(&store, "x", "Log", "misc", false, 0);
        store.append("x", "m").unwrap();
        let mut snap = store.snapshot().unwrap();
        snap.next_seq = 1;
        assert!(matches!(store.restore(snap), Err(StoreError::CorruptSnapshot(_))));
    }

    #[test]
    fn restore_rejects_seq_shared_between_groups() {
        let store = InMemoryLogStore::new();
        create(&store, "a", "A", "misc", false, 0);
        create(&store, "b", "B", "misc", false, 0);
        store.append("a", "first").unwrap();
        store.append("b", "second").unwrap();

        let mut snap = store.snapshot().unwrap();
        snap.groups[1].entries[0].seq = snap.groups[0].entries[0].seq;
        assert!(matches!(store.restore(snap), Err(StoreError::CorruptSnapshot(_))));
        assert_eq!(messages(&store, LogId::new(2)), vec!["second"]);
    }

    // -----------------------------------------------------------------------
    // Concurrency
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_appends_respect_bound() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryLogStore::new());
        let h = create(&store, "shared", "Shared", "misc", false, 16);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..50 {
                        store.append("shared", &format!("{t}-{i}")).unwrap();
                    }
                })
            })
            .collect();
        for t in handles {
            t.join().expect("thread should not panic");
        }

        let group = store.group(h).unwrap().unwrap();
        assert_eq!(group.len(), 16);
        assert!(group.check_invariants().is_ok());
    }

    #[test]
    fn debug_format() {
        let store = InMemoryLogStore::new();
        create(&store, "x", "Log", "misc", false, 0);
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryLogStore"));
        assert!(debug.contains("group_count"));
    }

    // -----------------------------------------------------------------------
    // Bound invariant
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn bounded_group_retains_exactly_the_latest(
            max_len in 1usize..8,
            msgs in proptest::collection::vec("[a-z]{1,6}", 0..40),
        ) {
            let store = InMemoryLogStore::new();
            let h = create(&store, "p", "Prop", "misc", false, max_len);
            for m in &msgs {
                store.append("p", m).unwrap();
            }
            let kept = messages(&store, h);
            prop_assert!(kept.len() <= max_len);
            let start = msgs.len().saturating_sub(max_len);
            prop_assert_eq!(kept, msgs[start..].to_vec());
        }

        #[test]
        fn unbounded_group_never_evicts(msgs in proptest::collection::vec(".{0,8}", 0..60)) {
            let store = InMemoryLogStore::new();
            let h = create(&store, "p", "Prop", "misc", false, 0);
            for m in &msgs {
                prop_assert_eq!(store.append("p", m).unwrap().evicted, 0);
            }
            prop_assert_eq!(messages(&store, h), msgs);
        }
    }
}
