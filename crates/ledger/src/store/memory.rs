//! In-memory ledger standing in for the hosting runtime.
//!
//! Keeps committed world state in a `BTreeMap` (so range scans come out in
//! key order) and an append-only version log per key. Transactions read
//! committed state only and buffer their writes until [`MemoryLedger::commit`];
//! dropping a transaction discards them.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use sensorchain_core::types::Timestamp;
use uuid::Uuid;

use super::{KeyModification, KeyValue, StoreError, WorldStateStore};

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Committed world state plus the per-key version log.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: BTreeMap<String, Vec<u8>>,
    history: HashMap<String, Vec<KeyModification>>,
    last_commit: Option<Timestamp>,
    open_iterators: AtomicUsize,
}

/// Identity of a committed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    pub tx_id: String,
    pub timestamp: Timestamp,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a transaction over the current committed state.
    pub fn begin(&self) -> MemoryTransaction<'_> {
        MemoryTransaction {
            ledger: self,
            write_set: WriteSet::default(),
        }
    }

    /// Apply a transaction's writes atomically and append them to history.
    ///
    /// Returns `None` for an empty write set; read-only transactions leave no
    /// trace in the version log.
    pub fn commit(&mut self, write_set: WriteSet) -> Option<CommitReceipt> {
        if write_set.is_empty() {
            return None;
        }

        let tx_id = Uuid::now_v7().to_string();
        // Commit times never go backwards, even if the wall clock does.
        let now = Utc::now();
        let timestamp = match self.last_commit {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_commit = Some(timestamp);

        let key_count = write_set.len();
        for (key, write) in write_set.writes {
            let modification = match write {
                PendingWrite::Put(value) => {
                    self.state.insert(key.clone(), value.clone());
                    KeyModification {
                        tx_id: tx_id.clone(),
                        timestamp,
                        value,
                        is_delete: false,
                    }
                }
                PendingWrite::Delete => {
                    self.state.remove(&key);
                    KeyModification {
                        tx_id: tx_id.clone(),
                        timestamp,
                        value: Vec::new(),
                        is_delete: true,
                    }
                }
            };
            self.history.entry(key).or_default().push(modification);
        }

        tracing::debug!(tx_id = %tx_id, keys = key_count, "Transaction committed");

        Some(CommitReceipt { tx_id, timestamp })
    }

    /// Run `f` in a fresh transaction and commit its writes if it succeeds.
    ///
    /// On `Err` the transaction is dropped and world state is untouched.
    pub fn submit<T, E>(
        &mut self,
        f: impl FnOnce(&mut MemoryTransaction<'_>) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut tx = self.begin();
        let output = f(&mut tx)?;
        let write_set = tx.into_write_set();
        self.commit(write_set);
        Ok(output)
    }

    /// Run a read-only query against committed state.
    pub fn evaluate<'a, T, E>(
        &'a self,
        f: impl FnOnce(&MemoryTransaction<'a>) -> Result<T, E>,
    ) -> Result<T, E> {
        let tx = self.begin();
        f(&tx)
    }

    /// Number of scan iterators currently alive.
    pub fn open_iterators(&self) -> usize {
        self.open_iterators.load(Ordering::SeqCst)
    }

    /// Number of keys with a current value.
    pub fn key_count(&self) -> usize {
        self.state.len()
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingWrite {
    Put(Vec<u8>),
    Delete,
}

/// Buffered writes of one transaction, last write per key wins.
#[derive(Debug, Default)]
pub struct WriteSet {
    writes: BTreeMap<String, PendingWrite>,
}

impl WriteSet {
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

/// A transactional context over a [`MemoryLedger`].
#[derive(Debug)]
pub struct MemoryTransaction<'a> {
    ledger: &'a MemoryLedger,
    write_set: WriteSet,
}

impl MemoryTransaction<'_> {
    /// Finish the transaction, handing back its writes for commit.
    pub fn into_write_set(self) -> WriteSet {
        self.write_set
    }
}

fn check_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey("key must not be empty".to_string()));
    }
    Ok(())
}

impl WorldStateStore for MemoryTransaction<'_> {
    type RangeIter<'b>
        = ScanIter<'b, KeyValue>
    where
        Self: 'b;

    type HistoryIter<'b>
        = ScanIter<'b, KeyModification>
    where
        Self: 'b;

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.ledger.state.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        check_key(key)?;
        self.write_set
            .writes
            .insert(key.to_string(), PendingWrite::Put(value));
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), StoreError> {
        check_key(key)?;
        self.write_set
            .writes
            .insert(key.to_string(), PendingWrite::Delete);
        Ok(())
    }

    fn state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Self::RangeIter<'_>, StoreError> {
        let lower = if start_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start_key)
        };
        let upper = if end_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end_key)
        };

        let items = if !start_key.is_empty() && !end_key.is_empty() && start_key > end_key {
            Vec::new()
        } else {
            self.ledger
                .state
                .range::<str, _>((lower, upper))
                .map(|(key, value)| KeyValue {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect()
        };

        Ok(ScanIter::new(items, &self.ledger.open_iterators))
    }

    fn history_for_key(&self, key: &str) -> Result<Self::HistoryIter<'_>, StoreError> {
        let items = self.ledger.history.get(key).cloned().unwrap_or_default();
        Ok(ScanIter::new(items, &self.ledger.open_iterators))
    }
}

// ---------------------------------------------------------------------------
// Scan iterators
// ---------------------------------------------------------------------------

/// A snapshot scan that counts itself as open until dropped.
#[derive(Debug)]
pub struct ScanIter<'a, T> {
    items: std::vec::IntoIter<T>,
    open: &'a AtomicUsize,
}

impl<'a, T> ScanIter<'a, T> {
    fn new(items: Vec<T>, open: &'a AtomicUsize) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self {
            items: items.into_iter(),
            open,
        }
    }
}

impl<T> Iterator for ScanIter<'_, T> {
    type Item = Result<T, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(Ok)
    }
}

impl<T> Drop for ScanIter<'_, T> {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
