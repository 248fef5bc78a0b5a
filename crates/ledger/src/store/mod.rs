//! The world-state contract the asset services are written against.
//!
//! The hosting ledger runtime owns ordering, endorsement, MVCC and commit
//! durability. Services only see one transactional context per invocation,
//! modelled here as a [`WorldStateStore`] implementation passed in explicitly.
//!
//! Scans hand back lazy, finite, non-restartable iterators. Implementations
//! must release whatever backs an iterator when it is dropped, so a consumer
//! returning early (including through `?`) never leaks the scan.

pub mod memory;

use sensorchain_core::types::Timestamp;

pub use memory::{CommitReceipt, MemoryLedger, MemoryTransaction, ScanIter, WriteSet};

/// A current `(key, value)` pair returned by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// One committed version of a key, returned by a history scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyModification {
    pub tx_id: String,
    pub timestamp: Timestamp,
    /// Empty for a deletion marker.
    pub value: Vec<u8>,
    pub is_delete: bool,
}

/// Infrastructure faults raised by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("World state unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Scan iteration failed: {0}")]
    Iteration(String),
}

/// A transactional view of versioned world state.
///
/// Every call is synchronous and reports failure immediately; nothing here
/// retries or times out.
pub trait WorldStateStore {
    /// Iterator over a lexicographically ordered key range.
    type RangeIter<'a>: Iterator<Item = Result<KeyValue, StoreError>>
    where
        Self: 'a;

    /// Iterator over the version log of one key, oldest first.
    type HistoryIter<'a>: Iterator<Item = Result<KeyModification, StoreError>>
    where
        Self: 'a;

    /// Current value for `key`. Absence is `Ok(None)`, never an error.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Overwrite (or create) the current value for `key`.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Remove the current value for `key`. Its history is retained.
    fn del_state(&mut self, key: &str) -> Result<(), StoreError>;

    /// Scan keys in `[start_key, end_key)`. An empty bound is unbounded on
    /// that side.
    fn state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Self::RangeIter<'_>, StoreError>;

    /// Every committed version of `key`, including deletion markers.
    fn history_for_key(&self, key: &str) -> Result<Self::HistoryIter<'_>, StoreError>;
}
