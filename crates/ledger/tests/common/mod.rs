#![allow(dead_code)]

use sensorchain_ledger::models::asset::AssetFields;
use sensorchain_ledger::store::{
    KeyModification, KeyValue, MemoryLedger, MemoryTransaction, ScanIter, StoreError,
    WorldStateStore,
};
use sensorchain_ledger::services::AssetService;

/// A complete field set with every string populated.
pub fn sample_fields(owner: &str) -> AssetFields {
    AssetFields {
        owner: owner.to_string(),
        file_hash: "5d41402abc4b2a76b9719d911017c592".to_string(),
        file_unique_id: "3a7bd3e2360a3d29eea436fcfb7e44c7".to_string(),
        file_creation_time: "2023 05 01 00 00 00".to_string(),
        common_variables: r#"{"CTF":"1.00","TableRows":"4"}"#.to_string(),
        longitude: "[2.81,2.85]".to_string(),
        latitude: "[38.69,38.71]".to_string(),
        time: "2023 05 01 00 30 12".to_string(),
        mean: r#"{"UComp":12.4}"#.to_string(),
        min: r#"{"UComp":-3.1}"#.to_string(),
        max: r#"{"UComp":40.2}"#.to_string(),
        standard_deviation: r#"{"UComp":7.9}"#.to_string(),
        number_of_series: 4,
        software_version: 1,
        links: String::new(),
    }
}

/// Create `ids` in one committed transaction each.
pub fn ledger_with(ids: &[&str]) -> MemoryLedger {
    let mut ledger = MemoryLedger::new();
    for id in ids {
        ledger
            .submit(|tx| AssetService::create(tx, id, &sample_fields("lab-A")))
            .unwrap();
    }
    ledger
}

/// Write raw bytes under `key`, bypassing the service.
pub fn put_raw(ledger: &mut MemoryLedger, key: &str, value: &[u8]) {
    ledger
        .submit(|tx| tx.put_state(key, value.to_vec()))
        .unwrap();
}

// ---------------------------------------------------------------------------
// Fault injection
// ---------------------------------------------------------------------------

/// Wraps a memory transaction and injects infrastructure faults.
pub struct FaultyStore<'a> {
    pub inner: MemoryTransaction<'a>,
    pub fail_get: bool,
    pub fail_put: bool,
    pub fail_delete: bool,
    /// Yield an iteration error after this many scan items.
    pub fail_scan_after: Option<usize>,
}

impl<'a> FaultyStore<'a> {
    pub fn new(inner: MemoryTransaction<'a>) -> Self {
        Self {
            inner,
            fail_get: false,
            fail_put: false,
            fail_delete: false,
            fail_scan_after: None,
        }
    }
}

pub struct FaultyIter<I> {
    inner: I,
    remaining: Option<usize>,
}

impl<I, T> Iterator for FaultyIter<I>
where
    I: Iterator<Item = Result<T, StoreError>>,
{
    type Item = Result<T, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.remaining.as_mut() {
            Some(0) => Some(Err(StoreError::Iteration("injected".to_string()))),
            Some(n) => {
                *n -= 1;
                self.inner.next()
            }
            None => self.inner.next(),
        }
    }
}

impl WorldStateStore for FaultyStore<'_> {
    type RangeIter<'b>
        = FaultyIter<ScanIter<'b, KeyValue>>
    where
        Self: 'b;

    type HistoryIter<'b>
        = FaultyIter<ScanIter<'b, KeyModification>>
    where
        Self: 'b;

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.fail_get {
            return Err(StoreError::Unavailable("injected get fault".to_string()));
        }
        self.inner.get_state(key)
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        if self.fail_put {
            return Err(StoreError::Unavailable("injected put fault".to_string()));
        }
        self.inner.put_state(key, value)
    }

    fn del_state(&mut self, key: &str) -> Result<(), StoreError> {
        if self.fail_delete {
            return Err(StoreError::Unavailable("injected delete fault".to_string()));
        }
        self.inner.del_state(key)
    }

    fn state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Self::RangeIter<'_>, StoreError> {
        Ok(FaultyIter {
            inner: self.inner.state_by_range(start_key, end_key)?,
            remaining: self.fail_scan_after,
        })
    }

    fn history_for_key(&self, key: &str) -> Result<Self::HistoryIter<'_>, StoreError> {
        Ok(FaultyIter {
            inner: self.inner.history_for_key(key)?,
            remaining: self.fail_scan_after,
        })
    }
}
