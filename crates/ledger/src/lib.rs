//! Asset lifecycle management over a versioned world-state store.
//!
//! - [`models`]: the persisted [`AssetRecord`](models::asset::AssetRecord)
//!   and the history view built from the store's version log.
//! - [`store`]: the [`WorldStateStore`](store::WorldStateStore) contract the
//!   hosting runtime fulfils, plus an in-memory ledger for local use.
//! - [`services`]: stateless operations that enforce existence preconditions
//!   and (de)serialize records.

pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use error::{ErrorKind, LedgerError};
