//! Shared domain building blocks for the sensor-data provenance ledger.
//!
//! Holds the cross-crate error and type aliases plus the pure computations
//! (hashing, TUV measurement-file parsing and series statistics) that feed
//! asset records before they reach world state.

pub mod error;
pub mod hashing;
pub mod tuv;
pub mod types;
