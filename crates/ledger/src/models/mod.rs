//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - The `Serialize` + `Deserialize` entity struct matching the stored value
//! - A `Deserialize` input DTO carrying the caller-supplied fields
//! - Read-only views derived from the store (history entries)

pub mod asset;
