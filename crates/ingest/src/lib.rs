//! TUV measurement-file ingestion.
//!
//! Exposes the building blocks (config, error handling, the file-to-asset
//! pipeline, response envelope) so integration tests and the binary
//! entrypoint can both access them.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod response;
