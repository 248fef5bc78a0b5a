use std::path::PathBuf;

use sensorchain_core::error::CoreError;
use sensorchain_ledger::LedgerError;

/// Error type for the ingest pipeline.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a usable TUV file.
    #[error("{file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: CoreError,
    },

    #[error("Failed to encode asset fields: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Convenience type alias for pipeline results.
pub type IngestResult<T> = Result<T, IngestError>;
