use sensorchain_core::error::CoreError;
use sensorchain_core::types::AssetId;

use crate::store::StoreError;

/// Error returned by every asset service operation.
///
/// Nothing is retried or recovered locally; the caller (the transaction
/// invocation) decides what to do. [`LedgerError::kind`] gives client tooling
/// a stable code to branch on.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The store itself failed.
    #[error("Failed to access world state: {0}")]
    Store(#[from] StoreError),

    /// A record could not be serialized before writing.
    #[error("Failed to encode asset {id}: {source}")]
    Encode {
        id: AssetId,
        #[source]
        source: serde_json::Error,
    },

    #[error("The asset {0} already exists")]
    AlreadyExists(AssetId),

    #[error("The asset {0} does not exist")]
    NotFound(AssetId),

    /// A stored value is not a valid asset record (corruption or schema drift).
    #[error("Failed to decode asset {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Caller-supplied fields were rejected before touching the store.
    #[error(transparent)]
    Validation(#[from] CoreError),
}

/// Stable classification of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InfrastructureFault,
    AlreadyExists,
    NotFound,
    DecodeFault,
    Validation,
}

impl ErrorKind {
    /// Machine-readable code, e.g. `"NOT_FOUND"`.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InfrastructureFault => "INFRASTRUCTURE_FAULT",
            ErrorKind::AlreadyExists => "ALREADY_EXISTS",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::DecodeFault => "DECODE_FAULT",
            ErrorKind::Validation => "VALIDATION_ERROR",
        }
    }
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Store(_) | LedgerError::Encode { .. } => ErrorKind::InfrastructureFault,
            LedgerError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            LedgerError::NotFound(_) => ErrorKind::NotFound,
            LedgerError::Decode { .. } => ErrorKind::DecodeFault,
            LedgerError::Validation(_) => ErrorKind::Validation,
        }
    }
}
