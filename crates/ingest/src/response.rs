//! Output envelope for the ingest binary.

use serde::Serialize;

/// Standard `{ "data": T }` envelope written to stdout.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
