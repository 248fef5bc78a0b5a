//! Sensor-data provenance asset models and DTOs.

use serde::{Deserialize, Serialize};
use sensorchain_core::error::CoreError;
use sensorchain_core::types::{AssetId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (world-state values)
// ---------------------------------------------------------------------------

/// One measurement-file asset as stored in world state under its `ID`.
///
/// Field names on the wire are PascalCase (`FileHash`, `NumberOfSeries`, ...)
/// with `ID` and `FileUniqueID` spelled in full caps. Every field is required
/// when decoding; empty strings are kept as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetRecord {
    #[serde(rename = "ID")]
    pub id: AssetId,
    /// Current custodian.
    pub owner: String,

    // File provenance
    pub file_hash: String,
    #[serde(rename = "FileUniqueID")]
    pub file_unique_id: String,
    /// Timestamp taken from the source file, stored verbatim.
    pub file_creation_time: String,

    // Measurement metadata
    pub common_variables: String,
    pub longitude: String,
    pub latitude: String,
    /// Processed timestamp from the source file, stored verbatim.
    pub time: String,

    // Series statistics
    pub mean: String,
    pub min: String,
    pub max: String,
    pub standard_deviation: String,

    // Context
    /// Number of series in the measurement table.
    pub number_of_series: i64,
    pub software_version: i64,
    /// Related links, empty when not applicable.
    pub links: String,
}

impl AssetRecord {
    /// The record reported for a deletion marker: only `ID` is populated.
    pub fn deleted(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Input DTOs
// ---------------------------------------------------------------------------

/// Every caller-supplied field of an asset except its `ID`.
///
/// Used for both create and update: an update is a total overwrite, so all
/// fields must be supplied again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetFields {
    pub owner: String,
    pub file_hash: String,
    #[serde(rename = "FileUniqueID")]
    pub file_unique_id: String,
    pub file_creation_time: String,
    pub common_variables: String,
    pub longitude: String,
    pub latitude: String,
    pub time: String,
    pub mean: String,
    pub min: String,
    pub max: String,
    pub standard_deviation: String,
    pub number_of_series: i64,
    pub software_version: i64,
    pub links: String,
}

impl AssetFields {
    /// Check the field set before it is written anywhere.
    ///
    /// `NumberOfSeries` and `SoftwareVersion` must be non-negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.number_of_series < 0 {
            return Err(CoreError::Validation(format!(
                "NumberOfSeries must be non-negative (got {})",
                self.number_of_series
            )));
        }
        if self.software_version < 0 {
            return Err(CoreError::Validation(format!(
                "SoftwareVersion must be non-negative (got {})",
                self.software_version
            )));
        }
        Ok(())
    }

    /// Build the full record stored under `id`.
    pub fn to_record(&self, id: &str) -> AssetRecord {
        AssetRecord {
            id: id.to_string(),
            owner: self.owner.clone(),
            file_hash: self.file_hash.clone(),
            file_unique_id: self.file_unique_id.clone(),
            file_creation_time: self.file_creation_time.clone(),
            common_variables: self.common_variables.clone(),
            longitude: self.longitude.clone(),
            latitude: self.latitude.clone(),
            time: self.time.clone(),
            mean: self.mean.clone(),
            min: self.min.clone(),
            max: self.max.clone(),
            standard_deviation: self.standard_deviation.clone(),
            number_of_series: self.number_of_series,
            software_version: self.software_version,
            links: self.links.clone(),
        }
    }
}

impl From<AssetRecord> for AssetFields {
    fn from(record: AssetRecord) -> Self {
        Self {
            owner: record.owner,
            file_hash: record.file_hash,
            file_unique_id: record.file_unique_id,
            file_creation_time: record.file_creation_time,
            common_variables: record.common_variables,
            longitude: record.longitude,
            latitude: record.latitude,
            time: record.time,
            mean: record.mean,
            min: record.min,
            max: record.max,
            standard_deviation: record.standard_deviation,
            number_of_series: record.number_of_series,
            software_version: record.software_version,
            links: record.links,
        }
    }
}

// ---------------------------------------------------------------------------
// History view
// ---------------------------------------------------------------------------

/// One committed version of an asset key, as reported by the history scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Decoded value, or [`AssetRecord::deleted`] for a deletion marker.
    pub record: AssetRecord,
    pub tx_id: String,
    pub timestamp: Timestamp,
    pub is_delete: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
