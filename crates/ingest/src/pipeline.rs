//! TUV file to asset conversion and dry-run submission.
//!
//! [`asset_from_tuv`] derives the full asset field set from one measurement
//! file; [`preview`] runs the derived assets through the asset service on a
//! throwaway in-memory ledger so duplicate IDs and invalid fields surface
//! exactly as they would on the real ledger.

use std::collections::BTreeMap;
use std::path::Path;

use sensorchain_core::error::CoreError;
use sensorchain_core::hashing::{file_unique_id, sha256_hex};
use sensorchain_core::tuv::{SeriesStats, TuvFile};
use sensorchain_core::types::{AssetId, Timestamp};
use sensorchain_ledger::models::asset::{AssetFields, AssetRecord};
use sensorchain_ledger::services::AssetService;
use sensorchain_ledger::store::MemoryLedger;

use crate::config::IngestConfig;
use crate::error::{IngestError, IngestResult};

/// Header variable holding the acquisition timestamp.
pub const VAR_FILE_TIMESTAMP: &str = "TimeStamp";

/// Header variable holding the processing timestamp.
pub const VAR_PROCESSED_TIMESTAMP: &str = "ProcessedTimeStamp";

/// Header variable holding the declared data row count.
pub const VAR_TABLE_ROWS: &str = "TableRows";

/// An asset derived from a file, ready to be created under `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedAsset {
    pub id: AssetId,
    pub fields: AssetFields,
}

/// Derive an asset from the raw bytes of a TUV file.
///
/// `ingested_at` feeds the unique ID, so ingesting the same file twice at
/// different instants yields different IDs.
pub fn asset_from_tuv(
    file_name: &str,
    contents: &[u8],
    config: &IngestConfig,
    ingested_at: Timestamp,
) -> IngestResult<IngestedAsset> {
    let parse_error = |source: CoreError| IngestError::Parse {
        file: file_name.to_string(),
        source,
    };

    let text = std::str::from_utf8(contents)
        .map_err(|e| parse_error(CoreError::Validation(format!("file is not UTF-8: {e}"))))?;
    let tuv = TuvFile::parse(text).map_err(parse_error)?;

    let file_hash = sha256_hex(contents);
    let id = file_unique_id(file_name, ingested_at.timestamp_millis(), &file_hash);

    let number_of_series = match tuv.variable(VAR_TABLE_ROWS) {
        Some(raw) => raw.parse::<i64>().map_err(|_| {
            parse_error(CoreError::Validation(format!(
                "{VAR_TABLE_ROWS} must be an integer (got '{raw}')"
            )))
        })?,
        None => tuv.row_count as i64,
    };

    let stats = tuv.statistics();
    let fields = AssetFields {
        owner: config.owner.clone(),
        file_hash,
        file_unique_id: id.clone(),
        file_creation_time: tuv
            .variable(VAR_FILE_TIMESTAMP)
            .unwrap_or_default()
            .to_string(),
        common_variables: serde_json::to_string(&tuv.common_variables)?,
        longitude: serde_json::to_string(tuv.column("Longitude").unwrap_or_default())?,
        latitude: serde_json::to_string(tuv.column("Latitude").unwrap_or_default())?,
        time: tuv
            .variable(VAR_PROCESSED_TIMESTAMP)
            .unwrap_or_default()
            .to_string(),
        mean: stat_json(&stats, |s| s.mean)?,
        min: stat_json(&stats, |s| s.min)?,
        max: stat_json(&stats, |s| s.max)?,
        standard_deviation: stat_json(&stats, |s| s.standard_deviation)?,
        number_of_series,
        software_version: config.software_version,
        links: config.links.clone(),
    };

    tracing::debug!(
        file = %file_name,
        asset_id = %id,
        rows = tuv.row_count,
        "Derived asset from TUV file",
    );

    Ok(IngestedAsset { id, fields })
}

/// Read a TUV file from disk and derive its asset.
pub fn load_file(
    path: &Path,
    config: &IngestConfig,
    ingested_at: Timestamp,
) -> IngestResult<IngestedAsset> {
    let contents = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    asset_from_tuv(&file_name, &contents, config, ingested_at)
}

/// Create every asset on a fresh in-memory ledger and list the result.
///
/// Each asset is its own transaction; the first failure stops the run.
pub fn preview(assets: &[IngestedAsset]) -> IngestResult<Vec<AssetRecord>> {
    let mut ledger = MemoryLedger::new();
    for asset in assets {
        ledger.submit(|tx| AssetService::create(tx, &asset.id, &asset.fields))?;
    }

    let records = ledger.evaluate(AssetService::list_all)?;
    tracing::info!(count = records.len(), "Previewed assets");
    Ok(records)
}

/// Serialize one statistic of every column as a JSON object.
fn stat_json(
    stats: &BTreeMap<&'static str, SeriesStats>,
    pick: impl Fn(&SeriesStats) -> f64,
) -> Result<String, serde_json::Error> {
    let values: BTreeMap<&str, f64> = stats.iter().map(|(name, s)| (*name, pick(s))).collect();
    serde_json::to_string(&values)
}
