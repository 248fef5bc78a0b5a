//! Asset lifecycle operations over a transactional world-state context.
//!
//! Every write checks existence, then validates and serializes before its
//! single mutating store call, so a failed invocation never leaves a partial write behind.

use crate::error::LedgerError;
use crate::models::asset::{AssetFields, AssetRecord, HistoryEntry};
use crate::store::WorldStateStore;

/// Provides CRUD, range and history operations for sensor-data assets.
pub struct AssetService;

impl AssetService {
    // -----------------------------------------------------------------------
    // Point operations
    // -----------------------------------------------------------------------

    /// True when `id` has a current value in world state.
    pub fn exists<S: WorldStateStore>(ctx: &S, id: &str) -> Result<bool, LedgerError> {
        Ok(ctx.get_state(id)?.is_some())
    }

    /// Create a new asset. Fails with `AlreadyExists` on a live key before
    /// the fields are validated.
    pub fn create<S: WorldStateStore>(
        ctx: &mut S,
        id: &str,
        fields: &AssetFields,
    ) -> Result<(), LedgerError> {
        if Self::exists(&*ctx, id)? {
            return Err(LedgerError::AlreadyExists(id.to_string()));
        }
        fields.validate()?;

        let bytes = encode(&fields.to_record(id))?;
        ctx.put_state(id, bytes)?;

        tracing::info!(asset_id = %id, owner = %fields.owner, "Asset created");
        Ok(())
    }

    /// Read the current record for `id`.
    pub fn read<S: WorldStateStore>(ctx: &S, id: &str) -> Result<AssetRecord, LedgerError> {
        let bytes = ctx
            .get_state(id)?
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        decode(id, &bytes)
    }

    /// Overwrite every field of an existing asset. `ID` is kept.
    pub fn update<S: WorldStateStore>(
        ctx: &mut S,
        id: &str,
        fields: &AssetFields,
    ) -> Result<(), LedgerError> {
        if !Self::exists(&*ctx, id)? {
            return Err(LedgerError::NotFound(id.to_string()));
        }
        fields.validate()?;

        let bytes = encode(&fields.to_record(id))?;
        ctx.put_state(id, bytes)?;

        tracing::info!(asset_id = %id, "Asset updated");
        Ok(())
    }

    /// Remove the current value of `id`. Its history stays retrievable.
    pub fn delete<S: WorldStateStore>(ctx: &mut S, id: &str) -> Result<(), LedgerError> {
        if !Self::exists(&*ctx, id)? {
            return Err(LedgerError::NotFound(id.to_string()));
        }
        ctx.del_state(id)?;

        tracing::info!(asset_id = %id, "Asset deleted");
        Ok(())
    }

    /// Hand the asset to `new_owner`, returning the previous owner.
    ///
    /// All other fields are written back exactly as read.
    pub fn transfer<S: WorldStateStore>(
        ctx: &mut S,
        id: &str,
        new_owner: &str,
    ) -> Result<String, LedgerError> {
        let mut record = Self::read(&*ctx, id)?;
        let old_owner = std::mem::replace(&mut record.owner, new_owner.to_string());

        let bytes = encode(&record)?;
        ctx.put_state(id, bytes)?;

        tracing::info!(
            asset_id = %id,
            old_owner = %old_owner,
            new_owner = %new_owner,
            "Asset transferred",
        );
        Ok(old_owner)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Every asset in world state, in key order.
    pub fn list_all<S: WorldStateStore>(ctx: &S) -> Result<Vec<AssetRecord>, LedgerError> {
        Self::list_range(ctx, "", "")
    }

    /// Assets with keys in `[start_key, end_key)`, in key order. Empty bounds
    /// are open.
    ///
    /// A fault on any entry fails the whole call; no partial list is returned.
    pub fn list_range<S: WorldStateStore>(
        ctx: &S,
        start_key: &str,
        end_key: &str,
    ) -> Result<Vec<AssetRecord>, LedgerError> {
        tracing::debug!(start_key, end_key, "Listing assets by range");

        let mut records = Vec::new();
        for entry in ctx.state_by_range(start_key, end_key)? {
            let entry = entry?;
            records.push(decode(&entry.key, &entry.value)?);
        }
        Ok(records)
    }

    /// Every committed version of `id`, oldest first.
    ///
    /// Deletion markers carry a record holding only the `ID`.
    pub fn get_history<S: WorldStateStore>(
        ctx: &S,
        id: &str,
    ) -> Result<Vec<HistoryEntry>, LedgerError> {
        tracing::debug!(asset_id = %id, "Reading asset history");

        let mut entries = Vec::new();
        for modification in ctx.history_for_key(id)? {
            let modification = modification?;
            let record = if modification.value.is_empty() {
                AssetRecord::deleted(id)
            } else {
                decode(id, &modification.value)?
            };
            entries.push(HistoryEntry {
                record,
                tx_id: modification.tx_id,
                timestamp: modification.timestamp,
                is_delete: modification.is_delete,
            });
        }
        Ok(entries)
    }
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

fn encode(record: &AssetRecord) -> Result<Vec<u8>, LedgerError> {
    serde_json::to_vec(record).map_err(|source| LedgerError::Encode {
        id: record.id.clone(),
        source,
    })
}

fn decode(key: &str, bytes: &[u8]) -> Result<AssetRecord, LedgerError> {
    serde_json::from_slice(bytes).map_err(|source| LedgerError::Decode {
        key: key.to_string(),
        source,
    })
}
