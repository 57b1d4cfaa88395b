//! Writing scan results to catalog fields.

use chrono::NaiveDate;
use gamesize_catalog::{
    ALL_SIZE_FIELDS, CatalogError, CatalogStore, EST_REQUIRED_SPACE, GAME_SIZE, GAME_SIZE_TIER,
    LAST_SCANNED, set_field_if_changed,
};
use gamesize_disk_usage::{format_bytes, size_tier};

use crate::options::ScanOptions;

/// Date format of the last-scanned field.
pub const LAST_SCANNED_FORMAT: &str = "%m/%d/%Y";

/// Values produced by scanning one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanValues {
    /// Measured size, `None` when nothing could be measured.
    pub local_bytes: Option<u64>,
    /// Storefront estimate, `None` when the lookup failed or was skipped.
    pub estimate_bytes: Option<u64>,
    pub scanned_on: NaiveDate,
}

/// Applies the selected fields for one game. Returns `true` if any field
/// changed.
///
/// A selected field without a value is removed so stale data from an
/// earlier scan does not linger. Fields that were not selected are left
/// alone.
pub fn apply_scan_fields(
    store: &dyn CatalogStore,
    game_id: &str,
    options: &ScanOptions,
    values: &ScanValues,
) -> Result<bool, CatalogError> {
    let mut changed = false;

    if options.store_game_size {
        changed |= set_or_remove(store, game_id, GAME_SIZE, values.local_bytes.map(format_bytes))?;
    }
    if options.store_size_tier {
        let tier = values.local_bytes.map(|b| size_tier(b).to_string());
        changed |= set_or_remove(store, game_id, GAME_SIZE_TIER, tier)?;
    }
    if options.fetch_estimate {
        let estimate = values.estimate_bytes.map(format_bytes);
        changed |= set_or_remove(store, game_id, EST_REQUIRED_SPACE, estimate)?;
    }
    if options.store_last_scanned {
        let date = values.scanned_on.format(LAST_SCANNED_FORMAT).to_string();
        changed |= set_field_if_changed(store, game_id, LAST_SCANNED, &date)?;
    }

    Ok(changed)
}

fn set_or_remove(
    store: &dyn CatalogStore,
    game_id: &str,
    name: &str,
    value: Option<String>,
) -> Result<bool, CatalogError> {
    match value {
        Some(value) => set_field_if_changed(store, game_id, name, &value),
        None => store.remove_field(game_id, name),
    }
}

/// Removes every field the scanner owns. Returns `true` if any existed.
pub fn clear_size_fields(store: &dyn CatalogStore, game_id: &str) -> Result<bool, CatalogError> {
    let mut changed = false;
    for name in ALL_SIZE_FIELDS {
        changed |= store.remove_field(game_id, name)?;
    }
    Ok(changed)
}
