//! The catalog store trait implemented by the host application.

use crate::error::CatalogError;
use crate::types::GameRecord;

/// Read/write access to the host catalog.
///
/// Field writes are buffered by the store until [`CatalogStore::persist`]
/// is called. Implementations must be usable from a background task.
pub trait CatalogStore: Send + Sync {
    /// Returns all platform names, sorted.
    fn list_platforms(&self) -> Result<Vec<String>, CatalogError>;

    /// Returns the games registered for a platform.
    fn list_games(&self, platform: &str) -> Result<Vec<GameRecord>, CatalogError>;

    /// Reads a named custom field.
    fn read_field(&self, game_id: &str, name: &str) -> Result<Option<String>, CatalogError>;

    /// Writes a named custom field, creating it if needed.
    fn write_field(&self, game_id: &str, name: &str, value: &str) -> Result<(), CatalogError>;

    /// Removes a named custom field. Returns `true` if it existed.
    fn remove_field(&self, game_id: &str, name: &str) -> Result<bool, CatalogError>;

    /// Flushes pending changes.
    fn persist(&self) -> Result<(), CatalogError>;
}

/// Writes `value` unless the field already holds it.
///
/// Returns `true` when the catalog was changed.
pub fn set_field_if_changed(
    store: &dyn CatalogStore,
    game_id: &str,
    name: &str,
    value: &str,
) -> Result<bool, CatalogError> {
    if store.read_field(game_id, name)?.as_deref() == Some(value) {
        return Ok(false);
    }
    store.write_field(game_id, name, value)?;
    Ok(true)
}
