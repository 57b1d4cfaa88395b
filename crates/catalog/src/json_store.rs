//! File-backed catalog store.
//!
//! The catalog is a single JSON document:
//!
//! ```json
//! { "platforms": [ { "name": "Windows", "games": [
//!     { "id": "g1", "title": "Doom", "applicationPath": "...", "rootFolder": "...",
//!       "customFields": { "Game Size": "1.2 GB" } } ] } ] }
//! ```
//!
//! Field changes stay in memory until [`CatalogStore::persist`], which
//! writes the document to a temporary file and renames it over the existing file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;
use crate::store::CatalogStore;
use crate::types::GameRecord;

/// Root of the catalog file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub platforms: Vec<CatalogPlatform>,
}

/// A platform and its games.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogPlatform {
    pub name: String,
    #[serde(default)]
    pub games: Vec<CatalogGame>,
}

/// A stored game entry with its custom fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogGame {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub application_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub root_folder: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, String>,
}

impl CatalogGame {
    fn to_record(&self, platform: &str) -> GameRecord {
        GameRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            application_path: self.application_path.clone(),
            root_folder: self.root_folder.clone(),
            platform: platform.to_string(),
        }
    }
}

/// Catalog store backed by a JSON file.
pub struct JsonCatalog {
    path: PathBuf,
    document: RwLock<CatalogDocument>,
    dirty: AtomicBool,
    /// Held for a whole save; writers share one temporary file.
    save_lock: Mutex<()>,
}

impl JsonCatalog {
    /// Loads the catalog from `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let data = std::fs::read_to_string(&path)?;
        let document: CatalogDocument = serde_json::from_str(&data)?;
        debug!(
            path = %path.display(),
            platforms = document.platforms.len(),
            "loaded catalog"
        );
        Ok(Self::from_document(path, document))
    }

    /// Wraps an in-memory document that will be written to `path` on persist.
    pub fn from_document(path: impl Into<PathBuf>, document: CatalogDocument) -> Self {
        Self {
            path: path.into(),
            document: RwLock::new(document),
            dirty: AtomicBool::new(false),
            save_lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Returns a copy of the current document.
    pub fn snapshot(&self) -> CatalogDocument {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogDocument> {
        self.document.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogDocument> {
        self.document.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_game_mut<T>(
        &self,
        game_id: &str,
        f: impl FnOnce(&mut CatalogGame) -> T,
    ) -> Result<T, CatalogError> {
        let mut doc = self.write();
        doc.platforms
            .iter_mut()
            .flat_map(|p| p.games.iter_mut())
            .find(|g| g.id == game_id)
            .map(f)
            .ok_or_else(|| CatalogError::UnknownGame(game_id.to_string()))
    }
}

impl CatalogStore for JsonCatalog {
    fn list_platforms(&self) -> Result<Vec<String>, CatalogError> {
        let mut names: Vec<String> = self.read().platforms.iter().map(|p| p.name.clone()).collect();
        names.sort_by_key(|n| n.to_lowercase());
        Ok(names)
    }

    fn list_games(&self, platform: &str) -> Result<Vec<GameRecord>, CatalogError> {
        let doc = self.read();
        let entry = doc
            .platforms
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(platform))
            .ok_or_else(|| CatalogError::UnknownPlatform(platform.to_string()))?;
        Ok(entry.games.iter().map(|g| g.to_record(&entry.name)).collect())
    }

    fn read_field(&self, game_id: &str, name: &str) -> Result<Option<String>, CatalogError> {
        let doc = self.read();
        doc.platforms
            .iter()
            .flat_map(|p| p.games.iter())
            .find(|g| g.id == game_id)
            .map(|g| g.custom_fields.get(name).cloned())
            .ok_or_else(|| CatalogError::UnknownGame(game_id.to_string()))
    }

    fn write_field(&self, game_id: &str, name: &str, value: &str) -> Result<(), CatalogError> {
        self.with_game_mut(game_id, |g| {
            g.custom_fields.insert(name.to_string(), value.to_string());
        })?;
        self.dirty.store(true, Ordering::Release);
        Ok(())
    }

    fn remove_field(&self, game_id: &str, name: &str) -> Result<bool, CatalogError> {
        let removed = self.with_game_mut(game_id, |g| g.custom_fields.remove(name).is_some())?;
        if removed {
            self.dirty.store(true, Ordering::Release);
        }
        Ok(removed)
    }

    fn persist(&self) -> Result<(), CatalogError> {
        let _saving = self.save_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return Ok(());
        }
        let json = serde_json::to_string_pretty(&*self.read())?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let written = std::fs::write(&tmp, json).and_then(|()| std::fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            self.dirty.store(true, Ordering::Release);
            return Err(e.into());
        }
        debug!(path = %self.path.display(), "persisted catalog");
        Ok(())
    }
}
