//! CLI configuration.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/gamesize/config.toml`
//! - Windows: `%APPDATA%/gamesize/config.toml`
//!
//! The RAWG key may also be dropped into `RAWG_API_KEY.txt` next to the
//! config file.

use std::path::{Path, PathBuf};

use gamesize_scan::ScanOptions;
use gamesize_storefront::client::{DEFAULT_BASE_URL, PLACEHOLDER_KEY};
use serde::{Deserialize, Serialize};

/// Name of the optional key file next to the config.
pub const KEY_FILE_NAME: &str = "RAWG_API_KEY.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON catalog file.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Base directory for relative catalog paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_dir: Option<PathBuf>,

    /// RAWG API key; empty disables storefront estimates.
    #[serde(default)]
    pub rawg_api_key: String,

    #[serde(default = "default_base_url")]
    pub rawg_base_url: String,

    /// How long estimate lookups are cached.
    #[serde(default = "default_cache_days")]
    pub estimate_cache_days: u64,

    /// Fields written by `scan` unless overridden on the command line.
    #[serde(default)]
    pub scan: ScanOptions,
}

fn default_catalog_path() -> PathBuf {
    config_dir().join("catalog.json")
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_cache_days() -> u64 {
    7
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            library_dir: None,
            rawg_api_key: String::new(),
            rawg_base_url: default_base_url(),
            estimate_cache_days: default_cache_days(),
            scan: ScanOptions::default(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or writes and returns the defaults
    /// if the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::debug!(path = %path.display(), "configuration loaded");
            Ok(config)
        } else {
            let config = Config::default();
            config.save(path)?;
            tracing::info!(path = %path.display(), "created default configuration");
            Ok(config)
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        // The file may hold an API key.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// The RAWG key from the config, falling back to the key file in
    /// `config_dir`. Blank values and the placeholder count as absent.
    pub fn api_key(&self, config_dir: &Path) -> Option<String> {
        if let Some(key) = usable_key(&self.rawg_api_key) {
            return Some(key);
        }
        let file = config_dir.join(KEY_FILE_NAME);
        match std::fs::read_to_string(&file) {
            Ok(content) => {
                let key = usable_key(&content);
                if key.is_some() {
                    tracing::debug!(path = %file.display(), "using API key file");
                }
                key
            }
            Err(_) => None,
        }
    }
}

fn usable_key(raw: &str) -> Option<String> {
    let key = raw.trim();
    (!key.is_empty() && key != PLACEHOLDER_KEY).then(|| key.to_string())
}

/// Directory holding the config file, catalog and key file.
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata).join("gamesize")
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".config").join("gamesize")
    }
}

/// Default config file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}
