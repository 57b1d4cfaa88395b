//! Wiring of catalog, resolver, estimator and coordinator.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use gamesize_catalog::{CatalogStore, GameRecord, JsonCatalog};
use gamesize_path_resolver::PathResolver;
use gamesize_scan::{BatchSource, ScanCoordinator};
use gamesize_storefront::{EstimateCache, GameMetadataApi, RawgClient, StorefrontEstimator};

use crate::config::Config;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Everything a command needs.
pub struct App {
    pub catalog: Arc<JsonCatalog>,
    pub coordinator: Arc<ScanCoordinator>,
}

impl App {
    /// Opens the catalog and builds the scan pipeline from `config`.
    ///
    /// `config_dir` is searched for the API key file; `catalog_override`
    /// replaces the configured catalog path.
    pub fn open(config: &Config, config_dir: &Path, catalog_override: Option<PathBuf>) -> anyhow::Result<Self> {
        let catalog_path = catalog_override.unwrap_or_else(|| config.catalog_path.clone());
        let catalog = Arc::new(
            JsonCatalog::open(&catalog_path)
                .with_context(|| format!("failed to open catalog {}", catalog_path.display()))?,
        );

        let mut resolver = PathResolver::new();
        if let Some(dir) = &config.library_dir {
            resolver = resolver.with_base_dir(dir);
        }

        let estimator = Arc::new(build_estimator(config, config_dir)?);
        let coordinator = Arc::new(ScanCoordinator::new(
            Arc::clone(&catalog) as Arc<dyn CatalogStore>,
            resolver,
            estimator,
        ));

        Ok(Self { catalog, coordinator })
    }

    pub fn estimator(&self) -> &Arc<StorefrontEstimator> {
        self.coordinator.estimator()
    }

    /// The games of `platform`, optionally narrowed to `ids`.
    pub fn select(&self, platform: &str, ids: &[String]) -> anyhow::Result<BatchSource> {
        if ids.is_empty() {
            // Validate early so a typo is reported before anything runs.
            self.catalog.list_games(platform)?;
            return Ok(BatchSource::Platform(platform.to_string()));
        }
        let games = self.catalog.list_games(platform)?;
        let mut selected: Vec<GameRecord> = Vec::with_capacity(ids.len());
        for id in ids {
            let game = games
                .iter()
                .find(|g| &g.id == id)
                .with_context(|| format!("no game with id '{id}' on platform '{platform}'"))?;
            selected.push(game.clone());
        }
        Ok(BatchSource::Games(selected))
    }
}

fn build_estimator(config: &Config, config_dir: &Path) -> anyhow::Result<StorefrontEstimator> {
    let ttl = Duration::from_secs(config.estimate_cache_days.saturating_mul(SECS_PER_DAY));
    let cache = Arc::new(EstimateCache::with_ttl(ttl));

    let Some(key) = config.api_key(config_dir) else {
        tracing::debug!("no RAWG API key configured; storefront estimates disabled");
        return Ok(StorefrontEstimator::new(None, cache));
    };
    let client = RawgClient::new(&key)?.with_base_url(config.rawg_base_url.clone());
    let api: Arc<dyn GameMetadataApi> = Arc::new(client);
    Ok(StorefrontEstimator::new(Some(api), cache))
}
