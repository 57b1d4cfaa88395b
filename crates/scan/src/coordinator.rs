//! Batch scan coordinator.
//!
//! Games are processed one at a time on a background task. Path resolution,
//! measurement and catalog writes are blocking filesystem work and run on
//! the blocking pool; the storefront lookup is awaited directly.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Local, NaiveDate};
use gamesize_catalog::{CatalogStore, GameRecord};
use gamesize_disk_usage::{SizeOutcome, measure_path};
use gamesize_path_resolver::{IssueCategory, PathResolver, ResolvedTarget};
use gamesize_storefront::{EstimateOutcome, StorefrontEstimator};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::error::ScanError;
use crate::fields::{ScanValues, apply_scan_fields, clear_size_fields};
use crate::options::ScanOptions;
use crate::report::{ScanIssue, ScanReport};
use crate::types::{BatchOutcome, BatchSource, ClearOutcome, GameScanResult};

/// Report category for games whose size could not be measured.
pub const LOCAL_SIZE_ERROR: &str = "Error Calculating Local Size";

/// Report category for failed catalog writes.
pub const CATALOG_UPDATE_FAILED: &str = "Catalog Update Failed";

/// Report category for a failed storefront lookup.
pub fn online_lookup_failed(reason: &str) -> String {
    format!("Online Lookup Failed ({reason})")
}

#[derive(Default)]
struct BatchState {
    games_total: usize,
    results: Vec<GameScanResult>,
    report: ScanReport,
}

/// Runs scans and clears against a catalog.
pub struct ScanCoordinator {
    catalog: Arc<dyn CatalogStore>,
    resolver: Arc<PathResolver>,
    estimator: Arc<StorefrontEstimator>,
}

impl ScanCoordinator {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        resolver: PathResolver,
        estimator: Arc<StorefrontEstimator>,
    ) -> Self {
        Self {
            catalog,
            resolver: Arc::new(resolver),
            estimator,
        }
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogStore> {
        &self.catalog
    }

    pub fn estimator(&self) -> &Arc<StorefrontEstimator> {
        &self.estimator
    }

    /// Starts a batch in the background and calls `on_complete` once with
    /// the outcome.
    ///
    /// A fatal error (unknown platform, a panicking worker) ends the batch
    /// early; the outcome then carries the error together with whatever was
    /// reported up to that point.
    pub fn spawn_batch<F>(
        self: &Arc<Self>,
        source: BatchSource,
        options: ScanOptions,
        on_complete: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(BatchOutcome) + Send + 'static,
    {
        let this = Arc::clone(self);
        let context = source.to_string();

        tokio::spawn(async move {
            let state = Arc::new(Mutex::new(BatchState::default()));

            let worker = tokio::spawn({
                let this = Arc::clone(&this);
                let state = Arc::clone(&state);
                async move { this.process(source, options, &state).await }
            });

            let fatal = match worker.await {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(e.to_string()),
                Err(e) => Some(ScanError::from(e).to_string()),
            };
            if let Some(fatal) = &fatal {
                error!(context = %context, error = %fatal, "scan batch aborted");
            }

            let state = std::mem::take(&mut *state.lock().unwrap_or_else(PoisonError::into_inner));
            let outcome = BatchOutcome {
                context,
                games_total: state.games_total,
                results: state.results,
                report: state.report,
                fatal,
            };
            info!(summary = %outcome.summary(), "scan batch finished");
            on_complete(outcome);
        })
    }

    /// Runs a batch and waits for its outcome.
    pub async fn run_batch(self: &Arc<Self>, source: BatchSource, options: ScanOptions) -> BatchOutcome {
        let context = source.to_string();
        let (tx, rx) = oneshot::channel();
        self.spawn_batch(source, options, move |outcome| {
            let _ = tx.send(outcome);
        });
        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => BatchOutcome {
                context,
                games_total: 0,
                results: Vec::new(),
                report: ScanReport::new(),
                fatal: Some("scan task ended without a result".into()),
            },
        }
    }

    async fn process(
        &self,
        source: BatchSource,
        options: ScanOptions,
        state: &Mutex<BatchState>,
    ) -> Result<(), ScanError> {
        let requested = options;
        let options = options.effective(self.estimator.is_configured());
        if requested.fetch_estimate && !options.fetch_estimate {
            warn!("storefront estimate requested but no API key is configured; skipping lookups");
        }
        if !options.any_selected() {
            return Err(ScanError::NothingSelected);
        }

        let games = self.games_for(source).await?;
        let total = games.len();
        lock(state).games_total = total;
        info!(games = total, ?options, "scan batch started");

        for (i, game) in games.into_iter().enumerate() {
            debug!(index = i + 1, total, title = %game.title, "scanning game");
            let (result, issues) = self.scan_game(game, &options).await;
            let mut state = lock(state);
            for issue in issues {
                state.report.push(issue);
            }
            state.results.push(result);
        }
        Ok(())
    }

    async fn games_for(&self, source: BatchSource) -> Result<Vec<GameRecord>, ScanError> {
        match source {
            BatchSource::Games(games) => Ok(games),
            BatchSource::Platform(platform) => {
                let catalog = Arc::clone(&self.catalog);
                let games = tokio::task::spawn_blocking(move || catalog.list_games(&platform)).await??;
                Ok(games)
            }
        }
    }

    /// Scans one game: resolve, measure, estimate, write fields.
    ///
    /// Never fails; every problem becomes a report issue.
    pub async fn scan_game(
        &self,
        game: GameRecord,
        options: &ScanOptions,
    ) -> (GameScanResult, Vec<ScanIssue>) {
        let mut issues = Vec::new();
        let game = Arc::new(game);

        let target = self.resolve(&game).await;
        let (path, issue) = match &target {
            ResolvedTarget::Path(p) => (Some(p.clone()), None),
            ResolvedTarget::Unresolved { category, detail } => {
                debug!(title = %game.title, category = %category, detail = %detail, "path not resolved");
                (None, Some((*category, detail.clone())))
            }
        };

        let size = match &path {
            Some(p) => Some(measure(p.clone()).await),
            None => None,
        };
        let local_bytes = size.and_then(SizeOutcome::bytes);
        if let (Some(p), Some(size)) = (&path, size) {
            match size {
                SizeOutcome::Bytes(bytes) => debug!(title = %game.title, bytes, "measured"),
                _ => {
                    warn!(title = %game.title, path = %p.display(), outcome = %size, "measurement failed");
                    issues.push(ScanIssue::new(
                        LOCAL_SIZE_ERROR,
                        format!("{} (Path: {}, FS Error: {})", game.title, p.display(), size.code()),
                    ));
                }
            }
        }

        let estimate = if options.fetch_estimate {
            Some(self.estimator.estimate_required_space(&game.title).await)
        } else {
            None
        };
        let estimated = estimate.as_ref().and_then(EstimateOutcome::bytes).is_some();

        if let Some(reason) = estimate.as_ref().and_then(EstimateOutcome::failure_reason) {
            let detail = match &issue {
                Some((IssueCategory::StorefrontGame, detail)) => detail.clone(),
                _ => game.title.clone(),
            };
            issues.push(ScanIssue::new(online_lookup_failed(reason), detail));
        }

        if let Some((category, detail)) = &issue {
            let reported_as_lookup_failure = *category == IssueCategory::StorefrontGame && estimate.is_some();
            if !estimated && !reported_as_lookup_failure {
                issues.push(ScanIssue::new(category.label(), detail.clone()));
            }
        }

        let values = ScanValues {
            local_bytes,
            estimate_bytes: estimate.as_ref().and_then(EstimateOutcome::bytes),
            scanned_on: today(),
        };
        let fields_changed = match self.write_fields(Arc::clone(&game), *options, values).await {
            Ok(changed) => changed,
            Err(e) => {
                warn!(title = %game.title, error = %e, "catalog update failed");
                issues.push(ScanIssue::new(CATALOG_UPDATE_FAILED, format!("{} ({e})", game.title)));
                false
            }
        };

        let result = GameScanResult {
            game_id: game.id.clone(),
            title: game.title.clone(),
            path,
            issue: issue.map(|(category, _)| category),
            size,
            estimate,
            fields_changed,
        };
        (result, issues)
    }

    async fn resolve(&self, game: &Arc<GameRecord>) -> ResolvedTarget {
        let resolver = Arc::clone(&self.resolver);
        let record = Arc::clone(game);
        match tokio::task::spawn_blocking(move || resolver.resolve(&record)).await {
            Ok(target) => target,
            Err(e) => {
                error!(title = %game.title, error = %e, "path resolution panicked");
                ResolvedTarget::Unresolved {
                    category: IssueCategory::InternalError,
                    detail: format!("{} (Error: {e})", game.title),
                }
            }
        }
    }

    async fn write_fields(
        &self,
        game: Arc<GameRecord>,
        options: ScanOptions,
        values: ScanValues,
    ) -> Result<bool, ScanError> {
        let catalog = Arc::clone(&self.catalog);
        let changed = tokio::task::spawn_blocking(move || {
            let changed = apply_scan_fields(catalog.as_ref(), &game.id, &options, &values)?;
            if changed {
                catalog.persist()?;
            }
            Ok::<_, ScanError>(changed)
        })
        .await??;
        Ok(changed)
    }

    /// Removes every scanner-owned field from the games in `source`.
    pub async fn clear_fields(&self, source: BatchSource) -> Result<ClearOutcome, ScanError> {
        let games = self.games_for(source).await?;
        let catalog = Arc::clone(&self.catalog);
        let outcome = tokio::task::spawn_blocking(move || {
            let mut cleared = 0;
            for game in &games {
                match clear_size_fields(catalog.as_ref(), &game.id) {
                    Ok(true) => cleared += 1,
                    Ok(false) => {}
                    Err(e) => warn!(title = %game.title, error = %e, "could not clear size fields"),
                }
            }
            if cleared > 0 {
                catalog.persist()?;
            }
            Ok::<_, ScanError>(ClearOutcome {
                games: games.len(),
                cleared,
            })
        })
        .await??;
        info!(games = outcome.games, cleared = outcome.cleared, "size fields cleared");
        Ok(outcome)
    }
}

async fn measure(path: PathBuf) -> SizeOutcome {
    match tokio::task::spawn_blocking(move || measure_path(&path)).await {
        Ok(size) => size,
        Err(e) => {
            error!(error = %e, "measurement panicked");
            SizeOutcome::ComputeError
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn lock(state: &Mutex<BatchState>) -> std::sync::MutexGuard<'_, BatchState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
