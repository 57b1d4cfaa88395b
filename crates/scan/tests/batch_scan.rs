//! End-to-end batch over a JSON catalog on disk.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use gamesize_catalog::{
    CatalogDocument, CatalogGame, CatalogPlatform, CatalogStore, EST_REQUIRED_SPACE, GAME_SIZE,
    GAME_SIZE_TIER, JsonCatalog,
};
use gamesize_path_resolver::PathResolver;
use gamesize_scan::{BatchOutcome, BatchSource, ScanCoordinator, ScanOptions};
use gamesize_storefront::types::{GameDetails, SearchResponse};
use gamesize_storefront::{
    EstimateCache, EstimateOutcome, Error, GameMetadataApi, SearchQuery, StorefrontEstimator,
};
use tokio::sync::oneshot;

fn catalog_game(id: &str, title: &str, app: &str) -> CatalogGame {
    CatalogGame {
        id: id.into(),
        title: title.into(),
        application_path: app.into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn three_game_platform_scan() {
    let dir = tempfile::tempdir().unwrap();
    let install = dir.path().join("library").join("Hollow Knight");
    std::fs::create_dir_all(&install).unwrap();
    std::fs::write(install.join("hollow_knight.exe"), vec![0u8; 3000]).unwrap();
    std::fs::write(install.join("data.pak"), vec![0u8; 1000]).unwrap();

    let catalog_path = dir.path().join("catalog.json");
    let doc = CatalogDocument {
        platforms: vec![CatalogPlatform {
            name: "Windows".into(),
            games: vec![
                catalog_game("portal", "Portal 2", "steam://rungameid/620"),
                catalog_game("ghost", "Ghost Game", "C:/missing/ghost.exe"),
                catalog_game(
                    "hk",
                    "Hollow Knight",
                    install.join("hollow_knight.exe").to_str().unwrap(),
                ),
            ],
        }],
    };
    std::fs::write(&catalog_path, serde_json::to_string(&doc).unwrap()).unwrap();

    let catalog = Arc::new(JsonCatalog::open(&catalog_path).unwrap());
    let coordinator = Arc::new(ScanCoordinator::new(
        catalog,
        PathResolver::new(),
        Arc::new(StorefrontEstimator::disabled()),
    ));
    let options = ScanOptions {
        store_size_tier: true,
        ..Default::default()
    };

    let outcome = coordinator
        .run_batch(BatchSource::Platform("Windows".into()), options)
        .await;

    assert!(outcome.fatal.is_none(), "{:?}", outcome.fatal);
    assert_eq!(outcome.games_total, 3);
    let measured: Vec<_> = outcome.results.iter().filter(|r| r.path.is_some()).collect();
    assert_eq!(measured.len(), 1);
    assert_eq!(measured[0].game_id, "hk");
    assert_eq!(measured[0].size_code(), 4000);

    let report = &outcome.report;
    assert_eq!(report.issue_count(), 2);
    assert_eq!(
        report.get("Storefront Game").unwrap(),
        ["Portal 2 (Launcher URL: steam://rungameid/620)".to_string()]
    );
    assert_eq!(report.get("Application Path Not Found").unwrap().len(), 1);
    assert!(report.render().contains("--- Storefront Game (1 game(s)) ---\n"));

    // Written through to disk.
    let reloaded = JsonCatalog::open(&catalog_path).unwrap();
    assert_eq!(reloaded.read_field("hk", GAME_SIZE).unwrap().as_deref(), Some("3.9 KB"));
    assert_eq!(
        reloaded.read_field("hk", GAME_SIZE_TIER).unwrap().as_deref(),
        Some("31) < 5 KB")
    );
    assert_eq!(reloaded.read_field("portal", GAME_SIZE).unwrap(), None);
}

#[tokio::test]
async fn clear_then_rescan_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let install = dir.path().join("Celeste");
    std::fs::create_dir_all(&install).unwrap();
    std::fs::write(install.join("Celeste.exe"), vec![0u8; 2048]).unwrap();

    let catalog_path = dir.path().join("catalog.json");
    let doc = CatalogDocument {
        platforms: vec![CatalogPlatform {
            name: "Windows".into(),
            games: vec![catalog_game(
                "celeste",
                "Celeste",
                install.join("Celeste.exe").to_str().unwrap(),
            )],
        }],
    };
    std::fs::write(&catalog_path, serde_json::to_string(&doc).unwrap()).unwrap();

    let catalog = Arc::new(JsonCatalog::open(&catalog_path).unwrap());
    let coordinator = Arc::new(ScanCoordinator::new(
        Arc::clone(&catalog) as Arc<dyn CatalogStore>,
        PathResolver::new(),
        Arc::new(StorefrontEstimator::disabled()),
    ));

    let outcome = coordinator
        .run_batch(BatchSource::Platform("Windows".into()), ScanOptions::default())
        .await;
    assert!(outcome.report.is_empty());
    assert_eq!(catalog.read_field("celeste", GAME_SIZE).unwrap().as_deref(), Some("2 KB"));

    let cleared = coordinator
        .clear_fields(BatchSource::Platform("Windows".into()))
        .await
        .unwrap();
    assert_eq!(cleared.cleared, 1);
    let reloaded = JsonCatalog::open(&catalog_path).unwrap();
    assert_eq!(reloaded.read_field("celeste", GAME_SIZE).unwrap(), None);
}

/// Finds every title except "Ghost Game", always with 8 GB of PC storage.
#[derive(Default)]
struct CountingApi {
    searches: AtomicUsize,
}

impl GameMetadataApi for CountingApi {
    fn search_games(
        &self,
        query: &SearchQuery,
    ) -> Pin<Box<dyn Future<Output = Result<SearchResponse, Error>> + Send + '_>> {
        let json = if query.search.contains("Ghost") {
            r#"{"count":0,"results":[]}"#
        } else {
            r#"{"count":1,"results":[{"id":1,"slug":"some-game","name":"Some Game"}]}"#
        };
        let response = serde_json::from_str::<SearchResponse>(json).map_err(Error::from);
        Box::pin(async move {
            self.searches.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            response
        })
    }

    fn game_details(
        &self,
        _slug: &str,
    ) -> Pin<Box<dyn Future<Output = Result<GameDetails, Error>> + Send + '_>> {
        let details = serde_json::from_str::<GameDetails>(
            r#"{"platforms":[{"platform":{"id":4,"name":"PC"},
                "requirements":{"minimum":"Storage: 8 GB available space"}}]}"#,
        )
        .map_err(Error::from);
        Box::pin(async move {
            tokio::task::yield_now().await;
            details
        })
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_batches_on_one_coordinator() {
    let dir = tempfile::tempdir().unwrap();
    let install = dir.path().join("library").join("Hollow Knight");
    std::fs::create_dir_all(&install).unwrap();
    std::fs::write(install.join("hollow_knight.exe"), vec![0u8; 3000]).unwrap();
    std::fs::write(install.join("data.pak"), vec![0u8; 1000]).unwrap();

    let catalog_path = dir.path().join("catalog.json");
    let doc = CatalogDocument {
        platforms: vec![CatalogPlatform {
            name: "Windows".into(),
            games: vec![
                catalog_game("portal", "Portal 2", "steam://rungameid/620"),
                catalog_game("ghost", "Ghost Game", "C:/missing/ghost.exe"),
                catalog_game(
                    "hk",
                    "Hollow Knight",
                    install.join("hollow_knight.exe").to_str().unwrap(),
                ),
            ],
        }],
    };
    std::fs::write(&catalog_path, serde_json::to_string(&doc).unwrap()).unwrap();

    let api = Arc::new(CountingApi::default());
    let estimator = StorefrontEstimator::new(
        Some(api.clone() as Arc<dyn GameMetadataApi>),
        Arc::new(EstimateCache::new()),
    );
    let coordinator = Arc::new(ScanCoordinator::new(
        Arc::new(JsonCatalog::open(&catalog_path).unwrap()),
        PathResolver::new(),
        Arc::new(estimator),
    ));
    let options = ScanOptions {
        fetch_estimate: true,
        ..Default::default()
    };

    let start = |coordinator: &Arc<ScanCoordinator>| {
        let (tx, rx) = oneshot::channel::<BatchOutcome>();
        let handle = coordinator.spawn_batch(
            BatchSource::Platform("Windows".into()),
            options,
            move |outcome| {
                let _ = tx.send(outcome);
            },
        );
        (handle, rx)
    };
    let (first_task, first) = start(&coordinator);
    let (second_task, second) = start(&coordinator);
    first_task.await.unwrap();
    second_task.await.unwrap();
    let first = first.await.unwrap();
    let second = second.await.unwrap();

    for outcome in [&first, &second] {
        assert!(outcome.fatal.is_none(), "{:?}", outcome.fatal);
        assert_eq!(outcome.games_processed(), 3);
        assert_eq!(outcome.report.issue_count(), 2);
        assert_eq!(
            outcome.report.get("Online Lookup Failed (not found)").unwrap(),
            ["Ghost Game".to_string()]
        );
        assert_eq!(outcome.report.get("Application Path Not Found").unwrap().len(), 1);
        let hk = outcome.results.iter().find(|r| r.game_id == "hk").unwrap();
        assert_eq!(hk.size_code(), 4000);
        assert_eq!(hk.estimate, Some(EstimateOutcome::Bytes(8 * 1024 * 1024 * 1024)));
    }
    assert_eq!(first.report, second.report);

    // Three titles, each looked up at most once per batch.
    let searches = api.searches.load(Ordering::SeqCst);
    assert!((3..=6).contains(&searches), "{searches} searches");
    assert_eq!(coordinator.estimator().cache().len(), 3);

    let reloaded = JsonCatalog::open(&catalog_path).unwrap();
    assert_eq!(reloaded.read_field("hk", GAME_SIZE).unwrap().as_deref(), Some("3.9 KB"));
    assert_eq!(
        reloaded.read_field("hk", EST_REQUIRED_SPACE).unwrap().as_deref(),
        Some("8 GB")
    );
    assert_eq!(
        reloaded.read_field("portal", EST_REQUIRED_SPACE).unwrap().as_deref(),
        Some("8 GB")
    );
    assert_eq!(reloaded.read_field("ghost", EST_REQUIRED_SPACE).unwrap(), None);
    assert_eq!(reloaded.read_field("portal", GAME_SIZE).unwrap(), None);
}
