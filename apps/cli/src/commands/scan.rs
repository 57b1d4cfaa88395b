use std::process::ExitCode;

use gamesize_scan::{BatchOutcome, ScanOptions};

use super::ScanArgs;
use crate::app::App;
use crate::config::Config;

/// Applies command-line flags over the configured defaults.
fn options_from(defaults: ScanOptions, args: &ScanArgs) -> ScanOptions {
    let store_game_size = if args.no_size {
        false
    } else {
        args.size || defaults.store_game_size
    };
    ScanOptions {
        store_game_size,
        store_size_tier: args.tier || defaults.store_size_tier,
        store_last_scanned: args.last_scanned || defaults.store_last_scanned,
        fetch_estimate: args.estimate || defaults.fetch_estimate,
    }
}

pub async fn run(app: &App, config: &Config, args: ScanArgs) -> anyhow::Result<ExitCode> {
    let requested = options_from(config.scan, &args);
    let configured = app.estimator().is_configured();
    if requested.fetch_estimate && !configured {
        eprintln!("No RAWG API key configured; skipping storefront estimates.");
    }
    if !requested.effective(configured).any_selected() {
        eprintln!("No fields selected to store. Scan aborted.");
        return Ok(ExitCode::SUCCESS);
    }

    let source = app.select(&args.platform, &args.games)?;
    let outcome = app.coordinator.run_batch(source, requested).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }

    Ok(if outcome.fatal.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_outcome(outcome: &BatchOutcome) {
    let rendered = outcome.report.render();
    if !rendered.is_empty() {
        print!("{rendered}");
    }
    println!("{}", outcome.summary());
}
