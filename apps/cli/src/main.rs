//! gamesize command-line entry point.

mod app;
mod commands;
mod config;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::commands::{ClearArgs, EstimateArgs, ScanArgs};
use crate::config::Config;

/// Measure catalogued games and record their disk footprint.
#[derive(Debug, Parser)]
#[command(name = "gamesize")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/gamesize/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog file, overriding the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Debug logging for gamesize crates
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Append log output to a file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List platform names in the catalog
    Platforms,
    /// Measure games and write size fields
    Scan(ScanArgs),
    /// Remove all size fields from games
    Clear(ClearArgs),
    /// Look up the storefront estimate for a title
    Estimate(EstimateArgs),
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let default = if verbose { "info,gamesize=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting gamesize");

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let config = Config::load(&config_path)?;
    let config_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(config::config_dir);

    let app = App::open(&config, &config_dir, cli.catalog)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        match cli.command {
            Command::Platforms => commands::platforms::run(&app),
            Command::Scan(args) => commands::scan::run(&app, &config, args).await,
            Command::Clear(args) => commands::clear::run(&app, args).await,
            Command::Estimate(args) => commands::estimate::run(&app, args).await,
        }
    })
}
