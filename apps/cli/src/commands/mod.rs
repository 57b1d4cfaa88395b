//! Subcommand implementations.

use clap::Args;

pub mod clear;
pub mod estimate;
pub mod platforms;
pub mod scan;

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Platform to scan
    #[arg(long, short)]
    pub platform: String,

    /// Only these game ids (repeatable)
    #[arg(long = "game", value_name = "ID")]
    pub games: Vec<String>,

    /// Store the formatted size
    #[arg(long, overrides_with = "no_size")]
    pub size: bool,

    /// Do not store the formatted size
    #[arg(long, overrides_with = "size")]
    pub no_size: bool,

    /// Store the size tier
    #[arg(long)]
    pub tier: bool,

    /// Store today's date as the last scan date
    #[arg(long)]
    pub last_scanned: bool,

    /// Look up and store the storefront estimate
    #[arg(long)]
    pub estimate: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Platform to clear
    #[arg(long, short)]
    pub platform: String,

    /// Only these game ids (repeatable)
    #[arg(long = "game", value_name = "ID")]
    pub games: Vec<String>,

    /// Do not ask for confirmation
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct EstimateArgs {
    /// Game title to look up
    pub title: String,
}
