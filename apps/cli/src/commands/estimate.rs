use std::process::ExitCode;

use gamesize_disk_usage::format_bytes;
use gamesize_storefront::EstimateOutcome;

use super::EstimateArgs;
use crate::app::App;

pub async fn run(app: &App, args: EstimateArgs) -> anyhow::Result<ExitCode> {
    match app.estimator().estimate_required_space(&args.title).await {
        EstimateOutcome::Bytes(bytes) => println!("{}: {}", args.title, format_bytes(bytes)),
        EstimateOutcome::Failure(reason) => println!("{}: lookup failed ({reason})", args.title),
    }
    Ok(ExitCode::SUCCESS)
}
