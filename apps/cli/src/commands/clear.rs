use std::io::{BufRead, Write};
use std::process::ExitCode;

use gamesize_catalog::ALL_SIZE_FIELDS;
use gamesize_scan::BatchSource;

use super::ClearArgs;
use crate::app::App;

pub async fn run(app: &App, args: ClearArgs) -> anyhow::Result<ExitCode> {
    let source = app.select(&args.platform, &args.games)?;

    if !args.yes && !confirm(&source)? {
        eprintln!("Nothing cleared.");
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = app.coordinator.clear_fields(source).await?;
    println!(
        "Cleared size fields from {} of {} game(s).",
        outcome.cleared, outcome.games
    );
    Ok(ExitCode::SUCCESS)
}

fn confirm(source: &BatchSource) -> anyhow::Result<bool> {
    let mut stderr = std::io::stderr();
    write!(
        stderr,
        "Remove {} from {source}? [y/N] ",
        ALL_SIZE_FIELDS.join(", ")
    )?;
    stderr.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
