use std::process::ExitCode;

use gamesize_catalog::CatalogStore;

use crate::app::App;

pub fn run(app: &App) -> anyhow::Result<ExitCode> {
    let platforms = app.catalog.list_platforms()?;
    if platforms.is_empty() {
        eprintln!("The catalog has no platforms.");
    }
    for name in platforms {
        let games = app.catalog.list_games(&name)?.len();
        println!("{name} ({games} game(s))");
    }
    Ok(ExitCode::SUCCESS)
}
