mod app;
mod cli;
mod color;
mod config;
mod db;
mod error;
mod event;
mod icon;
mod interactor;
mod logging;
mod remove;
mod running;
mod settings;
mod statistics;
mod time_format;
mod tui;
mod types;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli_opts = cli::Cli::parse();
    let config = config::Config::resolve(cli_opts.db.clone(), cli_opts.log_level.clone());
    if let Err(err) = logging::enable_logging(&config.log_dir, &config.log_level) {
        eprintln!("logging disabled: {err}");
    }
    tracing::info!(db = %config.db_path.display(), "starting stt");

    let conn = db::init(&config.db_path)?;
    if let Some(command) = cli_opts.command {
        return cli::run(command, &conn);
    }

    let mut app = app::App::new(conn);
    let mut terminal = tui::init()?;
    let result = event::run(&mut app, &mut terminal);

    tui::restore()?;

    result
}
