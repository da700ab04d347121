mod app;
mod cli;
mod color;
mod db;
mod event;
mod logging;
mod progress;
mod store;
mod tui;
mod types;
mod ui;
mod wheel;

use anyhow::Result;
use clap::Parser;
use ratatui::layout::Rect;

fn main() -> Result<()> {
    let cli_opts = cli::Cli::parse();
    logging::init_logging(&db::data_dir().join("notime.log"));

    let db_path = cli_opts.db.unwrap_or_else(db::default_db_path);
    let conn = db::init(&db_path)?;
    if let Some(command) = cli_opts.command {
        return cli::run(command, &conn);
    }

    let (width, height) = crossterm::terminal::size()?;
    let mut app = app::App::new(conn, Rect::new(0, 0, width, height));
    let mut terminal = tui::init()?;
    let result = event::run(&mut app, &mut terminal);

    tui::restore()?;
    if let Err(err) = &result {
        log::error!("{err:#}");
    }

    result
}
