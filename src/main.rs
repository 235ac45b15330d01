mod app;
mod cli;
mod data;
mod ui;

use std::io;

use anyhow::Result;
use app::RosterApp;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = RosterApp::new(cli.file);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = app.run(&mut stdin.lock(), &mut stdout.lock())?;
    log::debug!("run finished: {outcome:?}");
    Ok(())
}
