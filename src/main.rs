mod action;
mod app;
mod cli;
mod components;
mod config;
mod content;
mod error;
mod event;
mod fs;
mod geometry;
mod highlight;
mod logging;
mod session;
mod state;
mod theme;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;

use crate::app::App;
use crate::cli::Cli;
use crate::event::CrosstermEvents;
use crate::fs::OsFileSystem;
use crate::session::Session;
use crate::state::browser::load_file;
use crate::state::{DirectoryCursor, LoadedFile};
use crate::theme::Theme;
use crate::tui::TerminalGuard;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restore so the user gets their shell back
        let _ = tui::restore();
        default_hook(panic_info);
    }));
}

fn load_cli_file(path: &Path) -> Result<LoadedFile> {
    load_file(&OsFileSystem, path).with_context(|| format!("cannot load {}", path.display()))
}

fn run(cli: Cli) -> Result<()> {
    let loaded = config::load(&cli)?;
    let config = loaded.config;

    if let Err(err) = logging::init(&config.log_file) {
        eprintln!("splitdiff: logging disabled: {err}");
    }
    if let Some(reason) = loaded.fallback_reason {
        tracing::warn!(%reason, "config file ignored, using defaults");
    }
    if let Some(name) = cli.theme.as_deref().filter(|n| !Theme::is_known(n)) {
        tracing::warn!(theme = name, "unknown theme, using classic");
    }
    tracing::debug!(?config, "configuration loaded");

    // Two-file mode reads both files before the terminal is touched
    let files = match cli.files() {
        Some((left, right)) => Some((load_cli_file(&left)?, load_cli_file(&right)?)),
        None => None,
    };
    let start_dir = std::env::current_dir().context("cannot determine working directory")?;

    let mut guard = TerminalGuard::acquire().context("cannot initialize terminal")?;
    let terminal = guard.take().context("terminal already in use")?;
    let session = Session::new(terminal, CrosstermEvents, config.theme.clone());
    let mut app = App::new(session, OsFileSystem, config, DirectoryCursor::new(start_dir));

    match files {
        Some((left, right)) => app.show_files(left, right),
        None => app.run_menu(),
    }
}

fn main() -> ExitCode {
    color_eyre::install().ok();
    install_panic_hook();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => {
            tracing::info!("exiting");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "fatal error");
            eprintln!("splitdiff: {err:#}");
            ExitCode::FAILURE
        }
    }
}
