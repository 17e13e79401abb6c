//! rSplitwatch library root.
//! Exposes the CLI parser, the high-level run() function, and the stopwatch
//! core (split tree, renderer, logbook export).

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        None | Some(Commands::Run) => cli::commands::run::handle(cfg),
        Some(Commands::Init) => cli::commands::init::handle(cli),
        Some(cmd @ Commands::Config { .. }) => cli::commands::config::handle(cmd, cfg),
    }
}

/// Apply command-line overrides on top of the loaded configuration.
pub fn apply_overrides(cli: &Cli, cfg: &mut Config) {
    if let Some(path) = &cli.log_file {
        cfg.log_file = path.clone();
    }
    if let Some(max) = cli.max_splits {
        cfg.max_splits = max.max(1);
    }
    if let Some(format) = cli.format {
        cfg.export_format = format;
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    apply_overrides(&cli, &mut cfg);

    let _log_guard = logging::init(&cfg);

    dispatch(&cli, &cfg)
}
