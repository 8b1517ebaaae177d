//! opsboard library root.
//! Exposes the report pipeline, the presence registry, the CLI parser and the
//! high-level `run()` entry point.

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
use utils::path::expand_tilde_string;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Report { .. } => cli::commands::report::handle(&cli.command, cfg),
        Commands::Presence { .. } => cli::commands::presence::handle(&cli.command, cfg),
        Commands::Watch { .. } => cli::commands::watch::handle(&cli.command, cfg),
    }
}

/// Apply command-line path overrides on top of the loaded config.
pub fn apply_overrides(cli: &Cli, cfg: &mut Config) {
    if let Some(dir) = &cli.source {
        cfg.source_dir = dir.clone();
    }
    if let Some(dir) = &cli.reports {
        cfg.report_dir = dir.clone();
    }
    if let Some(file) = &cli.presence {
        cfg.presence_file = file.clone();
    }

    cfg.source_dir = expand_tilde_string(&cfg.source_dir);
    cfg.report_dir = expand_tilde_string(&cfg.report_dir);
    cfg.presence_file = expand_tilde_string(&cfg.presence_file);
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    apply_overrides(&cli, &mut cfg);

    dispatch(&cli, &cfg)
}
