//! teamledger library root.
//! Exposes the CLI parser, the high-level run() function and the ledger
//! engine used by it.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
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
use utils::path::expand_tilde;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(cli, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Player { action } => cli::commands::player::handle(action, cli, cfg),
        Commands::Session { action } => cli::commands::session::handle(action, cli, cfg),
        Commands::Pay { action } => cli::commands::pay::handle(action, cli, cfg),
        Commands::Recalc => cli::commands::recalc::handle(cli, cfg),
        Commands::Balances { .. } => cli::commands::balances::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    logging::init();

    let cli = Cli::parse();

    // configuration is loaded once and handed to every command
    let mut cfg = Config::load(cli.config.as_deref())?;

    if let Some(custom_db) = &cli.db {
        cfg.database = expand_tilde(custom_db).to_string_lossy().to_string();
    }

    tracing::debug!(database = %cfg.database, "dispatching command");
    dispatch(&cli, &cfg)
}
