pub mod backup;
pub mod balances;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod pay;
pub mod player;
pub mod recalc;
pub mod session;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::gate::AccessGate;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use std::path::Path;

/// Open the configured database; every command except `init` expects it to
/// exist already.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    if !Path::new(&cfg.database).exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!(
                "Database not found: {} (run `teamledger init` first)",
                cfg.database
            ),
        )
        .into());
    }
    DbPool::with_timeout(&cfg.database, cfg.busy_timeout_ms)
}

/// Checked before the database is opened for writing.
pub(crate) fn authorize(cli: &Cli, cfg: &Config, action: &str) -> AppResult<()> {
    let gate = AccessGate::from_config(cfg);
    if gate.is_open() {
        tracing::debug!(action, "no shared password configured");
        return Ok(());
    }
    gate.check(cli.password.as_deref(), action)
}
