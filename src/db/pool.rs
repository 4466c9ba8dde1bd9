//! SQLite connection wrapper (lightweight for CLI usage).

use crate::errors::AppResult;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        Self::with_timeout(path, DEFAULT_BUSY_TIMEOUT_MS)
    }

    /// Open the database with foreign keys enforced and a bounded wait on the
    /// write lock.
    pub fn with_timeout(path: &str, busy_timeout_ms: u64) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Start a write transaction.
    ///
    /// `BEGIN IMMEDIATE` takes the database write lock up front, so two
    /// processes that each mutate and recompute run one after the other.
    pub fn write_tx(&mut self) -> AppResult<Transaction<'_>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        Ok(tx)
    }
}
