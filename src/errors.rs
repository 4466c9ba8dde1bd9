//! Unified application error type.
//! Every module (db, core, cli, export) returns AppError so failures reach
//! `main` through a single path.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid attendance status: {0}")]
    InvalidStatus(String),

    #[error("Invalid attendance mark '{0}' (expected PLAYER_ID=STATUS)")]
    InvalidMark(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("No player with id {0}")]
    PlayerNotFound(i64),

    #[error("No practice session on {0}")]
    SessionNotFound(String),

    #[error("No payment with id {0}")]
    PaymentNotFound(i64),

    #[error("A practice session already exists on {0}")]
    DuplicateSession(String),

    // ---------------------------
    // Access gate
    // ---------------------------
    #[error("Access denied: {0}")]
    AccessDenied(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
