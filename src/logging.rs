//! Diagnostic logging through `tracing`.
//!
//! User-facing output goes through `ui::messages`; this subscriber only
//! carries engine and store diagnostics to stderr.

use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the filter, e.g. `TEAMLEDGER_LOG=debug` or
/// `TEAMLEDGER_LOG=teamledger::core=trace`.
pub const LOG_ENV: &str = "TEAMLEDGER_LOG";

/// Install the global subscriber. Defaults to `error` when the variable is
/// unset or invalid. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("error"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Verbose subscriber for tests, captured by the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
