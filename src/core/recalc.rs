use crate::core::calculator::ledger::{Recalculation, recompute};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    load_attendance_by_session, load_payments, load_players, load_sessions, write_balances,
};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use rusqlite::Connection;

/// Transactional wrapper around the pure recompute.
pub struct RecalcLogic;

impl RecalcLogic {
    /// Derive balances from the stored history without writing anything.
    pub fn preview(conn: &Connection) -> AppResult<Recalculation> {
        let players = load_players(conn)?;
        let sessions = load_sessions(conn)?;
        let attendance = load_attendance_by_session(conn)?;
        let payments = load_payments(conn, None)?;

        Ok(recompute(&players, &sessions, &attendance, &payments))
    }

    /// Recompute and overwrite every player's stored balance.
    ///
    /// Runs on the caller's transaction: nothing is visible until the
    /// caller commits, and an error leaves the previous balances in place.
    pub fn apply(conn: &Connection) -> AppResult<Recalculation> {
        let result = Self::preview(conn)?;
        let overflowed = result.overflowed();
        if !overflowed.is_empty() {
            let ids: Vec<String> = overflowed.iter().map(|id| format!("#{id}")).collect();
            return Err(AppError::InvalidAmount(format!(
                "balance overflow for player(s) {}; nothing was written",
                ids.join(", ")
            )));
        }
        let written = write_balances(conn, &result.balances)?;
        tracing::debug!(written, total = result.total(), "balances persisted");
        Ok(result)
    }

    /// Run `work` and a full recompute in one write transaction, logging
    /// `operation` on success.
    ///
    /// `work` returns its value plus the message stored in the operation log.
    pub fn within<T, F>(
        pool: &mut DbPool,
        operation: &str,
        target: &str,
        work: F,
    ) -> AppResult<(T, Recalculation)>
    where
        F: FnOnce(&Connection) -> AppResult<(T, String)>,
    {
        let tx = pool.write_tx()?;
        let conn: &Connection = &tx;

        let (value, message) = work(conn)?;
        let result = Self::apply(conn)?;
        ttlog(conn, operation, target, &message)?;

        tx.commit()?;
        Ok((value, result))
    }

    /// `recalc` command: recompute with no other change.
    pub fn run(pool: &mut DbPool) -> AppResult<Recalculation> {
        let ((), result) = Self::within(pool, "recalc", "", |_| {
            Ok(((), "Balances recomputed".to_string()))
        })?;
        Ok(result)
    }

    /// Surface the warnings of a recompute to the user.
    pub fn report(result: &Recalculation) {
        for w in &result.warnings {
            warning(w);
        }
        if result.skipped_records > 0 {
            warning(format!(
                "{} record(s) reference unknown players and were skipped",
                result.skipped_records
            ));
        }
    }
}
