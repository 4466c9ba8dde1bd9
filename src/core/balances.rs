use crate::core::calculator::ledger::Recalculation;
use crate::core::recalc::RecalcLogic;
use crate::db::queries::load_players;
use crate::errors::AppResult;
use crate::models::player::{Player, PlayerId};
use rusqlite::Connection;

/// Stored balances next to a fresh derivation from history.
pub struct BalanceReport {
    pub players: Vec<Player>,
    pub derived: Recalculation,
}

impl BalanceReport {
    pub fn load(conn: &Connection) -> AppResult<Self> {
        Ok(Self {
            players: load_players(conn)?,
            derived: RecalcLogic::preview(conn)?,
        })
    }

    /// Leaderboard order: highest stored balance first, ties by id.
    pub fn sort_by_balance(&mut self) {
        self.players
            .sort_by(|a, b| b.balance.cmp(&a.balance).then(a.id.cmp(&b.id)));
    }

    /// Players whose stored balance no longer matches their history.
    pub fn stale(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.balance != self.derived.balance_of(p.id))
            .map(|p| p.id)
            .collect()
    }

    pub fn stored_total(&self) -> i64 {
        self.players
            .iter()
            .fold(0i64, |acc, p| acc.saturating_add(p.balance))
    }
}
