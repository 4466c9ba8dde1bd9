//! Full balance recompute from the complete history.

use super::aggregate::{fold, payment_adjustments};
use super::roster::{LedgerWarning, Roster};
use super::rules::evaluate_session;
use crate::models::adjustment::Adjustment;
use crate::models::attendance::Attendance;
use crate::models::payment::Payment;
use crate::models::player::{Player, PlayerId};
use crate::models::session::{PracticeSession, SessionId};
use std::collections::{BTreeMap, HashMap};

/// Outcome of a recompute: the balances plus everything that explains them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recalculation {
    pub balances: BTreeMap<PlayerId, i64>,
    /// Every adjustment applied, sessions in date order first, then payments.
    pub adjustments: Vec<Adjustment>,
    pub warnings: Vec<LedgerWarning>,
    /// Attendance records and payments naming a player not in the roster.
    pub skipped_records: usize,
}

impl Recalculation {
    pub fn balance_of(&self, id: PlayerId) -> i64 {
        self.balances.get(&id).copied().unwrap_or(0)
    }

    pub fn total(&self) -> i64 {
        self.balances
            .values()
            .fold(0i64, |acc, b| acc.saturating_add(*b))
    }

    /// Players whose balance overflowed; such a result must not be persisted.
    pub fn overflowed(&self) -> Vec<PlayerId> {
        self.warnings
            .iter()
            .filter_map(|w| match w {
                LedgerWarning::BalanceOverflow { player } => Some(*player),
                _ => None,
            })
            .collect()
    }

    pub fn adjustments_for(&self, id: PlayerId) -> impl Iterator<Item = &Adjustment> {
        self.adjustments.iter().filter(move |a| a.player_id == id)
    }
}

/// Derive every player's balance from scratch.
///
/// Pure: no I/O, same inputs give the same output, and the session order in
/// `sessions` does not matter (they are sorted by date, then id).
pub fn recompute(
    players: &[Player],
    sessions: &[PracticeSession],
    attendance_by_session: &HashMap<SessionId, Vec<Attendance>>,
    payments: &[Payment],
) -> Recalculation {
    let roster = Roster::new(players);

    let mut result = Recalculation {
        balances: players.iter().map(|p| (p.id, 0)).collect(),
        ..Default::default()
    };

    match roster.policy_warning() {
        Some(LedgerWarning::NoTreasurer) if sessions.is_empty() && payments.is_empty() => {}
        Some(w) => {
            tracing::warn!(warning = %w, "treasurer policy applied");
            result.warnings.push(w);
        }
        None => {}
    }

    let mut ordered: Vec<&PracticeSession> = sessions.iter().collect();
    ordered.sort_by_key(|s| (s.date, s.id));

    for session in ordered {
        let records = attendance_by_session
            .get(&session.id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let skipped = records.iter().filter(|a| !roster.contains(a.player_id)).count();
        if skipped > 0 {
            tracing::debug!(
                session = %session.date,
                skipped,
                "attendance records for unknown players skipped"
            );
            result.skipped_records += skipped;
        }

        result
            .adjustments
            .extend(evaluate_session(session, records, &roster));
    }

    for payment in payments {
        if !Payment::amount_in_range(payment.amount) {
            tracing::warn!(
                payment = payment.id,
                amount = payment.amount,
                "payment out of range skipped"
            );
            result.warnings.push(LedgerWarning::PaymentOutOfRange {
                payment: payment.id,
                amount: payment.amount,
            });
            continue;
        }
        match payment_adjustments(payment, &roster) {
            Some(adjs) => result.adjustments.extend(adjs),
            None => {
                tracing::debug!(
                    payment = payment.id,
                    player = payment.player_id,
                    "payment for unknown player skipped"
                );
                result.skipped_records += 1;
            }
        }
    }

    for player in fold(&mut result.balances, &result.adjustments) {
        tracing::warn!(player, "balance overflow");
        result.warnings.push(LedgerWarning::BalanceOverflow { player });
    }

    tracing::debug!(
        players = players.len(),
        sessions = sessions.len(),
        payments = payments.len(),
        adjustments = result.adjustments.len(),
        "balances recomputed"
    );

    result
}
