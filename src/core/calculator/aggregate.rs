//! Payment transfers and the fold of adjustments into per-player totals.

use super::roster::Roster;
use crate::models::adjustment::{Adjustment, Origin};
use crate::models::payment::Payment;
use crate::models::player::PlayerId;
use std::collections::BTreeMap;

/// Turn one payment into its two ledger sides.
///
/// The payer moves by `+amount`, the acting treasurer by `-amount`, so a
/// payment never changes the sum of all balances. A payment booked on the
/// treasurer nets to zero. Returns `None` when the payer is not in the roster
/// or the amount cannot be negated.
pub fn payment_adjustments(payment: &Payment, roster: &Roster) -> Option<Vec<Adjustment>> {
    let payer = roster.get(payment.player_id)?;
    let counter = payment.amount.checked_neg()?;
    let origin = Origin::Payment(payment.id);

    let note = payment
        .notes
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .map(|n| format!(": {}", n.trim()))
        .unwrap_or_default();

    let payer_reason = if payment.amount >= 0 {
        format!("Payment to treasury{note}")
    } else {
        format!("Payout from treasury{note}")
    };

    let mut out = vec![Adjustment::new(payer.id, payment.amount, payer_reason, origin)];

    if let Some(t) = roster.treasurer() {
        let reason = if payment.amount >= 0 {
            format!("Payment received from {}", payer.name)
        } else {
            format!("Payout to {}", payer.name)
        };
        out.push(Adjustment::new(t, counter, reason, origin));
    }

    Some(out)
}

/// Add every adjustment to its player's running total.
///
/// Ids missing from `balances` are ignored: only roster players carry a
/// balance. Returns the players whose total overflowed; their total stops at
/// the last representable value.
pub fn fold(balances: &mut BTreeMap<PlayerId, i64>, adjustments: &[Adjustment]) -> Vec<PlayerId> {
    let mut overflowed = Vec::new();
    for adj in adjustments {
        let Some(total) = balances.get_mut(&adj.player_id) else {
            continue;
        };
        match total.checked_add(adj.amount) {
            Some(sum) => *total = sum,
            None => {
                *total = total.saturating_add(adj.amount);
                if !overflowed.contains(&adj.player_id) {
                    overflowed.push(adj.player_id);
                }
            }
        }
    }
    overflowed
}
