use crate::core::calculator::ledger::Recalculation;
use crate::core::recalc::RecalcLogic;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_payment, find_payment, find_player, insert_payment};
use crate::errors::{AppError, AppResult};
use crate::models::payment::{MAX_PAYMENT_AMOUNT, Payment, PaymentId};
use crate::models::player::PlayerId;

pub struct PaymentLogic;

impl PaymentLogic {
    /// Book a payment; the treasurer side is applied by the recompute.
    pub fn add(
        pool: &mut DbPool,
        player_id: PlayerId,
        amount: i64,
        notes: Option<String>,
    ) -> AppResult<(Payment, Recalculation)> {
        if amount == 0 {
            return Err(AppError::InvalidAmount("amount must not be zero".into()));
        }
        if !Payment::amount_in_range(amount) {
            return Err(AppError::InvalidAmount(format!(
                "{amount} is out of range (at most {MAX_PAYMENT_AMOUNT} either way)"
            )));
        }
        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        RecalcLogic::within(pool, "pay_add", &format!("#{player_id}"), |conn| {
            let player = find_player(conn, player_id)?.ok_or(AppError::PlayerNotFound(player_id))?;

            let mut payment = Payment::new(0, player.id, amount, notes);
            payment.id = insert_payment(conn, &payment)?;

            let msg = format!(
                "Payment #{} of {} for {}",
                payment.id, payment.amount, player.name
            );
            Ok((payment, msg))
        })
    }

    pub fn delete(pool: &mut DbPool, id: PaymentId) -> AppResult<(Payment, Recalculation)> {
        RecalcLogic::within(pool, "pay_del", &format!("#{id}"), |conn| {
            let payment = find_payment(conn, id)?.ok_or(AppError::PaymentNotFound(id))?;
            delete_payment(conn, id)?;

            let msg = format!(
                "Deleted payment #{} of {} (player #{})",
                payment.id, payment.amount, payment.player_id
            );
            Ok((payment, msg))
        })
    }
}
