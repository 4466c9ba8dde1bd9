use super::player::PlayerId;
use chrono::Local;
use serde::Serialize;

pub type PaymentId = i64;

/// Largest accepted payment, in either direction.
pub const MAX_PAYMENT_AMOUNT: i64 = 1_000_000_000;

/// A manual transfer between a player and the treasury.
///
/// Positive `amount`: the player paid into the treasury.
/// Negative `amount`: the treasury paid the player out.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Payment {
    pub id: PaymentId,
    pub player_id: PlayerId,
    pub amount: i64,
    pub notes: Option<String>,
    pub created_at: String,
}

impl Payment {
    pub fn new(id: PaymentId, player_id: PlayerId, amount: i64, notes: Option<String>) -> Self {
        Self {
            id,
            player_id,
            amount,
            notes,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn amount_in_range(amount: i64) -> bool {
        amount.unsigned_abs() <= MAX_PAYMENT_AMOUNT as u64
    }
}
