use super::payment::PaymentId;
use super::player::PlayerId;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Where a balance adjustment comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Origin {
    Session(NaiveDate),
    Payment(PaymentId),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Session(d) => write!(f, "session {}", d.format("%Y-%m-%d")),
            Origin::Payment(id) => write!(f, "payment #{id}"),
        }
    }
}

/// One signed change to a single player's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adjustment {
    pub player_id: PlayerId,
    pub amount: i64,
    pub reason: String,
    pub origin: Origin,
}

impl Adjustment {
    pub fn new(player_id: PlayerId, amount: i64, reason: impl Into<String>, origin: Origin) -> Self {
        Self {
            player_id,
            amount,
            reason: reason.into(),
            origin,
        }
    }
}
