//! Player lookup and treasurer selection for one recompute.

use crate::models::payment::PaymentId;
use crate::models::player::{Player, PlayerId};
use std::collections::HashMap;
use std::fmt;

/// Non-fatal findings about the roster or the records fed to a recompute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerWarning {
    /// Nobody holds the Treasurer role; treasurer-side transfers were skipped.
    NoTreasurer,
    /// More than one Treasurer; `acting` (lowest id) was used.
    MultipleTreasurers {
        acting: PlayerId,
        ignored: Vec<PlayerId>,
    },
    /// A stored payment exceeds the accepted range and was left out.
    PaymentOutOfRange { payment: PaymentId, amount: i64 },
    /// A player's total left the `i64` range; the result must not be stored.
    BalanceOverflow { player: PlayerId },
}

impl fmt::Display for LedgerWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerWarning::NoTreasurer => write!(
                f,
                "No treasurer in the roster: treasurer-side transfers were skipped"
            ),
            LedgerWarning::MultipleTreasurers { acting, ignored } => {
                let ids: Vec<String> = ignored.iter().map(|id| format!("#{id}")).collect();
                write!(
                    f,
                    "Several treasurers in the roster: #{} acts as treasurer, {} treated as regular players",
                    acting,
                    ids.join(", ")
                )
            }
            LedgerWarning::PaymentOutOfRange { payment, amount } => write!(
                f,
                "Payment #{payment} of {amount} is out of range and was skipped"
            ),
            LedgerWarning::BalanceOverflow { player } => {
                write!(f, "Balance of player #{player} overflows")
            }
        }
    }
}

pub struct Roster<'a> {
    players: HashMap<PlayerId, &'a Player>,
    treasurer: Option<PlayerId>,
    extra_treasurers: Vec<PlayerId>,
}

impl<'a> Roster<'a> {
    pub fn new(players: &'a [Player]) -> Self {
        let mut treasurers: Vec<PlayerId> = players
            .iter()
            .filter(|p| p.role.is_treasurer())
            .map(|p| p.id)
            .collect();
        treasurers.sort_unstable();

        let treasurer = treasurers.first().copied();
        let extra_treasurers = treasurers.into_iter().skip(1).collect();

        Self {
            players: players.iter().map(|p| (p.id, p)).collect(),
            treasurer,
            extra_treasurers,
        }
    }

    pub fn get(&self, id: PlayerId) -> Option<&'a Player> {
        self.players.get(&id).copied()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    /// The acting treasurer: the Treasurer with the lowest id, if any.
    pub fn treasurer(&self) -> Option<PlayerId> {
        self.treasurer
    }

    pub fn policy_warning(&self) -> Option<LedgerWarning> {
        match self.treasurer {
            None => Some(LedgerWarning::NoTreasurer),
            Some(acting) if !self.extra_treasurers.is_empty() => {
                Some(LedgerWarning::MultipleTreasurers {
                    acting,
                    ignored: self.extra_treasurers.clone(),
                })
            }
            Some(_) => None,
        }
    }
}
