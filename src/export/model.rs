use crate::models::adjustment::{Adjustment, Origin};
use crate::models::player::Player;
use serde::Serialize;

/// A record that can be written by every exporter.
pub trait ExportRow: Serialize {
    fn headers() -> Vec<&'static str>;
    fn to_row(&self) -> Vec<String>;
}

/// Flat player/balance row.
#[derive(Serialize, Clone, Debug)]
pub struct BalanceExport {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub group_id: Option<i64>,
    pub balance: i64,
}

impl From<&Player> for BalanceExport {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            role: p.role.to_db_str().to_string(),
            group_id: p.group_id,
            balance: p.balance,
        }
    }
}

impl ExportRow for BalanceExport {
    fn headers() -> Vec<&'static str> {
        vec!["id", "name", "role", "group_id", "balance"]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.role.clone(),
            self.group_id.map(|g| g.to_string()).unwrap_or_default(),
            self.balance.to_string(),
        ]
    }
}

/// One adjustment, flattened with its origin and the player's name.
#[derive(Serialize, Clone, Debug)]
pub struct LedgerEntryExport {
    pub source: String,
    pub date: String,
    pub payment_id: Option<i64>,
    pub player_id: i64,
    pub player: String,
    pub amount: i64,
    pub reason: String,
}

impl LedgerEntryExport {
    pub fn new(adj: &Adjustment, player_name: &str) -> Self {
        let (source, date, payment_id) = match adj.origin {
            Origin::Session(d) => ("session", d.format("%Y-%m-%d").to_string(), None),
            Origin::Payment(id) => ("payment", String::new(), Some(id)),
        };

        Self {
            source: source.to_string(),
            date,
            payment_id,
            player_id: adj.player_id,
            player: player_name.to_string(),
            amount: adj.amount,
            reason: adj.reason.clone(),
        }
    }
}

impl ExportRow for LedgerEntryExport {
    fn headers() -> Vec<&'static str> {
        vec![
            "source",
            "date",
            "payment_id",
            "player_id",
            "player",
            "amount",
            "reason",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.source.clone(),
            self.date.clone(),
            self.payment_id.map(|p| p.to_string()).unwrap_or_default(),
            self.player_id.to_string(),
            self.player.clone(),
            self.amount.to_string(),
            self.reason.clone(),
        ]
    }
}
