use super::role::Role;
use chrono::Local;
use serde::Serialize;

pub type PlayerId = i64;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,             // ⇔ players.role ('Member' | 'Leader' | 'Treasurer')
    pub group_id: Option<i64>,  // ⇔ players.group_id (NULL = no group)
    pub balance: i64,           // ⇔ players.balance, always overwritten by a recompute
    pub created_at: String,     // ⇔ players.created_at (TEXT, ISO8601)
}

impl Player {
    /// New roster entry, balance starts at zero.
    pub fn new(id: PlayerId, name: &str, role: Role, group_id: Option<i64>) -> Self {
        Self {
            id,
            name: name.to_string(),
            role,
            group_id,
            balance: 0,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn group_label(&self) -> String {
        match self.group_id {
            Some(g) => format!("G{g}"),
            None => "-".to_string(),
        }
    }
}
