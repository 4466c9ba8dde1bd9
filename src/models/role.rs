use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    #[default]
    Member,    // M
    Leader,    // L
    Treasurer, // T
}

impl Role {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Member => "Member",
            Role::Leader => "Leader",
            Role::Treasurer => "Treasurer",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Member" => Some(Role::Member),
            "Leader" => Some(Role::Leader),
            "Treasurer" => Some(Role::Treasurer),
            _ => None,
        }
    }

    /// Accepts full names or one-letter codes, case-insensitive.
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" | "member" => Some(Role::Member),
            "l" | "leader" => Some(Role::Leader),
            "t" | "treasurer" => Some(Role::Treasurer),
            _ => None,
        }
    }

    pub fn is_leader(&self) -> bool {
        matches!(self, Role::Leader)
    }

    pub fn is_treasurer(&self) -> bool {
        matches!(self, Role::Treasurer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
