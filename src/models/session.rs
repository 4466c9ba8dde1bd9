use chrono::{Local, NaiveDate};
use serde::Serialize;

pub type SessionId = i64;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PracticeSession {
    pub id: SessionId,
    pub date: NaiveDate,    // ⇔ sessions.date (TEXT "YYYY-MM-DD", UNIQUE)
    pub is_online: bool,    // ⇔ sessions.is_online
    pub is_settled: bool,   // ⇔ sessions.is_settled, toggled by hand
    pub created_at: String, // ⇔ sessions.created_at (TEXT, ISO8601)
}

impl PracticeSession {
    pub fn new(id: SessionId, date: NaiveDate, is_online: bool, is_settled: bool) -> Self {
        Self {
            id,
            date,
            is_online,
            is_settled,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn mode_label(&self) -> &'static str {
        if self.is_online { "online" } else { "offline" }
    }
}
