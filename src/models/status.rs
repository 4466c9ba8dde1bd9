use serde::Serialize;
use std::fmt;

/// Per-player outcome of one practice session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttendanceStatus {
    OnTime,
    Late,
    AbsentInformed,
    AbsentUninformed,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::OnTime,
        AttendanceStatus::Late,
        AttendanceStatus::AbsentInformed,
        AttendanceStatus::AbsentUninformed,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::OnTime => "On Time",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::AbsentInformed => "Absent Informed",
            AttendanceStatus::AbsentUninformed => "Absent Uninformed",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.to_db_str() == s)
    }

    /// Parse user input.
    ///
    /// Accepts display names ("Absent Informed"), kebab/snake forms
    /// ("absent-informed") and the one-letter codes (O, L, I, U).
    pub fn from_input(s: &str) -> Option<Self> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        match norm.as_str() {
            "o" | "ontime" => Some(AttendanceStatus::OnTime),
            "l" | "late" => Some(AttendanceStatus::Late),
            "i" | "ai" | "informed" | "absentinformed" => Some(AttendanceStatus::AbsentInformed),
            "u" | "au" | "uninformed" | "absentuninformed" => {
                Some(AttendanceStatus::AbsentUninformed)
            }
            _ => None,
        }
    }

    /// Late and uninformed absences flag the whole group.
    pub fn flags_group(&self) -> bool {
        matches!(
            self,
            AttendanceStatus::Late | AttendanceStatus::AbsentUninformed
        )
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
