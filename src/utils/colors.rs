/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Balance color:
/// \>0 → green (the team owes the player)
/// \<0 → red (the player owes the team)
/// 0 → reset
pub fn color_for_balance(value: i64) -> &'static str {
    if value > 0 {
        GREEN
    } else if value < 0 {
        RED
    } else {
        RESET
    }
}

pub fn color_for_role(role: crate::models::role::Role) -> &'static str {
    use crate::models::role::Role;
    match role {
        Role::Member => RESET,
        Role::Leader => CYAN,
        Role::Treasurer => MAGENTA,
    }
}

pub fn color_for_status(status: crate::models::status::AttendanceStatus) -> &'static str {
    use crate::models::status::AttendanceStatus;
    match status {
        AttendanceStatus::OnTime => GREEN,
        AttendanceStatus::Late => YELLOW,
        AttendanceStatus::AbsentInformed => BLUE,
        AttendanceStatus::AbsentUninformed => RED,
    }
}

/// Wrap `value` in `color`, greying out empty placeholders.
pub fn paint(value: &str, color: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        format!("{color}{value}{RESET}")
    }
}
