//! Attendance rules: one session's attendance in, signed adjustments out.
//!
//! Rule table (amounts in currency units):
//! - settled session → treasurer +20 salary
//! - clean group (no Late, no Absent Uninformed) → every leader +(30 − 10·n),
//!   treasurer pays it once per leader (n = informed absences in the group)
//! - flagged group, per record:
//!   - Late: leader −40 / member −10, paid to the treasurer
//!   - Absent Uninformed: leader −200 / member −100 offline, −50 online,
//!     paid to the treasurer
//!   - On Time / Absent Informed: nothing

use super::roster::Roster;
use crate::models::adjustment::{Adjustment, Origin};
use crate::models::attendance::Attendance;
use crate::models::player::{Player, PlayerId};
use crate::models::session::PracticeSession;
use crate::models::status::AttendanceStatus;
use std::collections::BTreeMap;

pub const TREASURER_SALARY: i64 = 20;
pub const CLEAN_GROUP_REWARD: i64 = 30;
pub const INFORMED_ABSENCE_DEDUCTION: i64 = 10;
pub const LEADER_LATE_FINE: i64 = 40;
pub const MEMBER_LATE_FINE: i64 = 10;
pub const LEADER_UNINFORMED_FINE: i64 = 200;
pub const MEMBER_UNINFORMED_FINE_OFFLINE: i64 = 100;
pub const MEMBER_UNINFORMED_FINE_ONLINE: i64 = 50;

/// Reward a clean group's leaders earn given `informed` absences. No floor.
pub fn clean_group_reward(informed: usize) -> i64 {
    CLEAN_GROUP_REWARD - INFORMED_ABSENCE_DEDUCTION * informed as i64
}

/// Fine for a single Late / Absent Uninformed record, `None` for the rest.
pub fn fine_for(status: AttendanceStatus, is_leader: bool, is_online: bool) -> Option<i64> {
    match (status, is_leader) {
        (AttendanceStatus::Late, true) => Some(LEADER_LATE_FINE),
        (AttendanceStatus::Late, false) => Some(MEMBER_LATE_FINE),
        (AttendanceStatus::AbsentUninformed, true) => Some(LEADER_UNINFORMED_FINE),
        (AttendanceStatus::AbsentUninformed, false) => Some(if is_online {
            MEMBER_UNINFORMED_FINE_ONLINE
        } else {
            MEMBER_UNINFORMED_FINE_OFFLINE
        }),
        (AttendanceStatus::OnTime | AttendanceStatus::AbsentInformed, _) => None,
    }
}

fn group_name(group: Option<i64>) -> String {
    match group {
        Some(g) => format!("Group {g}"),
        None => "No-group".to_string(),
    }
}

/// Evaluate one session.
///
/// Output order: salary, then groups ascending (the no-group partition
/// first), records inside a group in input order. Records whose player is
/// missing from the roster are skipped.
pub fn evaluate_session(
    session: &PracticeSession,
    attendance: &[Attendance],
    roster: &Roster,
) -> Vec<Adjustment> {
    let origin = Origin::Session(session.date);
    let treasurer = roster.treasurer();
    let mut out = Vec::new();

    if session.is_settled
        && let Some(t) = treasurer
    {
        out.push(Adjustment::new(
            t,
            TREASURER_SALARY,
            "Treasurer salary (session settled)",
            origin,
        ));
    }

    let mut groups: BTreeMap<Option<i64>, Vec<(&Attendance, &Player)>> = BTreeMap::new();
    for att in attendance {
        let Some(player) = roster.get(att.player_id) else {
            continue;
        };
        groups.entry(player.group_id).or_default().push((att, player));
    }

    for (group, records) in &groups {
        let flagged = records.iter().any(|(a, _)| a.status.flags_group());

        if !flagged {
            let informed = records
                .iter()
                .filter(|(a, _)| a.status == AttendanceStatus::AbsentInformed)
                .count();
            let reward = clean_group_reward(informed);

            for (_, leader) in records.iter().filter(|(_, p)| p.role.is_leader()) {
                out.push(Adjustment::new(
                    leader.id,
                    reward,
                    format!("{} bonus ({} absent informed)", group_name(*group), informed),
                    origin,
                ));
                push_treasurer(
                    &mut out,
                    treasurer,
                    -reward,
                    format!("Paid {} leader bonus to {}", group_name(*group), leader.name),
                    origin,
                );
            }
            continue;
        }

        for (att, player) in records {
            let is_leader = player.role.is_leader();
            let Some(fine) = fine_for(att.status, is_leader, session.is_online) else {
                continue;
            };

            let (penalty, received) = match (att.status, is_leader) {
                (AttendanceStatus::Late, true) => ("Leader late penalty".to_string(), "late"),
                (AttendanceStatus::Late, false) => ("Late penalty".to_string(), "late"),
                (_, true) => (
                    "Leader uninformed absence penalty".to_string(),
                    "uninformed absence",
                ),
                (_, false) => (
                    format!("Uninformed absence penalty ({})", session.mode_label()),
                    "uninformed absence",
                ),
            };

            out.push(Adjustment::new(player.id, -fine, penalty, origin));
            push_treasurer(
                &mut out,
                treasurer,
                fine,
                format!("{} {} fine received", player.name, received),
                origin,
            );
        }
    }

    out
}

fn push_treasurer(
    out: &mut Vec<Adjustment>,
    treasurer: Option<PlayerId>,
    amount: i64,
    reason: String,
    origin: Origin,
) {
    if let Some(t) = treasurer {
        out.push(Adjustment::new(t, amount, reason, origin));
    }
}
