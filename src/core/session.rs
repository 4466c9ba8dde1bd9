use crate::core::calculator::ledger::Recalculation;
use crate::core::calculator::roster::Roster;
use crate::core::calculator::rules::evaluate_session;
use crate::core::recalc::RecalcLogic;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_session, find_session_by_date, insert_session, load_attendance_for_session,
    load_players, replace_attendance, update_session,
};
use crate::errors::{AppError, AppResult};
use crate::models::adjustment::Adjustment;
use crate::models::attendance::{Attendance, AttendanceMark};
use crate::models::player::{Player, PlayerId};
use crate::models::session::PracticeSession;
use crate::models::status::AttendanceStatus;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::{BTreeMap, HashSet};

/// Result of `session add`.
#[derive(Debug, Clone)]
pub struct SessionWrite {
    pub session: PracticeSession,
    /// false when an existing session on that date was overwritten.
    pub created: bool,
    pub records: usize,
}

/// Field changes for `session edit`.
#[derive(Debug, Default, Clone)]
pub struct SessionChanges {
    pub new_date: Option<NaiveDate>,
    pub online: Option<bool>,
    /// Non-empty: the attendance set is rebuilt with these overrides.
    pub marks: Vec<AttendanceMark>,
}

/// A session with its attendance and the adjustments it produces.
#[derive(Debug, Clone)]
pub struct SessionDetail {
    pub session: PracticeSession,
    pub attendance: Vec<(Attendance, Option<Player>)>,
    pub adjustments: Vec<Adjustment>,
}

pub struct SessionLogic;

/// Reject marks naming players that are not on the roster.
fn check_marks(players: &[Player], marks: &[AttendanceMark]) -> AppResult<()> {
    let known: HashSet<PlayerId> = players.iter().map(|p| p.id).collect();
    match marks.iter().find(|m| !known.contains(&m.player_id)) {
        Some(m) => Err(AppError::PlayerNotFound(m.player_id)),
        None => Ok(()),
    }
}

/// Later marks for the same player win.
fn overrides(marks: &[AttendanceMark]) -> BTreeMap<PlayerId, AttendanceStatus> {
    marks.iter().map(|m| (m.player_id, m.status)).collect()
}

fn to_marks(statuses: BTreeMap<PlayerId, AttendanceStatus>) -> Vec<AttendanceMark> {
    statuses
        .into_iter()
        .map(|(player_id, status)| AttendanceMark { player_id, status })
        .collect()
}

fn require_session(conn: &Connection, date: &NaiveDate) -> AppResult<PracticeSession> {
    find_session_by_date(conn, date)?.ok_or_else(|| AppError::SessionNotFound(date.to_string()))
}

impl SessionLogic {
    /// Record a session for `date` with one attendance row per roster player.
    ///
    /// Players without a mark are recorded On Time. An existing session on
    /// the same date is overwritten: online flag updated, attendance
    /// replaced. `settled` only ever sets the flag here, it never clears it.
    pub fn add(
        pool: &mut DbPool,
        date: NaiveDate,
        online: bool,
        settled: bool,
        marks: &[AttendanceMark],
    ) -> AppResult<(SessionWrite, Recalculation)> {
        RecalcLogic::within(pool, "session_add", &date.to_string(), |conn| {
            let players = load_players(conn)?;
            check_marks(&players, marks)?;

            let given = overrides(marks);
            let statuses: BTreeMap<PlayerId, AttendanceStatus> = players
                .iter()
                .map(|p| {
                    let status = given.get(&p.id).copied().unwrap_or(AttendanceStatus::OnTime);
                    (p.id, status)
                })
                .collect();

            let (session, created) = match find_session_by_date(conn, &date)? {
                Some(mut existing) => {
                    existing.is_online = online;
                    existing.is_settled |= settled;
                    update_session(conn, &existing)?;
                    (existing, false)
                }
                None => {
                    let mut fresh = PracticeSession::new(0, date, online, settled);
                    fresh.id = insert_session(conn, &fresh)?;
                    (fresh, true)
                }
            };

            let records = to_marks(statuses);
            replace_attendance(conn, session.id, &records)?;

            let msg = format!(
                "{} {} session with {} attendance record(s)",
                if created { "Created" } else { "Overwrote" },
                session.mode_label(),
                records.len()
            );

            Ok((
                SessionWrite {
                    session,
                    created,
                    records: records.len(),
                },
                msg,
            ))
        })
    }

    pub fn edit(
        pool: &mut DbPool,
        date: NaiveDate,
        changes: SessionChanges,
    ) -> AppResult<(PracticeSession, Recalculation)> {
        RecalcLogic::within(pool, "session_edit", &date.to_string(), |conn| {
            let mut session = require_session(conn, &date)?;
            let mut parts = Vec::new();

            if let Some(new_date) = changes.new_date
                && new_date != session.date
            {
                if find_session_by_date(conn, &new_date)?.is_some() {
                    return Err(AppError::DuplicateSession(new_date.to_string()));
                }
                parts.push(format!("moved to {new_date}"));
                session.date = new_date;
            }

            if let Some(online) = changes.online {
                session.is_online = online;
                parts.push(format!("now {}", session.mode_label()));
            }

            update_session(conn, &session)?;

            if !changes.marks.is_empty() {
                let players = load_players(conn)?;
                check_marks(&players, &changes.marks)?;

                let mut statuses: BTreeMap<PlayerId, AttendanceStatus> =
                    load_attendance_for_session(conn, session.id)?
                        .into_iter()
                        .map(|a| (a.player_id, a.status))
                        .collect();
                statuses.extend(overrides(&changes.marks));

                let records = to_marks(statuses);
                replace_attendance(conn, session.id, &records)?;
                parts.push(format!("attendance replaced ({} records)", records.len()));
            }

            let msg = if parts.is_empty() {
                "No changes".to_string()
            } else {
                parts.join(", ")
            };
            Ok((session, msg))
        })
    }

    pub fn delete(pool: &mut DbPool, date: NaiveDate) -> AppResult<(PracticeSession, Recalculation)> {
        RecalcLogic::within(pool, "session_del", &date.to_string(), |conn| {
            let session = require_session(conn, &date)?;
            delete_session(conn, session.id)?;
            Ok((session, "Deleted session and its attendance".to_string()))
        })
    }

    /// Flip the settled flag. Settling credits the treasurer's salary, so the
    /// balances are recomputed as for any other write.
    pub fn toggle_settled(
        pool: &mut DbPool,
        date: NaiveDate,
    ) -> AppResult<(PracticeSession, Recalculation)> {
        RecalcLogic::within(pool, "session_settle", &date.to_string(), |conn| {
            let mut session = require_session(conn, &date)?;
            session.is_settled = !session.is_settled;
            update_session(conn, &session)?;

            let msg = if session.is_settled {
                "Marked settled"
            } else {
                "Marked unsettled"
            };
            Ok((session, msg.to_string()))
        })
    }

    /// Attendance of one session plus the adjustments it yields right now.
    pub fn detail(conn: &Connection, date: NaiveDate) -> AppResult<SessionDetail> {
        let session = require_session(conn, &date)?;
        let players = load_players(conn)?;
        let attendance = load_attendance_for_session(conn, session.id)?;

        let roster = Roster::new(&players);
        let adjustments = evaluate_session(&session, &attendance, &roster);

        let attendance = attendance
            .into_iter()
            .map(|a| {
                let player = roster.get(a.player_id).cloned();
                (a, player)
            })
            .collect();

        Ok(SessionDetail {
            session,
            attendance,
            adjustments,
        })
    }
}
