use crate::errors::{AppError, AppResult};
use crate::models::attendance::{Attendance, AttendanceMark};
use crate::models::payment::{Payment, PaymentId};
use crate::models::player::{Player, PlayerId};
use crate::models::role::Role;
use crate::models::session::{PracticeSession, SessionId};
use crate::models::status::AttendanceStatus;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::HashMap;

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

fn date_str(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ---------------------------
// Row mappers
// ---------------------------

pub fn map_player(row: &Row) -> Result<Player> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str)
        .ok_or_else(|| conversion_error(AppError::InvalidRole(role_str.clone())))?;

    Ok(Player {
        id: row.get("id")?,
        name: row.get("name")?,
        role,
        group_id: row.get("group_id")?,
        balance: row.get("balance")?,
        created_at: row.get("created_at")?,
    })
}

pub fn map_session(row: &Row) -> Result<PracticeSession> {
    let date_raw: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d")
        .map_err(|_| conversion_error(AppError::InvalidDate(date_raw.clone())))?;

    Ok(PracticeSession {
        id: row.get("id")?,
        date,
        is_online: row.get::<_, i32>("is_online")? == 1,
        is_settled: row.get::<_, i32>("is_settled")? == 1,
        created_at: row.get("created_at")?,
    })
}

pub fn map_attendance(row: &Row) -> Result<Attendance> {
    let status_raw: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_raw)
        .ok_or_else(|| conversion_error(AppError::InvalidStatus(status_raw.clone())))?;

    Ok(Attendance {
        id: row.get("id")?,
        session_id: row.get("session_id")?,
        player_id: row.get("player_id")?,
        status,
    })
}

pub fn map_payment(row: &Row) -> Result<Payment> {
    Ok(Payment {
        id: row.get("id")?,
        player_id: row.get("player_id")?,
        amount: row.get("amount")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

// ---------------------------
// Players
// ---------------------------

pub fn load_players(conn: &Connection) -> AppResult<Vec<Player>> {
    let mut stmt = conn.prepare("SELECT * FROM players ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_player)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_player(conn: &Connection, id: PlayerId) -> AppResult<Option<Player>> {
    let player = conn
        .query_row("SELECT * FROM players WHERE id = ?1", [id], map_player)
        .optional()?;
    Ok(player)
}

pub fn insert_player(conn: &Connection, p: &Player) -> AppResult<PlayerId> {
    conn.execute(
        "INSERT INTO players (name, role, group_id, balance, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![p.name, p.role.to_db_str(), p.group_id, p.balance, p.created_at],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_player(conn: &Connection, p: &Player) -> AppResult<()> {
    conn.execute(
        "UPDATE players SET name = ?1, role = ?2, group_id = ?3 WHERE id = ?4",
        params![p.name, p.role.to_db_str(), p.group_id, p.id],
    )?;
    Ok(())
}

/// Removes the player; attendance and payments go with it (ON DELETE CASCADE).
pub fn delete_player(conn: &Connection, id: PlayerId) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM players WHERE id = ?1", [id])?)
}

/// Overwrite every stored balance with the given values.
pub fn write_balances<'a, I>(conn: &Connection, balances: I) -> AppResult<usize>
where
    I: IntoIterator<Item = (&'a PlayerId, &'a i64)>,
{
    let mut stmt = conn.prepare_cached("UPDATE players SET balance = ?1 WHERE id = ?2")?;

    let mut written = 0;
    for (id, balance) in balances {
        written += stmt.execute(params![balance, id])?;
    }
    Ok(written)
}

// ---------------------------
// Sessions
// ---------------------------

pub fn load_sessions(conn: &Connection) -> AppResult<Vec<PracticeSession>> {
    load_sessions_between(conn, None)
}

/// Sessions in ascending date order, optionally limited to `[from, to]`.
pub fn load_sessions_between(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<PracticeSession>> {
    let (from, to) = match bounds {
        Some((f, t)) => (date_str(&f), date_str(&t)),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };

    let mut stmt = conn.prepare(
        "SELECT * FROM sessions
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC, id ASC",
    )?;
    let rows = stmt.query_map([from, to], map_session)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_session_by_date(
    conn: &Connection,
    date: &NaiveDate,
) -> AppResult<Option<PracticeSession>> {
    let session = conn
        .query_row(
            "SELECT * FROM sessions WHERE date = ?1",
            [date_str(date)],
            map_session,
        )
        .optional()?;
    Ok(session)
}

pub fn insert_session(conn: &Connection, s: &PracticeSession) -> AppResult<SessionId> {
    conn.execute(
        "INSERT INTO sessions (date, is_online, is_settled, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            s.date_str(),
            if s.is_online { 1 } else { 0 },
            if s.is_settled { 1 } else { 0 },
            s.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_session(conn: &Connection, s: &PracticeSession) -> AppResult<()> {
    conn.execute(
        "UPDATE sessions SET date = ?1, is_online = ?2, is_settled = ?3 WHERE id = ?4",
        params![
            s.date_str(),
            if s.is_online { 1 } else { 0 },
            if s.is_settled { 1 } else { 0 },
            s.id,
        ],
    )?;
    Ok(())
}

/// Removes the session and, by cascade, its attendance.
pub fn delete_session(conn: &Connection, id: SessionId) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM sessions WHERE id = ?1", [id])?)
}

// ---------------------------
// Attendance
// ---------------------------

pub fn load_attendance_for_session(
    conn: &Connection,
    session_id: SessionId,
) -> AppResult<Vec<Attendance>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance
         WHERE session_id = ?1
         ORDER BY player_id ASC",
    )?;
    let rows = stmt.query_map([session_id], map_attendance)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// All attendance, grouped by session.
pub fn load_attendance_by_session(
    conn: &Connection,
) -> AppResult<HashMap<SessionId, Vec<Attendance>>> {
    let mut stmt = conn.prepare("SELECT * FROM attendance ORDER BY session_id ASC, player_id ASC")?;
    let rows = stmt.query_map([], map_attendance)?;

    let mut out: HashMap<SessionId, Vec<Attendance>> = HashMap::new();
    for r in rows {
        let att = r?;
        out.entry(att.session_id).or_default().push(att);
    }
    Ok(out)
}

/// Delete-all then insert-all; attendance is never patched in place.
pub fn replace_attendance(
    conn: &Connection,
    session_id: SessionId,
    marks: &[AttendanceMark],
) -> AppResult<()> {
    conn.execute("DELETE FROM attendance WHERE session_id = ?1", [session_id])?;

    let mut stmt = conn.prepare_cached(
        "INSERT INTO attendance (session_id, player_id, status) VALUES (?1, ?2, ?3)",
    )?;
    for m in marks {
        stmt.execute(params![session_id, m.player_id, m.status.to_db_str()])?;
    }
    Ok(())
}

// ---------------------------
// Payments
// ---------------------------

pub fn load_payments(conn: &Connection, player: Option<PlayerId>) -> AppResult<Vec<Payment>> {
    let mut out = Vec::new();

    match player {
        Some(pid) => {
            let mut stmt =
                conn.prepare("SELECT * FROM payments WHERE player_id = ?1 ORDER BY id ASC")?;
            for r in stmt.query_map([pid], map_payment)? {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare("SELECT * FROM payments ORDER BY id ASC")?;
            for r in stmt.query_map([], map_payment)? {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

pub fn find_payment(conn: &Connection, id: PaymentId) -> AppResult<Option<Payment>> {
    let payment = conn
        .query_row("SELECT * FROM payments WHERE id = ?1", [id], map_payment)
        .optional()?;
    Ok(payment)
}

pub fn insert_payment(conn: &Connection, p: &Payment) -> AppResult<PaymentId> {
    conn.execute(
        "INSERT INTO payments (player_id, amount, notes, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![p.player_id, p.amount, p.notes, p.created_at],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_payment(conn: &Connection, id: PaymentId) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM payments WHERE id = ?1", [id])?)
}
