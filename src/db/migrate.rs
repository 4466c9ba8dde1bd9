use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

/// Applied in order; each one is recorded as a `migration_applied` row in
/// the `log` table and never runs twice.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_players",
        description: "Created players table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS players (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            role        TEXT NOT NULL DEFAULT 'Member'
                        CHECK(role IN ('Member','Leader','Treasurer')),
            group_id    INTEGER,
            balance     INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250301_0002_create_sessions",
        description: "Created sessions table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        TEXT NOT NULL UNIQUE,
            is_online   INTEGER NOT NULL DEFAULT 0,
            is_settled  INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250301_0003_create_attendance",
        description: "Created attendance table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id  INTEGER NOT NULL REFERENCES sessions(id) ON DELETE CASCADE,
            player_id   INTEGER NOT NULL REFERENCES players(id) ON DELETE CASCADE,
            status      TEXT NOT NULL CHECK(status IN
                            ('On Time','Late','Absent Informed','Absent Uninformed')),
            UNIQUE(session_id, player_id)
        );
        "#,
    },
    Migration {
        version: "20250301_0004_create_payments",
        description: "Created payments table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS payments (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            player_id   INTEGER NOT NULL REFERENCES players(id) ON DELETE CASCADE,
            amount      INTEGER NOT NULL,
            notes       TEXT,
            created_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250418_0005_player_indexes",
        description: "Added player indexes on attendance and payments",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_attendance_player ON attendance(player_id);
        CREATE INDEX IF NOT EXISTS idx_payments_player ON payments(player_id);
        "#,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;
    tx.commit()
}

/// Versions not yet applied to this database.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() and `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        apply(conn, m).map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

        tracing::info!(version = m.version, "migration applied");
        success(format!("Migration applied: {} → {}", m.version, m.description));
    }

    Ok(())
}
