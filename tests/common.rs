#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rusqlite::Connection;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary with an isolated environment: no user config, no password.
pub fn rti() -> Command {
    let mut cmd = cargo_bin_cmd!("teamledger");
    cmd.env("TEAMLEDGER_CONFIG", missing_config())
        .env_remove("TEAMLEDGER_PASSWORD")
        .env_remove("TEAMLEDGER_LOG");
    cmd
}

/// A config path that never exists, so defaults are used.
fn missing_config() -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push("teamledger_tests_no_such_config.conf");
    path.to_string_lossy().to_string()
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_teamledger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init_db(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB with a small roster:
/// 1 Tess (Treasurer), 2 Leo (Leader, G1), 3 Mia (Member, G1), 4 Noah (Member, G1)
pub fn init_db_with_roster(db_path: &str) {
    init_db(db_path);

    for args in [
        vec!["Tess", "--role", "T"],
        vec!["Leo", "--role", "leader", "--group", "1"],
        vec!["Mia", "--group", "1"],
        vec!["Noah", "--role", "M", "--group", "1"],
    ] {
        let mut full = vec!["--db", db_path, "player", "add"];
        full.extend(args);
        rti().args(full).assert().success();
    }
}

pub fn open(db_path: &str) -> Connection {
    Connection::open(db_path).expect("open test db")
}

/// Stored balance of one player.
pub fn balance(db_path: &str, player_id: i64) -> i64 {
    open(db_path)
        .query_row(
            "SELECT balance FROM players WHERE id = ?1",
            [player_id],
            |r| r.get(0),
        )
        .expect("player balance")
}

pub fn balance_sum(db_path: &str) -> i64 {
    open(db_path)
        .query_row("SELECT IFNULL(SUM(balance), 0) FROM players", [], |r| {
            r.get(0)
        })
        .expect("balance sum")
}

pub fn count(db_path: &str, table: &str) -> i64 {
    open(db_path)
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
        .expect("row count")
}
