use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{init_db, init_db_with_roster, rti, setup_test_db, temp_out};

fn seed(db_path: &str) {
    init_db_with_roster(db_path);
    rti()
        .args([
            "--db",
            db_path,
            "session",
            "add",
            "2025-03-01",
            "--settled",
            "--mark",
            "3=L",
        ])
        .assert()
        .success();
    rti()
        .args(["--db", db_path, "pay", "add", "3", "10", "--note", "late fee"])
        .assert()
        .success();
}

#[test]
fn test_export_balances_csv() {
    let db_path = setup_test_db("export_balances_csv");
    let out = temp_out("export_balances_csv", "csv");
    seed(&db_path);

    rti()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("id,name,role,group_id,balance"));
    assert!(content.contains("1,Tess,Treasurer,,20"));
    assert!(content.contains("3,Mia,Member,1,0"));
}

#[test]
fn test_export_ledger_json() {
    let db_path = setup_test_db("export_ledger_json");
    let out = temp_out("export_ledger_json", "json");
    seed(&db_path);

    rti()
        .args([
            "--db", &db_path, "export", "--format", "json", "--what", "ledger", "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array of entries");

    // salary, Mia's fine and its receipt, both payment sides
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().any(|r| r["reason"] == "Payment to treasury: late fee"));
    assert!(rows.iter().any(|r| r["source"] == "session" && r["date"] == "2025-03-01"));
    let sum: i64 = rows.iter().map(|r| r["amount"].as_i64().unwrap_or(0)).sum();
    assert_eq!(sum, 20);
}

#[test]
fn test_export_xlsx_creates_file() {
    let db_path = setup_test_db("export_xlsx");
    let out = temp_out("export_xlsx", "xlsx");
    seed(&db_path);

    rti()
        .args([
            "--db", &db_path, "export", "--format", "xlsx", "--what", "ledger", "--file", &out,
        ])
        .assert()
        .success();

    let meta = fs::metadata(&out).expect("xlsx written");
    assert!(meta.len() > 0);
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    seed(&db_path);

    rti()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", "relative.csv",
        ])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_force_overwrites() {
    let db_path = setup_test_db("export_force");
    let out = temp_out("export_force", "csv");
    seed(&db_path);
    fs::write(&out, "old content").expect("seed file");

    rti()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read csv");
    assert!(content.starts_with("id,name"));
}

#[test]
fn test_export_empty_roster_warns() {
    let db_path = setup_test_db("export_empty");
    let out = temp_out("export_empty", "csv");
    init_db(&db_path);

    rti()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Nothing to export"));

    assert!(!Path::new(&out).exists());
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("backup_src");
    seed(&db_path);

    let plain = temp_out("backup_plain", "sqlite");
    rti()
        .args(["--db", &db_path, "backup", "--file", &plain])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(Path::new(&plain).exists());

    let copy = rusqlite::Connection::open(&plain).expect("open backup");
    let players: i64 = copy
        .query_row("SELECT COUNT(*) FROM players", [], |r| r.get(0))
        .expect("count players");
    assert_eq!(players, 4);

    let zipped_src = temp_out("backup_zip", "sqlite");
    let zipped = temp_out("backup_zip", "zip");
    rti()
        .args(["--db", &db_path, "backup", "--file", &zipped_src, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));
    assert!(Path::new(&zipped).exists());
    assert!(!Path::new(&zipped_src).exists());
}
