use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{balance, balance_sum, count, init_db, init_db_with_roster, open, rti, setup_test_db};

#[test]
fn test_init_creates_empty_ledger() {
    let db_path = setup_test_db("init_empty");
    init_db(&db_path);

    assert_eq!(count(&db_path, "players"), 0);
    assert_eq!(count(&db_path, "sessions"), 0);

    rti()
        .args(["--db", &db_path, "player", "list"])
        .assert()
        .success()
        .stdout(contains("The roster is empty"));
}

#[test]
fn test_command_without_database_fails() {
    let db_path = setup_test_db("no_database_yet");

    rti()
        .args(["--db", &db_path, "player", "list"])
        .assert()
        .failure()
        .stderr(contains("Database not found"));
}

#[test]
fn test_player_add_and_list() {
    let db_path = setup_test_db("player_add_list");
    init_db_with_roster(&db_path);

    rti()
        .args(["--db", &db_path, "player", "list"])
        .assert()
        .success()
        .stdout(contains("Tess"))
        .stdout(contains("Treasurer"))
        .stdout(contains("Leo"))
        .stdout(contains("G1"));

    assert_eq!(count(&db_path, "players"), 4);
}

#[test]
fn test_player_add_rejects_unknown_role() {
    let db_path = setup_test_db("player_bad_role");
    init_db(&db_path);

    rti()
        .args(["--db", &db_path, "player", "add", "Zed", "--role", "captain"])
        .assert()
        .failure()
        .stderr(contains("Invalid role"));

    assert_eq!(count(&db_path, "players"), 0);
}

#[test]
fn test_late_member_pays_treasurer() {
    let db_path = setup_test_db("late_member");
    init_db_with_roster(&db_path);

    rti()
        .args([
            "--db", &db_path, "session", "add", "2025-03-01", "--mark", "3=L",
        ])
        .assert()
        .success()
        .stdout(contains("created"));

    assert_eq!(balance(&db_path, 3), -10);
    assert_eq!(balance(&db_path, 1), 10);
    assert_eq!(balance(&db_path, 2), 0);
    assert_eq!(balance_sum(&db_path), 0);
    // one record per roster player
    assert_eq!(count(&db_path, "attendance"), 4);
}

#[test]
fn test_clean_group_with_informed_absence() {
    let db_path = setup_test_db("clean_group");
    init_db_with_roster(&db_path);

    rti()
        .args([
            "--db",
            &db_path,
            "session",
            "add",
            "2025-03-01",
            "--mark",
            "4=absent-informed",
        ])
        .assert()
        .success();

    assert_eq!(balance(&db_path, 2), 20);
    assert_eq!(balance(&db_path, 1), -20);
    assert_eq!(balance(&db_path, 4), 0);
}

#[test]
fn test_session_add_overwrites_same_date() {
    let db_path = setup_test_db("session_overwrite");
    init_db_with_roster(&db_path);

    rti()
        .args([
            "--db", &db_path, "session", "add", "2025-03-01", "--mark", "3=L",
        ])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "session", "add", "2025-03-01", "--online"])
        .assert()
        .success()
        .stdout(contains("overwritten"));

    assert_eq!(count(&db_path, "sessions"), 1);
    assert_eq!(count(&db_path, "attendance"), 4);
    assert_eq!(balance(&db_path, 3), 0);
    assert_eq!(balance(&db_path, 2), 30);
    assert_eq!(balance(&db_path, 1), -30);
}

#[test]
fn test_unknown_player_in_mark_writes_nothing() {
    let db_path = setup_test_db("mark_unknown_player");
    init_db_with_roster(&db_path);

    rti()
        .args([
            "--db", &db_path, "session", "add", "2025-03-01", "--mark", "42=L",
        ])
        .assert()
        .failure()
        .stderr(contains("No player with id 42"));

    assert_eq!(count(&db_path, "sessions"), 0);
    assert_eq!(count(&db_path, "attendance"), 0);
}

#[test]
fn test_invalid_status_and_date_are_rejected() {
    let db_path = setup_test_db("invalid_inputs");
    init_db_with_roster(&db_path);

    rti()
        .args([
            "--db", &db_path, "session", "add", "2025-03-01", "--mark", "3=sleepy",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid attendance status"));

    rti()
        .args(["--db", &db_path, "session", "add", "01/03/2025"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    assert_eq!(count(&db_path, "sessions"), 0);
}

#[test]
fn test_session_edit_marks_and_mode() {
    let db_path = setup_test_db("session_edit");
    init_db_with_roster(&db_path);

    rti()
        .args(["--db", &db_path, "session", "add", "2025-03-01"])
        .assert()
        .success();
    assert_eq!(balance(&db_path, 2), 30);

    rti()
        .args([
            "--db",
            &db_path,
            "session",
            "edit",
            "2025-03-01",
            "--online",
            "true",
            "--mark",
            "4=U",
        ])
        .assert()
        .success()
        .stdout(contains("online"));

    assert_eq!(balance(&db_path, 2), 0);
    assert_eq!(balance(&db_path, 4), -50);
    assert_eq!(balance(&db_path, 1), 50);
    assert_eq!(count(&db_path, "attendance"), 4);
}

#[test]
fn test_session_edit_to_taken_date_fails() {
    let db_path = setup_test_db("session_edit_dup");
    init_db_with_roster(&db_path);

    for date in ["2025-03-01", "2025-03-08"] {
        rti()
            .args(["--db", &db_path, "session", "add", date])
            .assert()
            .success();
    }

    rti()
        .args([
            "--db",
            &db_path,
            "session",
            "edit",
            "2025-03-01",
            "--date",
            "2025-03-08",
        ])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    rti()
        .args([
            "--db",
            &db_path,
            "session",
            "edit",
            "2025-03-01",
            "--date",
            "2025-03-15",
        ])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "session", "list"])
        .assert()
        .success()
        .stdout(contains("2025-03-15"))
        .stdout(contains("2025-03-01").not());
}

#[test]
fn test_session_delete_reverts_balances() {
    let db_path = setup_test_db("session_delete");
    init_db_with_roster(&db_path);

    rti()
        .args([
            "--db", &db_path, "session", "add", "2025-03-01", "--mark", "2=L",
        ])
        .assert()
        .success();
    assert_eq!(balance(&db_path, 2), -40);

    rti()
        .args(["--db", &db_path, "session", "del", "2025-03-01", "--yes"])
        .assert()
        .success();

    assert_eq!(balance(&db_path, 2), 0);
    assert_eq!(balance(&db_path, 1), 0);
    assert_eq!(count(&db_path, "attendance"), 0);

    rti()
        .args(["--db", &db_path, "session", "del", "2025-03-01", "--yes"])
        .assert()
        .failure()
        .stderr(contains("No practice session on 2025-03-01"));
}

#[test]
fn test_settle_toggles_salary() {
    let db_path = setup_test_db("settle_toggle");
    init_db_with_roster(&db_path);

    rti()
        .args(["--db", &db_path, "session", "add", "2025-03-01"])
        .assert()
        .success();
    assert_eq!(balance(&db_path, 1), -30);

    rti()
        .args(["--db", &db_path, "session", "settle", "2025-03-01"])
        .assert()
        .success()
        .stdout(contains("settled"));
    assert_eq!(balance(&db_path, 1), -10);
    assert_eq!(balance_sum(&db_path), 20);

    rti()
        .args(["--db", &db_path, "session", "settle", "2025-03-01"])
        .assert()
        .success()
        .stdout(contains("unsettled"));
    assert_eq!(balance(&db_path, 1), -30);
    assert_eq!(balance_sum(&db_path), 0);
}

#[test]
fn test_payments_move_money_between_player_and_treasurer() {
    let db_path = setup_test_db("payments");
    init_db_with_roster(&db_path);

    rti()
        .args(["--db", &db_path, "pay", "add", "3", "25", "--note", "fines"])
        .assert()
        .success();
    assert_eq!(balance(&db_path, 3), 25);
    assert_eq!(balance(&db_path, 1), -25);

    rti()
        .args(["--db", &db_path, "pay", "add", "2", "-15"])
        .assert()
        .success();
    assert_eq!(balance(&db_path, 2), -15);
    assert_eq!(balance(&db_path, 1), -10);
    assert_eq!(balance_sum(&db_path), 0);

    rti()
        .args(["--db", &db_path, "pay", "list", "--player", "3"])
        .assert()
        .success()
        .stdout(contains("fines"))
        .stdout(contains("Mia"));

    rti()
        .args(["--db", &db_path, "pay", "del", "1", "--yes"])
        .assert()
        .success();
    assert_eq!(balance(&db_path, 3), 0);
    assert_eq!(balance(&db_path, 1), 15);
}

#[test]
fn test_payment_validation() {
    let db_path = setup_test_db("payment_validation");
    init_db_with_roster(&db_path);

    rti()
        .args(["--db", &db_path, "pay", "add", "3", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid amount"));

    rti()
        .args(["--db", &db_path, "pay", "add", "99", "10"])
        .assert()
        .failure()
        .stderr(contains("No player with id 99"));

    rti()
        .args(["--db", &db_path, "pay", "del", "7", "--yes"])
        .assert()
        .failure()
        .stderr(contains("No payment with id 7"));

    assert_eq!(count(&db_path, "payments"), 0);
}

#[test]
fn test_player_delete_cascades_and_recomputes() {
    let db_path = setup_test_db("player_delete");
    init_db_with_roster(&db_path);

    rti()
        .args([
            "--db", &db_path, "session", "add", "2025-03-01", "--mark", "3=U",
        ])
        .assert()
        .success();
    rti()
        .args(["--db", &db_path, "pay", "add", "3", "50"])
        .assert()
        .success();
    assert_eq!(balance(&db_path, 3), -50);
    assert_eq!(balance(&db_path, 1), 50);

    rti()
        .args(["--db", &db_path, "player", "del", "3", "--yes"])
        .assert()
        .success();

    assert_eq!(count(&db_path, "players"), 3);
    assert_eq!(count(&db_path, "attendance"), 3);
    assert_eq!(count(&db_path, "payments"), 0);
    // the remaining group is clean again
    assert_eq!(balance(&db_path, 2), 30);
    assert_eq!(balance(&db_path, 1), -30);
}

#[test]
fn test_player_edit_role_changes_fines() {
    let db_path = setup_test_db("player_edit_role");
    init_db_with_roster(&db_path);

    rti()
        .args([
            "--db", &db_path, "session", "add", "2025-03-01", "--mark", "3=L",
        ])
        .assert()
        .success();
    assert_eq!(balance(&db_path, 3), -10);

    rti()
        .args(["--db", &db_path, "player", "edit", "3", "--role", "L"])
        .assert()
        .success();
    assert_eq!(balance(&db_path, 3), -40);
    assert_eq!(balance(&db_path, 1), 40);

    // out of the group: group 1 becomes clean, Mia is alone in no-group
    rti()
        .args(["--db", &db_path, "player", "edit", "3", "--no-group"])
        .assert()
        .success();
    assert_eq!(balance(&db_path, 3), -40);
    assert_eq!(balance(&db_path, 2), 30);
    assert_eq!(balance_sum(&db_path), 0);
}

#[test]
fn test_balances_report_and_recalc_repair() {
    let db_path = setup_test_db("balances_recalc");
    init_db_with_roster(&db_path);

    rti()
        .args([
            "--db",
            &db_path,
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
        .args(["--db", &db_path, "balances", "--reasons"])
        .assert()
        .success()
        .stdout(contains("Late penalty"))
        .stdout(contains("Treasurer salary"));

    open(&db_path)
        .execute("UPDATE players SET balance = 999 WHERE id = 3", [])
        .expect("tamper");

    rti()
        .args(["--db", &db_path, "balances"])
        .assert()
        .success()
        .stdout(contains("run `teamledger recalc`"));

    rti()
        .args(["--db", &db_path, "recalc"])
        .assert()
        .success()
        .stdout(contains("Balances recomputed"));

    assert_eq!(balance(&db_path, 3), -10);
    assert_eq!(balance_sum(&db_path), 20);
}

#[test]
fn test_no_treasurer_warning() {
    let db_path = setup_test_db("no_treasurer");
    init_db(&db_path);

    rti()
        .args(["--db", &db_path, "player", "add", "Leo", "--role", "L"])
        .assert()
        .success();
    rti()
        .args([
            "--db", &db_path, "session", "add", "2025-03-01", "--mark", "1=L",
        ])
        .assert()
        .success()
        .stdout(contains("No treasurer"));

    assert_eq!(balance(&db_path, 1), -40);
}

#[test]
fn test_session_show_and_list_period() {
    let db_path = setup_test_db("session_show_list");
    init_db_with_roster(&db_path);

    for (date, mark) in [("2025-02-22", "3=O"), ("2025-03-01", "3=U")] {
        rti()
            .args(["--db", &db_path, "session", "add", date, "--mark", mark])
            .assert()
            .success();
    }

    rti()
        .args(["--db", &db_path, "session", "show", "2025-03-01"])
        .assert()
        .success()
        .stdout(contains("Absent Uninformed"))
        .stdout(contains("Uninformed absence penalty (offline)"))
        .stdout(contains("Mia uninformed absence fine received"));

    rti()
        .args(["--db", &db_path, "session", "list", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("2025-03-01"))
        .stdout(contains("2025-02-22").not());

    rti()
        .args(["--db", &db_path, "session", "list", "--period", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid period"));
}

#[test]
fn test_operation_log_records_writes() {
    let db_path = setup_test_db("operation_log");
    init_db_with_roster(&db_path);

    rti()
        .args(["--db", &db_path, "session", "add", "2025-03-01"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("player_add"))
        .stdout(contains("session_add"))
        .stdout(contains("migration_applied"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info");
    init_db_with_roster(&db_path);

    rti()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Players"))
        .stdout(contains("up to date"))
        .stdout(contains("integrity check passed"))
        .stdout(contains("No dangling references"))
        .stdout(contains("match history for 4 player(s)"));
}

#[test]
fn test_db_check_flags_stale_balance() {
    let db_path = setup_test_db("db_check_stale");
    init_db_with_roster(&db_path);

    open(&db_path)
        .execute("UPDATE players SET balance = 99 WHERE id = 3", [])
        .expect("tamper balance");

    rti()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("differs from history for 1 player(s)"));
}

fn stored_balances(db_path: &str) -> Vec<i64> {
    (1..=4).map(|id| balance(db_path, id)).collect()
}

#[test]
fn test_failed_session_edit_rolls_back_partial_update() {
    let db_path = setup_test_db("edit_rollback");
    init_db_with_roster(&db_path);

    rti()
        .args([
            "--db", &db_path, "session", "add", "2025-03-01", "--settled", "--mark", "3=L",
        ])
        .assert()
        .success();

    let before = stored_balances(&db_path);
    assert_eq!(before, vec![30, 0, -10, 0]);
    let log_rows = count(&db_path, "log");

    // the session row is updated before the marks are checked
    rti()
        .args([
            "--db", &db_path, "session", "edit", "2025-03-01", "--online", "true", "--mark",
            "42=L",
        ])
        .assert()
        .failure()
        .stderr(contains("No player with id 42"));

    rti()
        .args([
            "--db", &db_path, "session", "edit", "2025-03-01", "--date", "2025-03-02",
            "--mark", "42=L",
        ])
        .assert()
        .failure();

    let (date, online): (String, i64) = open(&db_path)
        .query_row("SELECT date, is_online FROM sessions", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .expect("session row");
    assert_eq!(date, "2025-03-01");
    assert_eq!(online, 0);

    assert_eq!(stored_balances(&db_path), before);
    assert_eq!(count(&db_path, "attendance"), 4);
    assert_eq!(count(&db_path, "log"), log_rows);
}

#[test]
fn test_pay_add_rejects_out_of_range_amounts() {
    let db_path = setup_test_db("pay_out_of_range");
    init_db_with_roster(&db_path);

    for amount in ["1000000001", "-9223372036854775808", "9223372036854775807"] {
        rti()
            .args(["--db", &db_path, "pay", "add", "3", amount])
            .assert()
            .failure()
            .stderr(contains("Invalid amount"));
    }
    assert_eq!(count(&db_path, "payments"), 0);

    rti()
        .args(["--db", &db_path, "pay", "add", "3", "-1000000000"])
        .assert()
        .success();
    assert_eq!(balance(&db_path, 3), -1_000_000_000);
    assert_eq!(balance(&db_path, 1), 1_000_000_000);
    assert_eq!(balance_sum(&db_path), 0);
}

#[test]
fn test_balances_lists_highest_balance_first() {
    let db_path = setup_test_db("balances_order");
    init_db_with_roster(&db_path);

    rti()
        .args([
            "--db", &db_path, "session", "add", "2025-03-01", "--settled", "--mark", "3=L",
        ])
        .assert()
        .success();

    let out = rti()
        .args(["--db", &db_path, "balances"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8_lossy(&out);

    // Tess 30, Leo 0, Noah 0, Mia -10
    let pos = |name: &str| out.find(name).expect("name in balances output");
    assert!(pos("Tess") < pos("Leo"));
    assert!(pos("Leo") < pos("Noah"));
    assert!(pos("Noah") < pos("Mia"));
}

#[test]
fn test_init_reports_created_paths() {
    let db_path = setup_test_db("init_paths");

    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database:"))
        .stdout(contains(db_path.as_str()));
}
