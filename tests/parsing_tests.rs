use chrono::NaiveDate;
use std::env;
use std::fs;
use teamledger::config::Config;
use teamledger::core::gate::AccessGate;
use teamledger::errors::AppError;
use teamledger::models::attendance::AttendanceMark;
use teamledger::models::role::Role;
use teamledger::models::status::AttendanceStatus;
use teamledger::utils::date::parse_period;
use teamledger::utils::format_amount;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

#[test]
fn test_status_accepts_names_kebab_and_codes() {
    for raw in ["On Time", "on-time", "o", "O"] {
        assert_eq!(AttendanceStatus::from_input(raw), Some(AttendanceStatus::OnTime));
    }
    for raw in ["Absent Informed", "absent_informed", "I"] {
        assert_eq!(
            AttendanceStatus::from_input(raw),
            Some(AttendanceStatus::AbsentInformed)
        );
    }
    assert_eq!(
        AttendanceStatus::from_input("absent-uninformed"),
        Some(AttendanceStatus::AbsentUninformed)
    );
    assert_eq!(AttendanceStatus::from_input("Late"), Some(AttendanceStatus::Late));
    assert_eq!(AttendanceStatus::from_input("present"), None);
}

#[test]
fn test_status_db_strings_round_trip() {
    for st in AttendanceStatus::ALL {
        assert_eq!(AttendanceStatus::from_db_str(st.to_db_str()), Some(st));
    }
    assert_eq!(AttendanceStatus::from_db_str("late"), None);
}

#[test]
fn test_role_input() {
    assert_eq!(Role::from_input("t"), Some(Role::Treasurer));
    assert_eq!(Role::from_input("Leader"), Some(Role::Leader));
    assert_eq!(Role::from_input(" m "), Some(Role::Member));
    assert_eq!(Role::from_input("coach"), None);
    assert_eq!(Role::default(), Role::Member);
}

#[test]
fn test_attendance_mark_parse() {
    let mark = AttendanceMark::parse("3=late").expect("valid mark");
    assert_eq!(mark.player_id, 3);
    assert_eq!(mark.status, AttendanceStatus::Late);

    assert!(matches!(
        AttendanceMark::parse("3:late"),
        Err(AppError::InvalidMark(_))
    ));
    assert!(matches!(
        AttendanceMark::parse("x=late"),
        Err(AppError::InvalidMark(_))
    ));
    assert!(matches!(
        AttendanceMark::parse("3=nap"),
        Err(AppError::InvalidStatus(_))
    ));
}

#[test]
fn test_parse_period_forms() {
    assert_eq!(
        parse_period("2025").expect("year"),
        (d("2025-01-01"), d("2025-12-31"))
    );
    assert_eq!(
        parse_period("2024-02").expect("month"),
        (d("2024-02-01"), d("2024-02-29"))
    );
    assert_eq!(
        parse_period("2025-12").expect("december"),
        (d("2025-12-01"), d("2025-12-31"))
    );
    assert_eq!(
        parse_period("2025-03-01:2025-03-15").expect("range"),
        (d("2025-03-01"), d("2025-03-15"))
    );
    assert!(parse_period("2025:2025-03").is_err());
    assert!(parse_period("2025-04:2025-03").is_err());
    assert!(parse_period("March").is_err());
}

#[test]
fn test_format_amount() {
    assert_eq!(format_amount(30, "", true), "+30");
    assert_eq!(format_amount(30, "", false), "30");
    assert_eq!(format_amount(-10, "€", true), "-10 €");
    assert_eq!(format_amount(0, "", true), "0");
}

#[test]
fn test_access_gate() {
    let open = AccessGate::new(None);
    assert!(open.is_open());
    assert!(open.check(None, "recalc").is_ok());

    let empty = AccessGate::new(Some(""));
    assert!(empty.is_open());

    let gate = AccessGate::new(Some("s3cret"));
    assert!(!gate.is_open());
    assert!(gate.check(Some("s3cret"), "recalc").is_ok());
    assert!(matches!(
        gate.check(Some("s3cre"), "recalc"),
        Err(AppError::AccessDenied(_))
    ));
    assert!(matches!(
        gate.check(None, "recalc"),
        Err(AppError::AccessDenied(_))
    ));
}

#[test]
fn test_config_defaults_for_missing_fields() {
    let mut path = env::temp_dir();
    path.push("teamledger_partial_config.conf");
    fs::write(&path, "database: /tmp/partial.sqlite\n").expect("write config");

    let cfg = Config::load(Some(path.as_path())).expect("load config");
    assert_eq!(cfg.database, "/tmp/partial.sqlite");
    assert_eq!(cfg.shared_password, None);
    assert_eq!(cfg.busy_timeout_ms, 5000);
    assert!(cfg.currency_symbol.is_empty());
}

#[test]
fn test_config_rejects_broken_yaml() {
    let mut path = env::temp_dir();
    path.push("teamledger_broken_config.conf");
    fs::write(&path, "database: [unclosed\n").expect("write config");

    assert!(matches!(
        Config::load(Some(path.as_path())),
        Err(AppError::Config(_))
    ));
}
