use crate::cli::commands::{authorize, open_pool};
use crate::cli::parser::{Cli, SessionAction};
use crate::config::Config;
use crate::core::recalc::RecalcLogic;
use crate::core::session::{SessionChanges, SessionLogic};
use crate::db::queries::{
    find_session_by_date, load_attendance_by_session, load_players, load_sessions_between,
};
use crate::errors::{AppError, AppResult};
use crate::models::adjustment::Adjustment;
use crate::models::attendance::AttendanceMark;
use crate::models::status::AttendanceStatus;
use crate::ui::messages::{confirm, header, info, success, warning};
use crate::utils::colors::{color_for_balance, color_for_role, color_for_status, paint};
use crate::utils::date::{parse_period, require_date};
use crate::utils::format_amount;
use crate::utils::formatting::yes_no;
use crate::utils::table::{Column, Table};
use std::collections::HashMap;

fn parse_marks(raw: &[String]) -> AppResult<Vec<AttendanceMark>> {
    raw.iter().map(|m| AttendanceMark::parse(m)).collect()
}

pub fn handle(action: &SessionAction, cli: &Cli, cfg: &Config) -> AppResult<()> {
    match action {
        SessionAction::Add {
            date,
            online,
            settled,
            marks,
        } => {
            authorize(cli, cfg, "session add")?;
            let date = require_date(date)?;
            let marks = parse_marks(marks)?;

            let mut pool = open_pool(cfg)?;
            let (write, result) = SessionLogic::add(&mut pool, date, *online, *settled, &marks)?;

            success(format!(
                "Session {} {} ({}, {} attendance record(s){})",
                write.session.date_str(),
                if write.created { "created" } else { "overwritten" },
                write.session.mode_label(),
                write.records,
                if write.session.is_settled { ", settled" } else { "" }
            ));
            RecalcLogic::report(&result);
        }

        SessionAction::Edit {
            date,
            new_date,
            online,
            marks,
        } => {
            authorize(cli, cfg, "session edit")?;
            let date = require_date(date)?;
            let changes = SessionChanges {
                new_date: new_date.as_deref().map(require_date).transpose()?,
                online: *online,
                marks: parse_marks(marks)?,
            };

            let mut pool = open_pool(cfg)?;
            let (session, result) = SessionLogic::edit(&mut pool, date, changes)?;

            success(format!(
                "Session {} updated ({})",
                session.date_str(),
                session.mode_label()
            ));
            RecalcLogic::report(&result);
        }

        SessionAction::Del { date, yes } => {
            authorize(cli, cfg, "session del")?;
            let date = require_date(date)?;
            let mut pool = open_pool(cfg)?;

            if find_session_by_date(&pool.conn, &date)?.is_none() {
                return Err(AppError::SessionNotFound(date.to_string()));
            }
            if !*yes && !confirm(&format!("Delete the session of {date} and its attendance?")) {
                info("Deletion cancelled.");
                return Ok(());
            }

            let (session, result) = SessionLogic::delete(&mut pool, date)?;
            success(format!("Session {} deleted", session.date_str()));
            RecalcLogic::report(&result);
        }

        SessionAction::Settle { date } => {
            authorize(cli, cfg, "session settle")?;
            let date = require_date(date)?;

            let mut pool = open_pool(cfg)?;
            let (session, result) = SessionLogic::toggle_settled(&mut pool, date)?;

            success(format!(
                "Session {} is now {}",
                session.date_str(),
                if session.is_settled { "settled" } else { "unsettled" }
            ));
            RecalcLogic::report(&result);
        }

        SessionAction::List { period } => {
            let bounds = period.as_deref().map(parse_period).transpose()?;
            let pool = open_pool(cfg)?;

            let sessions = load_sessions_between(&pool.conn, bounds)?;
            if sessions.is_empty() {
                warning("No sessions found.");
                return Ok(());
            }
            let attendance = load_attendance_by_session(&pool.conn)?;

            let mut columns = vec![
                Column::left("Date"),
                Column::left("Mode"),
                Column::left("Settled"),
            ];
            columns.extend(AttendanceStatus::ALL.iter().map(|s| Column::right(s.to_db_str())));
            let mut table = Table::new(columns);

            for s in &sessions {
                let mut counts: HashMap<AttendanceStatus, usize> = HashMap::new();
                for a in attendance.get(&s.id).into_iter().flatten() {
                    *counts.entry(a.status).or_default() += 1;
                }

                let mut row = vec![
                    s.date_str(),
                    s.mode_label().to_string(),
                    yes_no(s.is_settled).to_string(),
                ];
                row.extend(AttendanceStatus::ALL.iter().map(|st| {
                    let n = counts.get(st).copied().unwrap_or(0);
                    if n == 0 {
                        paint("-", "")
                    } else {
                        paint(&n.to_string(), color_for_status(*st))
                    }
                }));
                table.add_row(row);
            }

            print!("{}", table.render());
        }

        SessionAction::Show { date } => {
            let date = require_date(date)?;
            let pool = open_pool(cfg)?;
            let detail = SessionLogic::detail(&pool.conn, date)?;

            header(format!(
                "Session {} ({}, settled: {})",
                detail.session.date_str(),
                detail.session.mode_label(),
                yes_no(detail.session.is_settled)
            ));

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Player"),
                Column::left("Role"),
                Column::left("Group"),
                Column::left("Status"),
            ]);
            for (a, player) in &detail.attendance {
                let (name, role, group) = match player {
                    Some(p) => (
                        p.name.clone(),
                        paint(&p.role.to_string(), color_for_role(p.role)),
                        paint(&p.group_label(), ""),
                    ),
                    None => ("?".to_string(), paint("-", ""), paint("-", "")),
                };
                table.add_row(vec![
                    a.player_id.to_string(),
                    name,
                    role,
                    group,
                    paint(a.status.to_db_str(), color_for_status(a.status)),
                ]);
            }
            print!("{}", table.render());
            println!();

            if detail.adjustments.is_empty() {
                info("This session moves no money.");
                return Ok(());
            }

            // the treasurer may have no attendance row
            let players = load_players(&pool.conn)?;
            let names: HashMap<i64, &str> =
                players.iter().map(|p| (p.id, p.name.as_str())).collect();
            print!(
                "{}",
                adjustments_table(&detail.adjustments, &names, &cfg.currency_symbol).render()
            );
        }
    }

    Ok(())
}

/// Player, signed amount and reason of each adjustment.
pub(crate) fn adjustments_table(
    adjustments: &[Adjustment],
    names: &HashMap<i64, &str>,
    currency: &str,
) -> Table {
    let mut table = Table::new(vec![
        Column::left("Player"),
        Column::right("Amount"),
        Column::left("Reason"),
    ]);
    for adj in adjustments {
        let name = names
            .get(&adj.player_id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| format!("#{}", adj.player_id));
        table.add_row(vec![
            name,
            paint(
                &format_amount(adj.amount, currency, true),
                color_for_balance(adj.amount),
            ),
            adj.reason.clone(),
        ]);
    }
    table
}
