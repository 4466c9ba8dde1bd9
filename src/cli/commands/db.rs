use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::balances::BalanceReport;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{CYAN, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    // bare `db` behaves like `db --info`
    let nothing_selected = !(*migrate || *check || *vacuum || *show_info);

    if *migrate {
        println!("{}▶ Applying pending schema migrations…{}", CYAN, RESET);
        run_pending_migrations(&pool.conn)?;
        success("Schema is up to date.");
    }

    if *show_info || nothing_selected {
        stats::print_db_info(&mut pool, &cfg.database)?;
    }

    if *check {
        check_ledger(&pool)?;
    }

    if *vacuum {
        println!("{}▶ Compacting ledger database…{}", CYAN, RESET);
        pool.conn.execute_batch("VACUUM;")?;
        success("Vacuum completed.");
    }

    Ok(())
}

/// SQLite integrity, dangling references and stored balances vs. history.
fn check_ledger(pool: &DbPool) -> AppResult<()> {
    println!("{}▶ Checking ledger consistency…{}", CYAN, RESET);

    let integrity: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    if integrity == "ok" {
        success("SQLite integrity check passed.");
    } else {
        warning(format!("SQLite integrity check failed: {integrity}"));
    }

    let dangling: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM pragma_foreign_key_check",
        [],
        |row| row.get(0),
    )?;
    if dangling == 0 {
        success("No dangling references.");
    } else {
        warning(format!("{dangling} row(s) reference missing records."));
    }

    let report = BalanceReport::load(&pool.conn)?;
    let stale = report.stale();
    if stale.is_empty() {
        info(format!(
            "Stored balances match history for {} player(s).",
            report.players.len()
        ));
    } else {
        warning(format!(
            "Stored balance differs from history for {} player(s); run `teamledger recalc`",
            stale.len()
        ));
    }

    Ok(())
}
