use crate::cli::commands::open_pool;
use crate::cli::commands::player::roster_table;
use crate::cli::commands::session::adjustments_table;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::balances::BalanceReport;
use crate::core::recalc::RecalcLogic;
use crate::errors::AppResult;
use crate::models::adjustment::Adjustment;
use crate::ui::messages::{header, info, warning};
use crate::utils::format_amount;
use crate::utils::formatting::bold;
use crate::utils::table::{Column, Table};
use std::collections::HashMap;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Balances { reasons } = cmd {
        let pool = open_pool(cfg)?;
        let mut report = BalanceReport::load(&pool.conn)?;
        report.sort_by_balance();

        if report.players.is_empty() {
            warning("The roster is empty.");
            return Ok(());
        }

        print!("{}", roster_table(&report.players, &cfg.currency_symbol).render());
        println!(
            "\n{} {}",
            bold("Total:"),
            format_amount(report.stored_total(), &cfg.currency_symbol, true)
        );

        let stale = report.stale();
        if !stale.is_empty() {
            warning(format!(
                "Stored balance differs from history for {} player(s); run `teamledger recalc`",
                stale.len()
            ));
        }
        RecalcLogic::report(&report.derived);

        if *reasons {
            let names: HashMap<i64, &str> = report
                .players
                .iter()
                .map(|p| (p.id, p.name.as_str()))
                .collect();

            for p in &report.players {
                println!();
                header(format!(
                    "#{} {}: {}",
                    p.id,
                    p.name,
                    format_amount(report.derived.balance_of(p.id), &cfg.currency_symbol, true)
                ));

                let own: Vec<_> = report.derived.adjustments_for(p.id).cloned().collect();
                if own.is_empty() {
                    info("No adjustments.");
                    continue;
                }
                print!(
                    "{}",
                    with_origin(adjustments_table(&own, &names, &cfg.currency_symbol), &own)
                        .render()
                );
            }
        }
    }

    Ok(())
}

/// Replace the player column, redundant per player, with the origin.
fn with_origin(mut table: Table, own: &[Adjustment]) -> Table {
    table.columns[0] = Column::left("Origin");
    for (row, adj) in table.rows.iter_mut().zip(own) {
        row[0] = adj.origin.to_string();
    }
    table
}
