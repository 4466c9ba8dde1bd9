use crate::cli::commands::{authorize, open_pool};
use crate::cli::parser::{Cli, PayAction};
use crate::config::Config;
use crate::core::payment::PaymentLogic;
use crate::core::recalc::RecalcLogic;
use crate::db::queries::{find_payment, load_payments, load_players};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::colors::{color_for_balance, paint};
use crate::utils::format_amount;
use crate::utils::table::{Column, Table};
use std::collections::HashMap;

pub fn handle(action: &PayAction, cli: &Cli, cfg: &Config) -> AppResult<()> {
    match action {
        PayAction::Add {
            player_id,
            amount,
            note,
        } => {
            authorize(cli, cfg, "pay add")?;
            let mut pool = open_pool(cfg)?;
            let (payment, result) =
                PaymentLogic::add(&mut pool, *player_id, *amount, note.clone())?;

            success(format!(
                "Payment #{} recorded: {} for player #{}, balance now {}",
                payment.id,
                format_amount(payment.amount, &cfg.currency_symbol, true),
                payment.player_id,
                format_amount(result.balance_of(payment.player_id), &cfg.currency_symbol, true)
            ));
            RecalcLogic::report(&result);
        }

        PayAction::Del { id, yes } => {
            authorize(cli, cfg, "pay del")?;
            let mut pool = open_pool(cfg)?;

            let payment = find_payment(&pool.conn, *id)?.ok_or(AppError::PaymentNotFound(*id))?;
            if !*yes
                && !confirm(&format!(
                    "Delete payment #{} of {} (player #{})?",
                    payment.id,
                    format_amount(payment.amount, &cfg.currency_symbol, true),
                    payment.player_id
                ))
            {
                info("Deletion cancelled.");
                return Ok(());
            }

            let (payment, result) = PaymentLogic::delete(&mut pool, *id)?;
            success(format!("Payment #{} deleted", payment.id));
            RecalcLogic::report(&result);
        }

        PayAction::List { player } => {
            let pool = open_pool(cfg)?;
            let payments = load_payments(&pool.conn, *player)?;
            if payments.is_empty() {
                warning("No payments found.");
                return Ok(());
            }

            let players = load_players(&pool.conn)?;
            let names: HashMap<i64, &str> =
                players.iter().map(|p| (p.id, p.name.as_str())).collect();

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Player"),
                Column::right("Amount"),
                Column::left("Note"),
                Column::left("Recorded"),
            ]);
            for p in &payments {
                let who = match names.get(&p.player_id) {
                    Some(name) => format!("#{} {}", p.player_id, name),
                    None => format!("#{} ?", p.player_id),
                };
                table.add_row(vec![
                    p.id.to_string(),
                    who,
                    paint(
                        &format_amount(p.amount, &cfg.currency_symbol, true),
                        color_for_balance(p.amount),
                    ),
                    paint(p.notes.as_deref().unwrap_or("-"), ""),
                    p.created_at.chars().take(19).collect(),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
