use crate::cli::commands::{authorize, open_pool};
use crate::cli::parser::{Cli, PlayerAction};
use crate::config::Config;
use crate::core::player::{PlayerChanges, PlayerLogic};
use crate::core::recalc::RecalcLogic;
use crate::db::queries::{find_player, load_players};
use crate::errors::{AppError, AppResult};
use crate::models::player::Player;
use crate::models::role::Role;
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::colors::{color_for_balance, color_for_role, paint};
use crate::utils::format_amount;
use crate::utils::table::{Column, Table};

fn parse_role(raw: &str) -> AppResult<Role> {
    Role::from_input(raw).ok_or_else(|| AppError::InvalidRole(raw.to_string()))
}

pub fn handle(action: &PlayerAction, cli: &Cli, cfg: &Config) -> AppResult<()> {
    match action {
        PlayerAction::Add { name, role, group } => {
            authorize(cli, cfg, "player add")?;
            let role = role.as_deref().map(parse_role).transpose()?.unwrap_or_default();

            let mut pool = open_pool(cfg)?;
            let (player, result) = PlayerLogic::add(&mut pool, name, role, *group)?;

            success(format!(
                "Player #{} {} added ({}, {})",
                player.id,
                player.name,
                player.role,
                player.group_label()
            ));
            RecalcLogic::report(&result);
        }

        PlayerAction::Edit {
            id,
            name,
            role,
            group,
            no_group,
        } => {
            authorize(cli, cfg, "player edit")?;

            let changes = PlayerChanges {
                name: name.clone(),
                role: role.as_deref().map(parse_role).transpose()?,
                group: if *no_group { Some(None) } else { group.map(Some) },
            };
            if changes.is_empty() {
                info("Nothing to change: use --name, --role, --group or --no-group.");
                return Ok(());
            }

            let mut pool = open_pool(cfg)?;
            let (player, result) = PlayerLogic::edit(&mut pool, *id, changes)?;

            success(format!(
                "Player #{} updated: {} ({}, {}), balance {}",
                player.id,
                player.name,
                player.role,
                player.group_label(),
                format_amount(result.balance_of(player.id), &cfg.currency_symbol, true)
            ));
            RecalcLogic::report(&result);
        }

        PlayerAction::Del { id, yes } => {
            authorize(cli, cfg, "player del")?;
            let mut pool = open_pool(cfg)?;

            let player = find_player(&pool.conn, *id)?.ok_or(AppError::PlayerNotFound(*id))?;
            if !*yes
                && !confirm(&format!(
                    "Delete player #{} {} with all their attendance and payments?",
                    player.id, player.name
                ))
            {
                info("Deletion cancelled.");
                return Ok(());
            }

            let (player, result) = PlayerLogic::delete(&mut pool, *id)?;
            success(format!("Player #{} {} deleted", player.id, player.name));
            RecalcLogic::report(&result);
        }

        PlayerAction::List => {
            let pool = open_pool(cfg)?;
            let players = load_players(&pool.conn)?;

            if players.is_empty() {
                warning("The roster is empty.");
                return Ok(());
            }
            print!("{}", roster_table(&players, &cfg.currency_symbol).render());
        }
    }

    Ok(())
}

/// Roster as a table, shared with `balances`.
pub(crate) fn roster_table(players: &[Player], currency: &str) -> Table {
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Name"),
        Column::left("Role"),
        Column::left("Group"),
        Column::right("Balance"),
    ]);

    for p in players {
        table.add_row(vec![
            p.id.to_string(),
            p.name.clone(),
            paint(&p.role.to_string(), color_for_role(p.role)),
            paint(&p.group_label(), ""),
            paint(
                &format_amount(p.balance, currency, true),
                color_for_balance(p.balance),
            ),
        ]);
    }
    table
}
