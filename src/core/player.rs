use crate::core::calculator::ledger::Recalculation;
use crate::core::recalc::RecalcLogic;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_player, find_player, insert_player, update_player};
use crate::errors::{AppError, AppResult};
use crate::models::player::{Player, PlayerId};
use crate::models::role::Role;

/// Field changes for `player edit`; `None` keeps the current value.
#[derive(Debug, Default, Clone)]
pub struct PlayerChanges {
    pub name: Option<String>,
    pub role: Option<Role>,
    /// `Some(None)` removes the player from any group.
    pub group: Option<Option<i64>>,
}

impl PlayerChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.role.is_none() && self.group.is_none()
    }
}

pub struct PlayerLogic;

fn clean_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Other("Player name cannot be empty".into()));
    }
    Ok(trimmed.to_string())
}

impl PlayerLogic {
    pub fn add(
        pool: &mut DbPool,
        name: &str,
        role: Role,
        group: Option<i64>,
    ) -> AppResult<(Player, Recalculation)> {
        let name = clean_name(name)?;

        RecalcLogic::within(pool, "player_add", &name, |conn| {
            let mut player = Player::new(0, &name, role, group);
            player.id = insert_player(conn, &player)?;

            let msg = format!(
                "Added player #{} {} ({}, {})",
                player.id,
                player.name,
                player.role,
                player.group_label()
            );
            Ok((player, msg))
        })
    }

    /// Role and group feed the attendance rules, so every edit recomputes.
    pub fn edit(
        pool: &mut DbPool,
        id: PlayerId,
        changes: PlayerChanges,
    ) -> AppResult<(Player, Recalculation)> {
        let name = changes.name.as_deref().map(clean_name).transpose()?;

        RecalcLogic::within(pool, "player_edit", &format!("#{id}"), |conn| {
            let mut player = find_player(conn, id)?.ok_or(AppError::PlayerNotFound(id))?;

            if let Some(n) = name {
                player.name = n;
            }
            if let Some(r) = changes.role {
                player.role = r;
            }
            if let Some(g) = changes.group {
                player.group_id = g;
            }

            update_player(conn, &player)?;

            let msg = format!(
                "Player #{} is now {} ({}, {})",
                player.id,
                player.name,
                player.role,
                player.group_label()
            );
            Ok((player, msg))
        })
    }

    /// Deletes the player together with their attendance and payments.
    pub fn delete(pool: &mut DbPool, id: PlayerId) -> AppResult<(Player, Recalculation)> {
        RecalcLogic::within(pool, "player_del", &format!("#{id}"), |conn| {
            let player = find_player(conn, id)?.ok_or(AppError::PlayerNotFound(id))?;
            delete_player(conn, id)?;

            let msg = format!("Deleted player #{} {}", player.id, player.name);
            Ok((player, msg))
        })
    }
}
