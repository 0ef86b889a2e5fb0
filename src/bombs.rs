//! Bomb placement, blast computation and detonation.
//!
//! A bomb goes through three steps: it is placed, its fuse burns for [`FUSE`], then it detonates
//! and the blast stays on display for [`EXPLOSION_DISPLAY`] before being cleared. Timing is the
//! controller's job (see [`Game::advance`](crate::game::Game::advance)); this module only works out
//! what each step does.

use std::{collections::BTreeSet, time::Duration};

use crate::{
    collision,
    entities::ActiveBomb,
    grid::{CellKind, Direction, Grid, Position},
    state::{Effect, GameState, Rejection},
};

/// Delay between placing a bomb and its detonation.
pub const FUSE: Duration = Duration::from_millis(2000);

/// How long a blast stays visible (and harmful) after detonation.
pub const EXPLOSION_DISPLAY: Duration = Duration::from_millis(500);

/// Points awarded per destructible block cleared by a blast.
pub const SCORE_DESTRUCTIBLE: u32 = 10;

/// Points awarded per monster caught in a blast.
pub const SCORE_MONSTER: u32 = 100;

/// Resolves placing a bomb with the given id under the player.
///
/// # Errors
///
/// - [`Rejection::TerminalStateNoop`] when the game is over
/// - [`Rejection::RejectedBombPlacement`] when the player has no bomb in hand
pub fn place_bomb(state: &GameState, id: u64) -> Result<Vec<Effect>, Rejection> {
    if state.status.is_terminal() {
        return Err(Rejection::TerminalStateNoop);
    }

    let player = &state.entities.player;
    if player.bombs == 0 {
        return Err(Rejection::RejectedBombPlacement);
    }

    Ok(vec![
        Effect::SpendBomb,
        Effect::AddBomb(ActiveBomb {
            id,
            position: player.position,
        }),
    ])
}

/// Computes the cells a blast from `origin` reaches.
///
/// The origin is always included. Each arm extends up to `range` cells and stops before walls and
/// the board edge; a destructible block is included but ends the arm.
#[must_use]
pub fn blast_cells(grid: &Grid, origin: Position, range: u8) -> BTreeSet<Position> {
    let mut cells = BTreeSet::from([origin]);

    for direction in Direction::ALL {
        let mut cursor = origin;

        for _ in 0..range {
            let Some(next) = cursor.step(direction) else {
                break;
            };

            match grid.get(next) {
                None | Some(CellKind::Wall) => break,
                Some(CellKind::Destructible) => {
                    let _ = cells.insert(next);
                    break;
                }
                Some(_) => {
                    let _ = cells.insert(next);
                }
            }

            cursor = next;
        }
    }

    cells
}

/// Resolves the detonation of an active bomb.
///
/// The blast uses the player's range at the moment of detonation, not at placement. Returns `None`
/// if no bomb with that id is on the board.
#[must_use]
pub fn detonate(state: &GameState, id: u64) -> Option<Vec<Effect>> {
    let bomb = state.entities.bomb(id)?;
    let blast = blast_cells(&state.grid, bomb.position, state.entities.player.range);

    let mut effects = vec![Effect::RemoveBomb(id)];

    for &position in &blast {
        if state.grid.get(position) == Some(CellKind::Destructible) {
            effects.push(Effect::ClearTile(position));
            effects.push(Effect::AwardScore(SCORE_DESTRUCTIBLE));
        }
    }

    for monster in &state.entities.monsters {
        if blast.contains(&monster.position) {
            effects.push(Effect::RemoveMonster(monster.id));
            effects.push(Effect::AwardScore(SCORE_MONSTER));
        }
    }

    effects.extend(collision::blast_damage(state, &blast));
    effects.push(Effect::ShowExplosion(blast));

    Some(effects)
}

/// Resolves the end of an explosion display: the blast disappears and a bomb comes back.
#[must_use]
pub fn clear_explosion() -> Vec<Effect> {
    vec![Effect::ClearExplosion, Effect::ReplenishBomb]
}
