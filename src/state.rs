//! The simulation aggregate and the effects that change it.
//!
//! Every change to a running game is expressed as an [`Effect`]. Resolvers in
//! [`movement`](crate::movement), [`bombs`](crate::bombs) and [`collision`](crate::collision) read
//! a [`GameState`] and return the effects an event causes; the controller then feeds them to
//! [`GameState::apply`]. Keeping the two steps apart lets each transition be asserted on its own.

use std::{collections::BTreeSet, fmt};

use log::{debug, info};
use rand::Rng;

use crate::{
    entities::{ActiveBomb, Entities, Monster, MAX_HEALTH},
    grid::{self, CellKind, Grid, Position},
};

/// Overall outcome of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// The game is running.
    #[default]
    Playing,
    /// The player reached the exit.
    Won,
    /// The player ran out of health.
    Lost,
}

impl GameStatus {
    /// Whether the game has ended. Terminal states only change on reset.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Source of a point of damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hazard {
    /// A trap tile the player stepped on.
    Trap,
    /// A monster sharing the player's cell.
    Monster,
    /// An explosion covering the player's cell.
    Explosion,
}

/// Reason an intent was turned down.
///
/// None of these are failures: they are silent no-ops from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The target cell is off the board, solid, or holds a bomb.
    RejectedMove,
    /// No bomb capacity left.
    RejectedBombPlacement,
    /// The game is over; only a reset does anything.
    TerminalStateNoop,
}

impl fmt::Display for Rejection {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::RejectedMove => "move blocked",
            Self::RejectedBombPlacement => "no bomb available",
            Self::TerminalStateNoop => "game is over",
        };

        formatter.write_str(reason)
    }
}

/// A single explicit transition of the game state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Move the player to a cell.
    MovePlayer(Position),
    /// Turn a cell into [`CellKind::Empty`].
    ClearTile(Position),
    /// Add points to the score.
    AwardScore(u32),
    /// Take one health point; the game is lost when health reaches zero.
    Damage(Hazard),
    /// Restore one health point, up to [`MAX_HEALTH`].
    Heal,
    /// Raise bomb capacity and the bombs in hand by one.
    GainBombCapacity,
    /// Raise blast range by one.
    GainRange,
    /// Move a monster to a cell.
    MoveMonster {
        /// Monster to move.
        id: usize,
        /// Destination cell.
        to: Position,
    },
    /// Remove a monster from the level.
    RemoveMonster(usize),
    /// Take one bomb out of the player's hand.
    SpendBomb,
    /// Put a bomb on the board.
    AddBomb(ActiveBomb),
    /// Take a bomb off the board.
    RemoveBomb(u64),
    /// Replace the explosion on display with a blast set.
    ShowExplosion(BTreeSet<Position>),
    /// Stop displaying explosions.
    ClearExplosion,
    /// Return one bomb to the player's hand, up to capacity.
    ReplenishBomb,
    /// End the game with the given status.
    SetStatus(GameStatus),
}

/// Everything a running game consists of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Static board layout.
    pub grid: Grid,
    /// Player, monsters, bombs and explosions.
    pub entities: Entities,
    /// Points collected so far.
    pub score: u32,
    /// Whether the game is still running.
    pub status: GameStatus,
}

impl GameState {
    /// Builds a fresh game around an existing board and monster set.
    #[must_use]
    pub fn new(grid: Grid, monsters: Vec<Monster>) -> Self {
        Self {
            grid,
            entities: Entities::new(monsters),
            score: 0,
            status: GameStatus::Playing,
        }
    }

    /// Builds a fresh game on a newly generated level.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let (grid, monsters) = grid::generate(rng);
        debug!("generated level:\n{grid}");

        Self::new(grid, monsters)
    }

    /// Applies a batch of effects in order.
    pub fn apply_all(&mut self, effects: &[Effect]) {
        for effect in effects {
            self.apply(effect);
        }
    }

    /// Applies a single effect.
    pub fn apply(&mut self, effect: &Effect) {
        let player = &mut self.entities.player;

        match effect {
            Effect::MovePlayer(position) => player.position = *position,
            Effect::ClearTile(position) => self.grid.set(*position, CellKind::Empty),
            Effect::AwardScore(points) => self.score = self.score.saturating_add(*points),
            Effect::Damage(hazard) => {
                player.health = player.health.saturating_sub(1);
                debug!("player hit by {hazard:?}, health now {}", player.health);

                if player.health == 0 {
                    self.finish(GameStatus::Lost);
                }
            }
            Effect::Heal => player.health = player.health.saturating_add(1).min(MAX_HEALTH),
            Effect::GainBombCapacity => {
                player.max_bombs = player.max_bombs.saturating_add(1);
                player.bombs = player.bombs.saturating_add(1).min(player.max_bombs);
            }
            Effect::GainRange => player.range = player.range.saturating_add(1),
            Effect::MoveMonster { id, to } => {
                if let Some(monster) = self
                    .entities
                    .monsters
                    .iter_mut()
                    .find(|monster| monster.id == *id)
                {
                    monster.position = *to;
                }
            }
            Effect::RemoveMonster(id) => self.entities.monsters.retain(|monster| monster.id != *id),
            Effect::SpendBomb => player.bombs = player.bombs.saturating_sub(1),
            Effect::AddBomb(bomb) => self.entities.bombs.push(*bomb),
            Effect::RemoveBomb(id) => self.entities.bombs.retain(|bomb| bomb.id != *id),
            Effect::ShowExplosion(cells) => self.entities.explosions.clone_from(cells),
            Effect::ClearExplosion => self.entities.explosions.clear(),
            Effect::ReplenishBomb => {
                player.bombs = player.bombs.saturating_add(1).min(player.max_bombs);
            }
            Effect::SetStatus(status) => self.finish(*status),
        }
    }

    /// Moves a running game into a terminal status. Terminal statuses are never overwritten.
    fn finish(&mut self, status: GameStatus) {
        if self.status == GameStatus::Playing && status.is_terminal() {
            info!("game over: {status:?} with score {}", self.score);
            self.status = status;
        }
    }
}
