//! Moving parts of a level: the player, monsters, bombs in flight and explosion cells.

use std::collections::BTreeSet;

use crate::grid::Position;

/// Upper bound on player health.
pub const MAX_HEALTH: u8 = 5;

/// Health the player starts a game with.
pub const START_HEALTH: u8 = 3;

/// Bomb capacity the player starts a game with.
pub const START_BOMBS: u8 = 2;

/// Blast range the player starts a game with.
pub const START_RANGE: u8 = 2;

/// Cell the player starts every game on.
pub const PLAYER_SPAWN: Position = Position::new(1, 1);

/// The player avatar and its stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    /// Current cell.
    pub position: Position,
    /// Remaining health, between zero and [`MAX_HEALTH`].
    pub health: u8,
    /// Bombs that can be placed right now, never above `max_bombs`.
    pub bombs: u8,
    /// Bomb capacity.
    pub max_bombs: u8,
    /// Number of cells a blast reaches in each direction.
    pub range: u8,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: PLAYER_SPAWN,
            health: START_HEALTH,
            bombs: START_BOMBS,
            max_bombs: START_BOMBS,
            range: START_RANGE,
        }
    }
}

/// A wandering monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Monster {
    /// Stable identifier assigned at generation time.
    pub id: usize,
    /// Current cell.
    pub position: Position,
}

impl Monster {
    /// Builds a monster with the given id at `position`.
    #[must_use]
    pub const fn new(id: usize, position: Position) -> Self {
        Self { id, position }
    }
}

/// A placed bomb whose fuse is still burning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveBomb {
    /// Identifier unique within a game.
    pub id: u64,
    /// Cell the bomb was dropped on.
    pub position: Position,
}

/// Entity collections of a running game.
///
/// This structure is plain data. It is only changed through
/// [`GameState::apply`](crate::state::GameState::apply).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entities {
    /// The player.
    pub player: Player,
    /// Monsters still alive.
    pub monsters: Vec<Monster>,
    /// Bombs waiting to detonate.
    pub bombs: Vec<ActiveBomb>,
    /// Cells of the explosion currently on display.
    pub explosions: BTreeSet<Position>,
}

impl Entities {
    /// Builds the entity set of a fresh game: a default player and the given monsters.
    #[must_use]
    pub fn new(monsters: Vec<Monster>) -> Self {
        Self {
            monsters,
            ..Self::default()
        }
    }

    /// Whether any monster stands on `position`.
    #[must_use]
    pub fn monster_at(&self, position: Position) -> bool {
        self.monsters
            .iter()
            .any(|monster| monster.position == position)
    }

    /// Whether an active bomb lies on `position`.
    #[must_use]
    pub fn bomb_at(&self, position: Position) -> bool {
        self.bombs.iter().any(|bomb| bomb.position == position)
    }

    /// Whether `position` is part of the explosion on display.
    #[must_use]
    pub fn explosion_at(&self, position: Position) -> bool {
        self.explosions.contains(&position)
    }

    /// Looks up an active bomb by id.
    #[must_use]
    pub fn bomb(&self, id: u64) -> Option<&ActiveBomb> {
        self.bombs.iter().find(|bomb| bomb.id == id)
    }
}
