//! Level builders shared by the unit tests.

use rand::{rngs::StdRng, SeedableRng as _};

use crate::{
    entities::Monster,
    game::Game,
    grid::{CellKind, Grid, Position},
    state::GameState,
};

/// Open arena used as the base layout of hand-built test levels.
const ARENA: &str = "\
############
#..........#
#..........#
#..........#
#..........#
#..........#
#..........#
#..........#
#..........#
#..........#
#..........#
############";

/// Builds the open arena with the listed cells overwritten.
pub(crate) fn arena(overrides: &[(usize, usize, CellKind)]) -> Grid {
    let mut grid = Grid::parse(ARENA).expect("arena layout should parse");

    for &(x, y, kind) in overrides {
        grid.set(Position::new(x, y), kind);
    }

    grid
}

/// Builds a fresh game state on the arena with the given overrides and monsters.
pub(crate) fn state(overrides: &[(usize, usize, CellKind)], monsters: Vec<Monster>) -> GameState {
    GameState::new(arena(overrides), monsters)
}

/// Builds a controller around a hand-built level with a fixed random source.
pub(crate) fn game(overrides: &[(usize, usize, CellKind)], monsters: Vec<Monster>) -> Game<StdRng> {
    Game::with_state(state(overrides, monsters), StdRng::seed_from_u64(0))
}
