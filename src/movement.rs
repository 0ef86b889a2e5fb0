//! Player and monster movement.
//!
//! Both resolvers only read the state and hand back the [`Effect`]s a move causes; applying them
//! is up to the caller.

use log::debug;
use rand::{seq::SliceRandom as _, Rng};

use crate::{
    grid::{CellKind, Direction, Position},
    state::{Effect, GameState, GameStatus, Hazard, Rejection},
};

/// Points awarded for picking up a bomb capacity upgrade.
pub const SCORE_BOMB_UPGRADE: u32 = 50;

/// Points awarded for picking up a range upgrade.
pub const SCORE_RANGE_UPGRADE: u32 = 50;

/// Points awarded for picking up a health upgrade.
pub const SCORE_HEALTH_UPGRADE: u32 = 30;

/// Resolves a player move one cell in `direction`.
///
/// The move itself comes first in the returned list, followed by whatever the target tile does to
/// the player. Hazards already standing on the target are judged separately by
/// [`collision::check_hazard`](crate::collision::check_hazard) once the move has been applied.
///
/// # Errors
///
/// - [`Rejection::TerminalStateNoop`] when the game is over
/// - [`Rejection::RejectedMove`] when the target is off the board, a wall, a destructible block
///   or holds an active bomb
pub fn resolve_player_move(
    state: &GameState,
    direction: Direction,
) -> Result<Vec<Effect>, Rejection> {
    if state.status.is_terminal() {
        return Err(Rejection::TerminalStateNoop);
    }

    let target = state
        .entities
        .player
        .position
        .step(direction)
        .ok_or(Rejection::RejectedMove)?;
    let cell = state.grid.get(target).ok_or(Rejection::RejectedMove)?;

    if !cell.is_walkable() || state.entities.bomb_at(target) {
        return Err(Rejection::RejectedMove);
    }

    let mut effects = vec![Effect::MovePlayer(target)];
    effects.extend(tile_effects(cell, target));

    Ok(effects)
}

/// Returns what stepping onto a cell of the given kind does to the player.
///
/// Consumable tiles are cleared as part of their effect.
#[must_use]
pub fn tile_effects(cell: CellKind, position: Position) -> Vec<Effect> {
    match cell {
        CellKind::Exit => vec![Effect::SetStatus(GameStatus::Won)],
        CellKind::Trap => vec![Effect::Damage(Hazard::Trap), Effect::ClearTile(position)],
        CellKind::UpgradeBombs => vec![
            Effect::GainBombCapacity,
            Effect::AwardScore(SCORE_BOMB_UPGRADE),
            Effect::ClearTile(position),
        ],
        CellKind::UpgradeRange => vec![
            Effect::GainRange,
            Effect::AwardScore(SCORE_RANGE_UPGRADE),
            Effect::ClearTile(position),
        ],
        CellKind::UpgradeHealth => vec![
            Effect::Heal,
            Effect::AwardScore(SCORE_HEALTH_UPGRADE),
            Effect::ClearTile(position),
        ],
        CellKind::Empty | CellKind::Wall | CellKind::Destructible => Vec::new(),
    }
}

/// Picks a random step for every monster.
///
/// Each monster looks at its four neighbours on the board as it is now and moves to one of those
/// that is empty or a trap, chosen uniformly; a monster with no such neighbour stays put. Monsters
/// don't coordinate, so two of them may end up sharing a cell.
///
/// # Errors
///
/// - [`Rejection::TerminalStateNoop`] when the game is over
pub fn step_monsters<R: Rng>(state: &GameState, rng: &mut R) -> Result<Vec<Effect>, Rejection> {
    if state.status.is_terminal() {
        return Err(Rejection::TerminalStateNoop);
    }

    let effects: Vec<Effect> = state
        .entities
        .monsters
        .iter()
        .filter_map(|monster| {
            let options: Vec<Position> = Direction::ALL
                .into_iter()
                .filter_map(|direction| monster.position.step(direction))
                .filter(|target| {
                    state
                        .grid
                        .get(*target)
                        .is_some_and(CellKind::is_monster_walkable)
                })
                .collect();

            options.choose(rng).map(|&to| Effect::MoveMonster {
                id: monster.id,
                to,
            })
        })
        .collect();

    debug!("{} of {} monsters moved", effects.len(), state.entities.monsters.len());

    Ok(effects)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;
    use crate::{
        entities::{ActiveBomb, Monster, PLAYER_SPAWN},
        fixtures,
        grid::GRID_SIZE,
    };

    #[test]
    fn test_move_onto_empty_cell() {
        let state = fixtures::state(&[], Vec::new());

        let effects = resolve_player_move(&state, Direction::Right).expect("move should succeed");
        assert_eq!(effects, vec![Effect::MovePlayer(Position::new(2, 1))]);
    }

    #[test]
    fn test_blocked_moves() {
        let state = fixtures::state(&[(2, 1, CellKind::Destructible)], Vec::new());

        assert_eq!(
            resolve_player_move(&state, Direction::Up),
            Err(Rejection::RejectedMove),
            "wall"
        );
        assert_eq!(
            resolve_player_move(&state, Direction::Right),
            Err(Rejection::RejectedMove),
            "destructible"
        );
    }

    #[test]
    fn test_bomb_blocks_move() {
        let mut state = fixtures::state(&[], Vec::new());
        state.entities.bombs.push(ActiveBomb {
            id: 0,
            position: Position::new(1, 2),
        });

        assert_eq!(
            resolve_player_move(&state, Direction::Down),
            Err(Rejection::RejectedMove)
        );
    }

    #[test]
    fn test_off_board_move_is_rejected() {
        let mut state = fixtures::state(&[], Vec::new());
        state.entities.player.position = Position::new(0, 0);
        assert_eq!(
            resolve_player_move(&state, Direction::Left),
            Err(Rejection::RejectedMove)
        );

        state.entities.player.position = Position::new(GRID_SIZE - 1, GRID_SIZE - 1);
        assert_eq!(
            resolve_player_move(&state, Direction::Right),
            Err(Rejection::RejectedMove)
        );
    }

    #[test]
    fn test_terminal_state_rejects_moves() {
        let mut state = fixtures::state(&[], Vec::new());
        state.status = GameStatus::Lost;

        assert_eq!(
            resolve_player_move(&state, Direction::Right),
            Err(Rejection::TerminalStateNoop)
        );
        assert_eq!(
            step_monsters(&state, &mut StdRng::seed_from_u64(1)),
            Err(Rejection::TerminalStateNoop)
        );
    }

    #[test]
    fn test_tile_effects() {
        let position = Position::new(3, 3);

        assert_eq!(
            tile_effects(CellKind::Exit, position),
            vec![Effect::SetStatus(GameStatus::Won)]
        );
        assert_eq!(
            tile_effects(CellKind::Trap, position),
            vec![Effect::Damage(Hazard::Trap), Effect::ClearTile(position)]
        );
        assert_eq!(
            tile_effects(CellKind::UpgradeRange, position),
            vec![
                Effect::GainRange,
                Effect::AwardScore(SCORE_RANGE_UPGRADE),
                Effect::ClearTile(position)
            ]
        );
        assert!(tile_effects(CellKind::Empty, position).is_empty());
    }

    #[test]
    fn test_upgrade_is_consumed_once() {
        let mut state = fixtures::state(&[(2, 1, CellKind::UpgradeBombs)], Vec::new());

        let effects = resolve_player_move(&state, Direction::Right).expect("move should succeed");
        state.apply_all(&effects);
        assert_eq!(state.entities.player.max_bombs, 3);
        assert_eq!(state.entities.player.bombs, 3);
        assert_eq!(state.score, SCORE_BOMB_UPGRADE);
        assert_eq!(state.grid.get(Position::new(2, 1)), Some(CellKind::Empty));

        let back = resolve_player_move(&state, Direction::Left).expect("move should succeed");
        state.apply_all(&back);
        let again = resolve_player_move(&state, Direction::Right).expect("move should succeed");
        assert_eq!(again, vec![Effect::MovePlayer(Position::new(2, 1))]);
    }

    #[test]
    fn test_monsters_only_walk_on_floor_and_traps() {
        // Monster boxed in by walls except for a trap to the right.
        let state = fixtures::state(
            &[
                (5, 4, CellKind::Wall),
                (5, 6, CellKind::Wall),
                (4, 5, CellKind::Destructible),
                (6, 5, CellKind::Trap),
            ],
            vec![Monster::new(0, Position::new(5, 5))],
        );

        for seed in 0..16 {
            let effects = step_monsters(&state, &mut StdRng::seed_from_u64(seed))
                .expect("game is running");
            assert_eq!(
                effects,
                vec![Effect::MoveMonster {
                    id: 0,
                    to: Position::new(6, 5)
                }]
            );
        }
    }

    #[test]
    fn test_trapped_monster_stays() {
        let state = fixtures::state(
            &[
                (5, 4, CellKind::Wall),
                (5, 6, CellKind::Wall),
                (4, 5, CellKind::Destructible),
                (6, 5, CellKind::UpgradeHealth),
            ],
            vec![Monster::new(0, Position::new(5, 5))],
        );

        let effects =
            step_monsters(&state, &mut StdRng::seed_from_u64(9)).expect("game is running");
        assert!(effects.is_empty());
    }

    #[test]
    fn test_monster_steps_are_orthogonal() {
        let state = fixtures::state(&[], vec![Monster::new(2, Position::new(6, 6))]);

        for seed in 0..16 {
            let effects = step_monsters(&state, &mut StdRng::seed_from_u64(seed))
                .expect("game is running");
            let Some(Effect::MoveMonster { id, to }) = effects.first() else {
                panic!("monster in the open should always move");
            };

            assert_eq!(*id, 2);
            assert_eq!(to.x.abs_diff(6) + to.y.abs_diff(6), 1);
        }
    }

    #[test]
    fn test_player_spawn_is_walkable_in_arena() {
        let state = fixtures::state(&[], Vec::new());

        assert_eq!(state.entities.player.position, PLAYER_SPAWN);
        assert_eq!(state.grid.get(PLAYER_SPAWN), Some(CellKind::Empty));
    }
}
