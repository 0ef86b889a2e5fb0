//! Game controller.
//!
//! [`Game`] owns the whole simulation: the [`GameState`] aggregate, the injected random source,
//! the simulated clock and the [`Schedule`] of pending bomb events. Input intents and clock
//! advances are serialized through it one at a time; the presentation layer only reads from it.

use std::time::Duration;

use log::{debug, info};
use rand::Rng;

use crate::{
    bombs, collision,
    grid::{CellKind, Direction, Position},
    movement,
    schedule::{Event, Schedule},
    state::{Effect, GameState, GameStatus, Rejection},
};

/// Default period between two monster steps, in milliseconds.
pub const MONSTER_INTERVAL_MS: u64 = 800;

/// Default period between two monster steps.
pub const MONSTER_INTERVAL: Duration = Duration::from_millis(MONSTER_INTERVAL_MS);

/// Shortest monster step period accepted; keeps [`Game::advance`] from spinning.
const MIN_MONSTER_INTERVAL: Duration = Duration::from_millis(1);

/// Scalar values shown in the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    /// Remaining health.
    pub health: u8,
    /// Bombs in hand.
    pub bombs: u8,
    /// Bomb capacity.
    pub max_bombs: u8,
    /// Blast range.
    pub range: u8,
    /// Points collected.
    pub score: u32,
    /// Game outcome so far.
    pub status: GameStatus,
}

/// Orchestrates a game from reset to win or loss.
#[derive(Debug)]
pub struct Game<R: Rng> {
    /// The simulation aggregate.
    state: GameState,
    /// Random source for level generation and monster steps.
    rng: R,
    /// Pending detonations and explosion clears.
    schedule: Schedule,
    /// Simulated time elapsed since the controller was created.
    clock: Duration,
    /// Simulated time of the next monster step.
    next_monster_tick: Duration,
    /// Period between monster steps.
    monster_interval: Duration,
    /// Id handed to the next placed bomb.
    next_bomb_id: u64,
}

impl<R: Rng> Game<R> {
    /// Starts a game on a freshly generated level.
    pub fn new(mut rng: R) -> Self {
        let state = GameState::generate(&mut rng);
        Self::with_state(state, rng)
    }

    /// Starts a game from an existing state, for instance a hand-built level.
    pub fn with_state(state: GameState, rng: R) -> Self {
        Self {
            state,
            rng,
            schedule: Schedule::new(),
            clock: Duration::ZERO,
            next_monster_tick: MONSTER_INTERVAL,
            monster_interval: MONSTER_INTERVAL,
            next_bomb_id: 0,
        }
    }

    /// Sets the period between monster steps.
    #[must_use]
    pub fn with_monster_interval(mut self, interval: Duration) -> Self {
        self.monster_interval = interval.max(MIN_MONSTER_INTERVAL);
        self.next_monster_tick = self.clock.saturating_add(self.monster_interval);
        self
    }

    /// Starts over on a new level.
    ///
    /// This works in any status and drops every pending bomb event of the previous game.
    pub fn reset(&mut self) {
        self.state = GameState::generate(&mut self.rng);
        self.schedule.clear();
        self.next_bomb_id = 0;
        self.next_monster_tick = self.clock.saturating_add(self.monster_interval);

        info!(
            "new game with {} monsters",
            self.state.entities.monsters.len()
        );
    }

    /// Moves the player one cell, then judges the hazards on the new cell.
    ///
    /// Returns every effect that was applied, tile effects first and hazard damage last.
    ///
    /// # Errors
    ///
    /// - [`Rejection::TerminalStateNoop`] when the game is over
    /// - [`Rejection::RejectedMove`] when the move is blocked
    pub fn on_direction(&mut self, direction: Direction) -> Result<Vec<Effect>, Rejection> {
        let mut effects = movement::resolve_player_move(&self.state, direction)?;
        self.state.apply_all(&effects);

        let hazards = collision::check_hazard(&self.state, self.state.entities.player.position);
        self.state.apply_all(&hazards);
        effects.extend(hazards);

        Ok(effects)
    }

    /// Moves the player by a `(dx, dy)` intent, as sent by the input layer.
    ///
    /// # Errors
    ///
    /// - [`Rejection::TerminalStateNoop`] when the game is over
    /// - [`Rejection::RejectedMove`] when the vector is not an orthogonal unit step or the move is
    ///   blocked
    pub fn on_delta(&mut self, dx: isize, dy: isize) -> Result<Vec<Effect>, Rejection> {
        if self.state.status.is_terminal() {
            return Err(Rejection::TerminalStateNoop);
        }

        let direction = Direction::from_delta(dx, dy).ok_or(Rejection::RejectedMove)?;
        self.on_direction(direction)
    }

    /// Places a bomb under the player and lights its fuse.
    ///
    /// # Errors
    ///
    /// - [`Rejection::TerminalStateNoop`] when the game is over
    /// - [`Rejection::RejectedBombPlacement`] when no bomb is in hand
    pub fn on_place_bomb(&mut self) -> Result<Vec<Effect>, Rejection> {
        let id = self.next_bomb_id;
        let effects = bombs::place_bomb(&self.state, id)?;
        self.state.apply_all(&effects);

        self.next_bomb_id += 1;
        self.schedule
            .push(self.clock.saturating_add(bombs::FUSE), Event::Detonate(id));
        debug!(
            "bomb {id} placed at {}",
            self.state.entities.player.position
        );

        Ok(effects)
    }

    /// Moves every monster one step.
    ///
    /// # Errors
    ///
    /// - [`Rejection::TerminalStateNoop`] when the game is over
    pub fn on_tick(&mut self) -> Result<Vec<Effect>, Rejection> {
        let effects = movement::step_monsters(&self.state, &mut self.rng)?;
        self.state.apply_all(&effects);

        Ok(effects)
    }

    /// Advances the simulated clock, firing due bomb events and monster steps in time order.
    ///
    /// Bomb events win ties with monster steps. Events that come due after the game ended are
    /// dropped without effect, and monsters stop moving.
    pub fn advance(&mut self, elapsed: Duration) {
        let target = self.clock.saturating_add(elapsed);

        loop {
            let scheduled = self.schedule.next_due().filter(|due| *due <= target);
            let tick = (self.next_monster_tick <= target).then_some(self.next_monster_tick);

            match (scheduled, tick) {
                (Some(due), Some(tick_at)) if tick_at < due => self.fire_monster_tick(tick_at),
                (Some(due), _) => self.fire_scheduled(due),
                (None, Some(tick_at)) => self.fire_monster_tick(tick_at),
                (None, None) => break,
            }
        }

        self.clock = target;
    }

    /// Runs the monster step due at `at` and schedules the next one.
    fn fire_monster_tick(&mut self, at: Duration) {
        self.clock = at;
        self.next_monster_tick = at.saturating_add(self.monster_interval);

        // Rejected ticks only happen once the game is over.
        if let Ok(effects) = self.on_tick() {
            debug!("monster tick at {at:?} moved {}", effects.len());
        }
    }

    /// Runs the scheduled event due at `due`.
    fn fire_scheduled(&mut self, due: Duration) {
        self.clock = due;

        let Some((_, event)) = self.schedule.pop_due(due) else {
            return;
        };

        if self.state.status.is_terminal() {
            debug!("dropping {event:?}, game is over");
            return;
        }

        match event {
            Event::Detonate(id) => {
                if let Some(effects) = bombs::detonate(&self.state, id) {
                    self.state.apply_all(&effects);
                    self.schedule.push(
                        due.saturating_add(bombs::EXPLOSION_DISPLAY),
                        Event::ClearExplosion,
                    );
                    info!(
                        "bomb {id} detonated over {} cells, score {}",
                        self.state.entities.explosions.len(),
                        self.state.score
                    );
                }
            }
            Event::ClearExplosion => self.state.apply_all(&bombs::clear_explosion()),
        }
    }

    /// The simulation aggregate.
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Simulated time elapsed since the controller was created.
    pub const fn clock(&self) -> Duration {
        self.clock
    }

    /// Current game outcome.
    pub const fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Points collected so far.
    pub const fn score(&self) -> u32 {
        self.state.score
    }

    /// Snapshot of the heads-up display values.
    pub const fn hud(&self) -> Hud {
        let player = &self.state.entities.player;

        Hud {
            health: player.health,
            bombs: player.bombs,
            max_bombs: player.max_bombs,
            range: player.range,
            score: self.state.score,
            status: self.state.status,
        }
    }

    /// Cell kind at `position`, or `None` off the board.
    pub fn cell_at(&self, position: Position) -> Option<CellKind> {
        self.state.grid.get(position)
    }

    /// Whether the player stands on `position`.
    pub fn player_at(&self, position: Position) -> bool {
        self.state.entities.player.position == position
    }

    /// Whether a monster stands on `position`.
    pub fn monster_at(&self, position: Position) -> bool {
        self.state.entities.monster_at(position)
    }

    /// Whether an active bomb lies on `position`.
    pub fn bomb_at(&self, position: Position) -> bool {
        self.state.entities.bomb_at(position)
    }

    /// Whether `position` is part of the explosion on display.
    pub fn explosion_at(&self, position: Position) -> bool {
        self.state.entities.explosion_at(position)
    }
}
