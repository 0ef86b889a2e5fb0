//! This crate contains the game logic and terminal front end of blastmaze, a single-player bomb
//! maze played on a fixed-size grid.
//!
//! The simulation is split into pure resolvers that read a [`state::GameState`] and describe their
//! outcome as [`state::Effect`] lists, and a [`game::Game`] controller that applies those effects
//! and drives fuses, explosion cleanup and monster steps off a simulated clock.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
pub mod bombs;
pub mod collision;
mod config;
pub mod entities;
mod events;
#[cfg(test)]
mod fixtures;
pub mod game;
pub mod grid;
pub mod logging;
pub mod movement;
pub mod schedule;
pub mod state;
mod types;
mod ui;

pub use app::App;
pub use config::Config;
