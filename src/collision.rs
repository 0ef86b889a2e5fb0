//! Damage the player takes from sharing a cell with monsters or explosions.

use std::collections::BTreeSet;

use crate::{
    grid::Position,
    state::{Effect, GameState, Hazard},
};

/// Judges the hazards standing on `position`.
///
/// A monster and an explosion on the same cell each cost a point of health, so both can fire in
/// one evaluation. Several monsters on the cell still count once.
#[must_use]
pub fn check_hazard(state: &GameState, position: Position) -> Vec<Effect> {
    let mut effects = Vec::new();

    if state.entities.monster_at(position) {
        effects.push(Effect::Damage(Hazard::Monster));
    }
    if state.entities.explosion_at(position) {
        effects.push(Effect::Damage(Hazard::Explosion));
    }

    effects
}

/// Judges whether a fresh blast catches the player.
#[must_use]
pub fn blast_damage(state: &GameState, blast: &BTreeSet<Position>) -> Option<Effect> {
    blast
        .contains(&state.entities.player.position)
        .then_some(Effect::Damage(Hazard::Explosion))
}
