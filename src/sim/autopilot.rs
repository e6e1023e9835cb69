//! Scripted player for headless runs and soak tests
//!
//! Flaps whenever the actor has sunk below a hover line under the next gap
//! and is falling. The hover line sits half a flap's rise below the gap
//! center, so one flap carries the actor to roughly the same distance above.

use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// Height gained by a full-strength flap from rest under current gravity
pub fn flap_rise(state: &GameState) -> f64 {
    let actor = &state.config.actor;
    if actor.gravity <= 0.0 {
        return 0.0;
    }
    let strength = state.modifiers.flap_strength(&state.config.modifiers);
    let v = actor.flap_impulse * strength;
    v * v / (2.0 * actor.gravity)
}

/// Vertical center the actor should steer toward right now
pub fn target_y(state: &GameState) -> f64 {
    let bounds = state.actor.bounds();
    let width = state.obstacles.width;
    state
        .obstacles
        .iter()
        .find(|o| o.trailing_edge(width) >= bounds.min.x)
        .map(|o| o.gap_top + state.gap_height() / 2.0)
        .unwrap_or(state.config.height / 2.0)
}

/// Input for the next tick. Outside of play this does nothing; lifecycle is
/// left to the caller.
pub fn autopilot_input(state: &GameState) -> TickInput {
    if state.phase() != GamePhase::Playing {
        return TickInput::default();
    }
    let hover = target_y(state) + flap_rise(state) / 2.0;
    TickInput {
        flap: state.actor.pos.y > hover && state.actor.velocity >= 0.0,
        ..Default::default()
    }
}
