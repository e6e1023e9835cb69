//! Per-tick simulation step
//!
//! Fixed order within one tick:
//! 1. lifecycle intents (difficulty, menu, restart); a transition ends the tick
//! 2. flap
//! 3. modifier expiry/decay, gravity and integration
//! 4. spawn scheduling, then field advancement and pruning
//! 5. pass/score, pickup collection, win check, collision check
//!
//! Win is checked before collision, so reaching the win score on the same
//! tick as a crash still wins.

use super::collision::actor_out_of_bounds;
use super::state::{GameEvent, GamePhase, GameState};
use crate::config::Difficulty;

/// Player intents for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Upward impulse (click/tap/space)
    pub flap: bool,
    /// Start a run from the menu, or restart after a game over
    pub restart: bool,
    /// Abandon the run, or acknowledge a win/game over
    pub return_to_menu: bool,
    /// Honoured only in the menu
    pub set_difficulty: Option<Difficulty>,
}

impl TickInput {
    pub fn flap() -> Self {
        Self {
            flap: true,
            ..Default::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Default::default()
        }
    }

    pub fn return_to_menu() -> Self {
        Self {
            return_to_menu: true,
            ..Default::default()
        }
    }
}

/// Advance the game state by `dt` seconds and report what happened
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    if let Some(difficulty) = input.set_difficulty {
        state.set_difficulty(difficulty);
    }
    if input.return_to_menu && state.return_to_menu() {
        return events;
    }
    if input.restart && state.start_run() {
        return events;
    }

    if state.phase() != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;
    state.elapsed_since_phase_change += dt;

    if input.flap {
        let strength = state.modifiers.flap_strength(&state.config.modifiers);
        state.actor.flap(state.config.actor.flap_impulse, strength);
        events.push(GameEvent::Flapped);
    }

    state.modifiers.step(dt, &state.config.modifiers);
    state.actor.apply_gravity(state.config.actor.gravity, dt);
    state.actor.integrate(dt, state.config.actor.tilt_factor);

    let obstacle_interval = state.obstacle_interval();
    let due = state
        .spawner
        .step(dt, obstacle_interval, state.config.pickups.interval);
    if due.obstacle {
        state.spawn_obstacle();
    }
    if due.pickup {
        state.spawn_pickup();
    }

    let speed = state.modifiers.scroll_speed();
    state.obstacles.advance(dt, speed);
    state.pickups.advance(dt, speed);

    for _ in 0..state.obstacles.check_passed(state.actor.pos.x) {
        state.record_pass();
        events.push(GameEvent::Scored);
    }

    let collected = state
        .pickups
        .check_collected(state.actor.pos, state.config.actor.pickup_reach)
        .map(|p| p.kind);
    if let Some(kind) = collected {
        state.modifiers.activate(kind, &state.config.modifiers);
        events.push(GameEvent::Collected(kind));
    }

    if state.win_reached() {
        if state.win() {
            events.push(GameEvent::Won);
        }
        return events;
    }

    let bounds = state.actor.bounds();
    let crashed = actor_out_of_bounds(&bounds, state.config.height)
        || state.obstacles.collides_with(&bounds, state.gap_height());
    if crashed && state.game_over() {
        events.push(GameEvent::GameOver);
    }

    events
}
