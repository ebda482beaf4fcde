//! Simulation tick
//!
//! Core game loop that advances the run by one clamped frame delta.

use super::collision::advance_obstacles;
use super::progression::{accrue, spawn_interval};
use super::run;
use super::spawner::spawn_obstacle;
use super::state::{GameState, RunState};
use crate::input::Intent;

/// Intents queued since the previous tick, in arrival order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub intents: Vec<Intent>,
}

impl TickInput {
    pub fn new(intents: Vec<Intent>) -> Self {
        Self { intents }
    }

    pub fn single(intent: Intent) -> Self {
        Self {
            intents: vec![intent],
        }
    }

    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    pub fn clear(&mut self) {
        self.intents.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

/// Apply one intent to the lane controller or the run state machine
pub fn apply_intent(state: &mut GameState, intent: Intent) {
    match intent {
        Intent::MoveLeft => {
            state.player.move_left();
        }
        Intent::MoveRight => {
            state.player.move_right();
        }
        Intent::Confirm => {
            run::confirm(state);
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    for &intent in &input.intents {
        apply_intent(state, intent);
    }

    state.time_ticks += 1;

    // The craft keeps easing in every state
    state.player.update(&state.tuning);

    // Score, spawns and obstacle motion only run while playing
    if state.run_state != RunState::Running {
        return;
    }

    accrue(&mut state.stats, dt, &state.tuning);

    let interval = spawn_interval(state.stats.score as f32, &state.tuning);
    if state.spawner.tick(dt, interval) {
        spawn_obstacle(state);
    }

    // Rotation is integrated alongside motion in advance_obstacles
    if advance_obstacles(state, dt).is_some() {
        run::end_run(state);
    }
}
