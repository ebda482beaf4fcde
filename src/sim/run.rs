//! Run state machine
//!
//! Idle --confirm--> Running --collision--> GameOver --confirm--> (reset) Running.
//! Nothing here is time based; every transition comes from an intent or a
//! contact.

use super::state::{GameEvent, GameState, RunState};

/// Route a confirm intent by run state. Returns true if a transition happened.
pub fn confirm(state: &mut GameState) -> bool {
    match state.run_state {
        RunState::Idle => start_run(state),
        RunState::Running => false,
        RunState::GameOver => {
            reset_run(state);
            start_run(state);
            state.push_event(GameEvent::RunRestarted);
            true
        }
    }
}

/// Idle -> Running
pub fn start_run(state: &mut GameState) -> bool {
    if state.run_state != RunState::Idle {
        return false;
    }
    state.run_state = RunState::Running;
    state.push_event(GameEvent::RunStarted);
    log::info!("Run started (best {})", state.stats.best);
    true
}

/// Clear the run back to Idle: no obstacles, zero score, craft centred
pub fn reset_run(state: &mut GameState) {
    state.obstacles.clear();
    state.stats.score = 0.0;
    state.spawner.reset();
    state.player.recenter(&state.tuning);
    state.run_state = RunState::Idle;
}

/// Running -> GameOver. Folds the score into best exactly once per run.
pub fn end_run(state: &mut GameState) -> bool {
    if state.run_state != RunState::Running {
        return false;
    }
    state.run_state = RunState::GameOver;
    let new_best = state.stats.finish_run();
    let score = state.stats.displayed();
    let best = state.stats.best;
    log::info!("Game over: score {} (best {}{})", score, best, if new_best { ", new best" } else { "" });
    state.push_event(GameEvent::GameOver {
        score,
        best,
        new_best,
    });
    true
}
