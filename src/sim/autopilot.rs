//! Idle/demo mode - AI plays the game
//!
//! Looks at the meteors still ahead of the craft and steers toward the lane
//! whose nearest meteor is farthest away.

use super::state::{GameState, RunState};
use super::tick::TickInput;
use crate::consts::LANE_COUNT;
use crate::input::Intent;

/// Stay put while the current lane is at least this clear
const SAFE_DISTANCE: f32 = 8.0;

/// Distance from the craft to the nearest meteor still ahead in `lane`
/// (infinite when the lane is clear)
pub fn lane_clearance(state: &GameState, lane: usize) -> f32 {
    let player_z = state.player.pos().z;
    let reach = state.tuning.contact_depth;
    state
        .obstacles
        .iter()
        .filter(|o| o.lane == lane && o.depth() < player_z + reach)
        .map(|o| player_z - o.depth())
        .fold(f32::INFINITY, f32::min)
}

/// Lane the autopilot wants to be in
pub fn pick_lane(state: &GameState) -> usize {
    let current = state.player.lane();
    if lane_clearance(state, current) >= SAFE_DISTANCE {
        return current;
    }

    (0..LANE_COUNT)
        .max_by(|&a, &b| {
            let ca = lane_clearance(state, a);
            let cb = lane_clearance(state, b);
            // Ties go to the lane closest to where we already are
            ca.partial_cmp(&cb)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| current.abs_diff(b).cmp(&current.abs_diff(a)))
        })
        .unwrap_or(current)
}

/// Intents for this tick
pub fn autopilot_input(state: &GameState) -> TickInput {
    match state.run_state {
        RunState::Idle | RunState::GameOver => TickInput::single(Intent::Confirm),
        RunState::Running => {
            let current = state.player.lane();
            let target = pick_lane(state);
            if target < current {
                TickInput::single(Intent::MoveLeft)
            } else if target > current {
                TickInput::single(Intent::MoveRight)
            } else {
                TickInput::default()
            }
        }
    }
}
