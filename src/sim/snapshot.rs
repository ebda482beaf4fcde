//! Render feed
//!
//! A read-only copy of everything presentation needs for one frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::progression::Difficulty;
use super::state::{GameState, RunState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub lane: usize,
    pub position: Vec3,
    /// Bank angle around the forward axis (radians)
    pub roll: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub lane: usize,
    pub position: Vec3,
    pub rotation: Vec3,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub run_state: RunState,
    pub status: &'static str,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    /// Whole points
    pub score: u64,
    pub best: u64,
    pub difficulty: Difficulty,
}

impl Snapshot {
    /// Capture the current frame. `reduced_motion` flattens the roll.
    pub fn capture(state: &GameState, reduced_motion: bool) -> Self {
        let roll = if reduced_motion {
            0.0
        } else {
            state.player.roll(&state.tuning)
        };

        Self {
            run_state: state.run_state,
            status: state.run_state.status_line(),
            player: PlayerView {
                lane: state.player.lane(),
                position: state.player.pos(),
                roll,
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    lane: o.lane,
                    position: o.pos,
                    rotation: o.rotation,
                })
                .collect(),
            score: state.stats.displayed(),
            best: state.stats.best,
            difficulty: Difficulty::at(state.stats.score as f32, &state.tuning),
        }
    }

    /// HUD score label
    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// HUD best label
    pub fn best_label(&self) -> String {
        format!("Best: {}", self.best)
    }
}
