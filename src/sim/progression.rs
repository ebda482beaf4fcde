//! Score and difficulty progression
//!
//! Score accrues with time while running. Difficulty has no level state: spawn
//! cadence and obstacle speed are recomputed from the score every tick.

use serde::{Deserialize, Serialize};

use super::state::RunStats;
use crate::tuning::Tuning;

/// Difficulty derived from a score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Obstacle approach speed (units/s)
    pub obstacle_speed: f32,
}

impl Difficulty {
    pub fn at(score: f32, tuning: &Tuning) -> Self {
        Self {
            spawn_interval: spawn_interval(score, tuning),
            obstacle_speed: obstacle_speed(score, tuning),
        }
    }
}

/// Spawn cadence. Non-increasing in score, never below the floor.
pub fn spawn_interval(score: f32, tuning: &Tuning) -> f32 {
    (tuning.spawn_base_interval - score * tuning.spawn_decay).max(tuning.spawn_floor_interval)
}

/// Approach speed. Non-decreasing in score, unbounded.
pub fn obstacle_speed(score: f32, tuning: &Tuning) -> f32 {
    tuning.obstacle_base_speed + score * tuning.obstacle_speed_gain
}

/// Accrue score for one running tick
pub fn accrue(stats: &mut RunStats, dt: f32, tuning: &Tuning) {
    stats.score += f64::from(dt) * f64::from(tuning.score_rate);
}
