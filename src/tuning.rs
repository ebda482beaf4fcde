//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a run can be
//! played with alternate balance (tests, experiments) without touching code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while parsing tuning or settings JSON
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Gameplay balance. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Lanes ===
    pub lane_x: [f32; LANE_COUNT],
    pub center_lane: usize,
    pub lane_damping: f32,
    pub roll_factor: f32,

    // === Scoring ===
    pub score_rate: f32,

    // === Spawning ===
    pub spawn_base_interval: f32,
    pub spawn_decay: f32,
    pub spawn_floor_interval: f32,

    // === Obstacle motion ===
    pub obstacle_base_speed: f32,
    pub obstacle_speed_gain: f32,
    pub spawn_depth: f32,
    pub despawn_depth: f32,
    pub obstacle_height: f32,

    // === Player ===
    pub player_depth: f32,
    pub player_height: f32,

    // === Contact ===
    pub contact_depth: f32,
    pub contact_lateral: f32,

    // === Frame driver ===
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_x: LANE_X,
            center_lane: CENTER_LANE,
            lane_damping: LANE_DAMPING,
            roll_factor: ROLL_FACTOR,

            score_rate: SCORE_RATE,

            spawn_base_interval: SPAWN_BASE_INTERVAL,
            spawn_decay: SPAWN_DECAY,
            spawn_floor_interval: SPAWN_FLOOR_INTERVAL,

            obstacle_base_speed: OBSTACLE_BASE_SPEED,
            obstacle_speed_gain: OBSTACLE_SPEED_GAIN,
            spawn_depth: SPAWN_DEPTH,
            despawn_depth: DESPAWN_DEPTH,
            obstacle_height: OBSTACLE_HEIGHT,

            player_depth: PLAYER_DEPTH,
            player_height: PLAYER_HEIGHT,

            contact_depth: CONTACT_DEPTH,
            contact_lateral: CONTACT_LATERAL,

            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the lane, spawn or contact invariants.
    /// Comparisons are written so NaN fails them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        if !self.lane_x.iter().all(|x| x.is_finite()) {
            return invalid("lane_x", "must be finite");
        }
        if !self.lane_x.windows(2).all(|w| w[0] < w[1]) {
            return invalid("lane_x", "must be strictly increasing left to right");
        }
        if self.center_lane >= LANE_COUNT {
            return invalid("center_lane", "must name one of the three lanes");
        }
        if !(self.lane_damping > 0.0 && self.lane_damping <= 1.0) {
            return invalid("lane_damping", "must be in (0, 1]");
        }
        if !(self.score_rate >= 0.0 && self.score_rate.is_finite()) {
            return invalid("score_rate", "must be finite and not negative");
        }
        if !(self.spawn_floor_interval > 0.0) {
            return invalid("spawn_floor_interval", "must be positive");
        }
        if !(self.spawn_decay >= 0.0) {
            return invalid("spawn_decay", "must not be negative");
        }
        if !(self.obstacle_base_speed > 0.0 && self.obstacle_base_speed.is_finite()) {
            return invalid("obstacle_base_speed", "must be positive");
        }
        if !(self.obstacle_speed_gain >= 0.0) {
            return invalid("obstacle_speed_gain", "must not be negative");
        }
        if !(self.spawn_depth.is_finite() && self.despawn_depth.is_finite()) {
            return invalid("spawn_depth", "depths must be finite");
        }
        if !(self.spawn_depth < self.player_depth && self.player_depth < self.despawn_depth) {
            return invalid("player_depth", "must lie between spawn_depth and despawn_depth");
        }
        if !(self.contact_depth > 0.0) {
            return invalid("contact_depth", "must be positive");
        }
        if !(self.contact_lateral > 0.0) {
            return invalid("contact_lateral", "must be positive");
        }
        if !(self.max_frame_dt > 0.0) {
            return invalid("max_frame_dt", "must be positive");
        }
        Ok(())
    }

    /// Canonical X of a lane (index is clamped into range)
    #[inline]
    pub fn lane_x(&self, lane: usize) -> f32 {
        self.lane_x[lane.min(LANE_COUNT - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.lane_x, [-3.2, 0.0, 3.2]);
        assert_eq!(t.score_rate, 20.0);
        assert_eq!(t.spawn_floor_interval, 0.55);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "score_rate": 40.0 }"#).unwrap();
        assert_eq!(t.score_rate, 40.0);
        assert_eq!(t.obstacle_base_speed, OBSTACLE_BASE_SPEED);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Tuning::from_json(r#"{ "center_lane": 3 }"#),
            Err(ConfigError::Invalid { field: "center_lane", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "lane_damping": 1.5 }"#),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(Tuning::from_json("not json"), Err(ConfigError::Json(_))));
    }

    fn rejected_field(json: &str) -> Option<&'static str> {
        match Tuning::from_json(json) {
            Err(ConfigError::Invalid { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_values_that_break_play_rejected() {
        // No contact could ever fire
        assert_eq!(rejected_field(r#"{ "contact_lateral": 0.0 }"#), Some("contact_lateral"));
        assert_eq!(rejected_field(r#"{ "contact_depth": -1.0 }"#), Some("contact_depth"));
        // Meteors pruned as soon as they spawn
        assert_eq!(rejected_field(r#"{ "despawn_depth": -100.0 }"#), Some("player_depth"));
        assert_eq!(rejected_field(r#"{ "player_depth": 20.0 }"#), Some("player_depth"));
        // Meteors backing away
        assert_eq!(rejected_field(r#"{ "obstacle_base_speed": -12.0 }"#), Some("obstacle_base_speed"));
        assert_eq!(rejected_field(r#"{ "obstacle_speed_gain": -0.1 }"#), Some("obstacle_speed_gain"));
        assert_eq!(rejected_field(r#"{ "spawn_decay": -0.1 }"#), Some("spawn_decay"));
        assert_eq!(rejected_field(r#"{ "score_rate": -1.0 }"#), Some("score_rate"));
        assert_eq!(rejected_field(r#"{ "lane_x": [3.2, 0.0, -3.2] }"#), Some("lane_x"));
        assert_eq!(rejected_field(r#"{ "lane_x": [-3.2, -3.2, 3.2] }"#), Some("lane_x"));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let t = Tuning {
            lane_x: [f32::NEG_INFINITY, 0.0, 3.2],
            ..Tuning::default()
        };
        assert!(t.validate().is_err());

        let t = Tuning {
            contact_lateral: f32::NAN,
            ..Tuning::default()
        };
        assert!(t.validate().is_err());

        let t = Tuning {
            obstacle_base_speed: f32::INFINITY,
            ..Tuning::default()
        };
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_lane_x_clamps_index() {
        let t = Tuning::default();
        assert_eq!(t.lane_x(0), -3.2);
        assert_eq!(t.lane_x(7), 3.2);
    }
}
