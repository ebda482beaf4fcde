//! Lane controller
//!
//! The lane index is the player's intent; the lateral position is a smoothed
//! follower of that lane's canonical X and is what contact tests read.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::LANE_COUNT;
use crate::damp_toward;
use crate::tuning::Tuning;

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Target lane, always in 0..LANE_COUNT
    lane: usize,
    /// Continuous position (x eases toward the lane, z stays on the player plane)
    pos: Vec3,
}

impl Player {
    /// Craft centred in the start lane
    pub fn new(tuning: &Tuning) -> Self {
        let lane = tuning.center_lane.min(LANE_COUNT - 1);
        Self {
            lane,
            pos: Vec3::new(tuning.lane_x(lane), tuning.player_height, tuning.player_depth),
        }
    }

    #[inline]
    pub fn lane(&self) -> usize {
        self.lane
    }

    #[inline]
    pub fn pos(&self) -> Vec3 {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    /// Shift one lane left, saturating at lane 0. Returns true if the lane changed.
    pub fn move_left(&mut self) -> bool {
        if self.lane == 0 {
            return false;
        }
        self.lane -= 1;
        true
    }

    /// Shift one lane right, saturating at the last lane
    pub fn move_right(&mut self) -> bool {
        if self.lane + 1 >= LANE_COUNT {
            return false;
        }
        self.lane += 1;
        true
    }

    /// Canonical X of the target lane
    #[inline]
    pub fn target_x(&self, tuning: &Tuning) -> f32 {
        tuning.lane_x(self.lane)
    }

    /// Ease one tick toward the target lane
    pub fn update(&mut self, tuning: &Tuning) {
        self.pos.x = damp_toward(self.pos.x, self.target_x(tuning), tuning.lane_damping);
    }

    /// Visual bank while sliding between lanes (no gameplay effect)
    pub fn roll(&self, tuning: &Tuning) -> f32 {
        -(self.target_x(tuning) - self.pos.x) * tuning.roll_factor
    }

    /// Snap back to the start lane (reset only)
    pub fn recenter(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }
}
