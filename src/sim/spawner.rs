//! Obstacle spawner
//!
//! Accumulates run time and emits one meteor per elapsed interval in a
//! uniformly random lane at the far depth.

use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, Obstacle};
use crate::consts::LANE_COUNT;
use crate::random_sign;

/// Spawn cadence state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Seconds accumulated since the last spawn
    pub time_since_last_spawn: f32,
}

impl SpawnScheduler {
    /// Accumulate `dt`; returns true (and restarts the accumulator) once
    /// `interval` has elapsed.
    pub fn tick(&mut self, dt: f32, interval: f32) -> bool {
        self.time_since_last_spawn += dt;
        if self.time_since_last_spawn >= interval {
            self.time_since_last_spawn = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.time_since_last_spawn = 0.0;
    }
}

/// Create an obstacle in a random lane at the spawn depth
pub fn spawn_obstacle(state: &mut GameState) -> u32 {
    let id = state.next_entity_id();
    let lane = state.rng.random_range(0..LANE_COUNT);
    spawn_obstacle_in_lane(state, id, lane);
    id
}

/// Create an obstacle in a chosen lane. The id must come from
/// `next_entity_id`.
pub(crate) fn spawn_obstacle_in_lane(state: &mut GameState, id: u32, lane: usize) {
    let rng = &mut state.rng;
    let rotation = Vec3::new(
        rng.random_range(0.0..PI),
        rng.random_range(0.0..PI),
        rng.random_range(0.0..PI),
    );
    let angular_vel = Vec3::new(
        rng.random_range(0.2..1.0) * random_sign(rng),
        rng.random_range(0.2..1.0) * random_sign(rng),
        rng.random_range(0.0..0.4),
    );
    let tuning = &state.tuning;
    let pos = Vec3::new(tuning.lane_x(lane), tuning.obstacle_height, tuning.spawn_depth);

    state.obstacles.push(Obstacle {
        id,
        lane,
        pos,
        rotation,
        angular_vel,
    });
    log::debug!("Spawned obstacle {} in lane {}", id, lane);
    state.push_event(GameEvent::ObstacleSpawned { id, lane });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_scheduler_fires_on_interval() {
        let mut scheduler = SpawnScheduler::default();
        assert!(!scheduler.tick(0.5, 1.0));
        assert!(!scheduler.tick(0.25, 1.0));
        assert!(scheduler.tick(0.25, 1.0));
        assert_eq!(scheduler.time_since_last_spawn, 0.0);
        assert!(!scheduler.tick(0.5, 1.0));
    }

    #[test]
    fn test_spawn_places_obstacle_on_lane_at_far_depth() {
        let mut state = GameState::new(42);
        let id = spawn_obstacle(&mut state);
        let obstacle = state.obstacles.iter().find(|o| o.id == id).unwrap();
        assert!(obstacle.lane < LANE_COUNT);
        assert_eq!(obstacle.pos.x, state.tuning.lane_x(obstacle.lane));
        assert_eq!(obstacle.depth(), state.tuning.spawn_depth);
        assert!(obstacle.angular_vel.x.abs() >= 0.2 && obstacle.angular_vel.x.abs() < 1.0);
        assert!(obstacle.angular_vel.z >= 0.0 && obstacle.angular_vel.z < 0.4);
        let lane = obstacle.lane;
        assert_eq!(state.take_events(), vec![GameEvent::ObstacleSpawned { id, lane }]);
    }

    #[test]
    fn test_spawn_uses_every_lane() {
        let mut state = GameState::new(3);
        for _ in 0..100 {
            spawn_obstacle(&mut state);
        }
        let lanes: HashSet<usize> = state.obstacles.iter().map(|o| o.lane).collect();
        assert_eq!(lanes.len(), LANE_COUNT);
    }

    #[test]
    fn test_same_seed_same_lanes() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        for _ in 0..20 {
            spawn_obstacle(&mut a);
            spawn_obstacle(&mut b);
        }
        let lanes_a: Vec<usize> = a.obstacles.iter().map(|o| o.lane).collect();
        let lanes_b: Vec<usize> = b.obstacles.iter().map(|o| o.lane).collect();
        assert_eq!(lanes_a, lanes_b);
    }
}
