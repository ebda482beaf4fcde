//! Obstacle motion and contact detection
//!
//! Contact is a proximity test, not physics: an obstacle hits the craft when
//! it is inside the depth band around the player plane AND its lane X is
//! within the lateral tolerance of the craft's eased X. The eased X is used on
//! purpose, so a craft halfway through a lane change can be clipped by either
//! lane's meteor.

use glam::Vec3;

use super::progression::obstacle_speed;
use super::state::{GameEvent, GameState, Obstacle};
use crate::tuning::Tuning;

/// Result of a contact check
#[derive(Debug, Clone)]
pub struct ContactResult {
    /// Whether the obstacle touches the craft
    pub hit: bool,
    /// |obstacle.x - player.x|
    pub lateral_gap: f32,
    /// |obstacle.z - player.z|
    pub depth_gap: f32,
}

impl ContactResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            lateral_gap: f32::MAX,
            depth_gap: f32::MAX,
        }
    }
}

/// Check contact between the craft and one obstacle
pub fn obstacle_contact(player_pos: Vec3, obstacle: &Obstacle, tuning: &Tuning) -> ContactResult {
    let lateral_gap = (obstacle.pos.x - player_pos.x).abs();
    let depth_gap = (obstacle.pos.z - player_pos.z).abs();
    ContactResult {
        hit: lateral_gap < tuning.contact_lateral && depth_gap < tuning.contact_depth,
        lateral_gap,
        depth_gap,
    }
}

/// True once an obstacle is behind the player and should be pruned
#[inline]
pub fn has_passed(obstacle: &Obstacle, tuning: &Tuning) -> bool {
    obstacle.depth() > tuning.despawn_depth
}

/// Move every live obstacle toward the player, prune the ones that passed,
/// and test the rest for contact.
///
/// Returns the id of the first obstacle that hit. Processing stops there:
/// one contact already ends the run.
pub fn advance_obstacles(state: &mut GameState, dt: f32) -> Option<u32> {
    let speed = obstacle_speed(state.stats.score as f32, &state.tuning);
    let player_pos = state.player.pos();

    let mut i = 0;
    while i < state.obstacles.len() {
        let obstacle = &mut state.obstacles[i];
        obstacle.advance(speed, dt);

        if has_passed(obstacle, &state.tuning) {
            let cleared = state.obstacles.remove(i);
            state.push_event(GameEvent::ObstacleCleared { id: cleared.id });
            continue;
        }

        if obstacle_contact(player_pos, obstacle, &state.tuning).hit {
            let id = obstacle.id;
            state.push_event(GameEvent::Collision { id });
            return Some(id);
        }

        i += 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawner::spawn_obstacle_in_lane;

    fn obstacle_at(x: f32, z: f32) -> Obstacle {
        Obstacle {
            id: 1,
            lane: 0,
            pos: Vec3::new(x, 0.5, z),
            rotation: Vec3::ZERO,
            angular_vel: Vec3::ZERO,
        }
    }

    #[test]
    fn test_contact_requires_both_bands() {
        let t = Tuning::default();
        let player = Vec3::new(0.0, 0.52, 0.0);

        assert!(obstacle_contact(player, &obstacle_at(0.0, 0.0), &t).hit);
        assert!(obstacle_contact(player, &obstacle_at(1.19, -1.09), &t).hit);
        // Right depth, wrong lane
        assert!(!obstacle_contact(player, &obstacle_at(3.2, 0.0), &t).hit);
        // Right lane, too far away
        assert!(!obstacle_contact(player, &obstacle_at(0.0, -1.1), &t).hit);
        assert!(!obstacle_contact(player, &obstacle_at(0.0, -20.0), &t).hit);
        // Lateral tolerance is exclusive
        assert!(!obstacle_contact(player, &obstacle_at(1.2, 0.0), &t).hit);
    }

    #[test]
    fn test_contact_uses_eased_position_mid_lane_change() {
        let t = Tuning::default();
        // Craft has committed to lane 2 but is only 40% of the way there
        let player = Vec3::new(1.3, 0.52, 0.0);
        let centre_meteor = obstacle_at(0.0, 0.2);
        let right_meteor = obstacle_at(3.2, 0.2);
        assert!(!obstacle_contact(player, &centre_meteor, &t).hit);
        assert!(!obstacle_contact(player, &right_meteor, &t).hit);

        let player = Vec3::new(1.0, 0.52, 0.0);
        assert!(obstacle_contact(player, &centre_meteor, &t).hit);
    }

    #[test]
    fn test_contact_result_miss() {
        let miss = ContactResult::miss();
        assert!(!miss.hit);
        assert_eq!(miss.depth_gap, f32::MAX);
    }

    #[test]
    fn test_passed_obstacles_are_pruned() {
        let mut state = GameState::new(5);
        let id = state.next_entity_id();
        spawn_obstacle_in_lane(&mut state, id, 0);
        state.obstacles[0].pos.z = 9.9;
        state.take_events();

        // Player is centred, so lane 0 cannot touch it
        assert_eq!(advance_obstacles(&mut state, 0.033), None);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.take_events(), vec![GameEvent::ObstacleCleared { id }]);
    }

    #[test]
    fn test_obstacles_advance_at_score_speed() {
        let mut state = GameState::new(5);
        state.stats.score = 100.0;
        let id = state.next_entity_id();
        spawn_obstacle_in_lane(&mut state, id, 2);
        advance_obstacles(&mut state, 0.02);
        // 15 units/s at score 100
        let z = state.obstacles[0].depth();
        assert!((z - (-35.0 + 0.3)).abs() < 1e-4);
    }

    #[test]
    fn test_first_hit_stops_processing() {
        let mut state = GameState::new(5);
        let first = state.next_entity_id();
        spawn_obstacle_in_lane(&mut state, first, 1);
        let second = state.next_entity_id();
        spawn_obstacle_in_lane(&mut state, second, 1);
        state.obstacles[0].pos.z = -0.3;
        state.obstacles[1].pos.z = -0.2;
        let second_z = state.obstacles[1].pos.z;

        assert_eq!(advance_obstacles(&mut state, 0.01), Some(first));
        // Second obstacle was never touched this tick
        assert_eq!(state.obstacles[1].pos.z, second_z);
        assert_eq!(state.obstacles.len(), 2);
    }
}
