//! Simulation module
//!
//! All gameplay logic lives here:
//! - Single-threaded, one call per frame with a clamped delta
//! - Spawn RNG is injected (seeded) through `GameState`
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod lane;
pub mod progression;
pub mod run;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use clock::FrameClock;
pub use collision::{ContactResult, advance_obstacles, has_passed, obstacle_contact};
pub use lane::Player;
pub use progression::{Difficulty, obstacle_speed, spawn_interval};
pub use snapshot::{ObstacleView, PlayerView, Snapshot};
pub use spawner::{SpawnScheduler, spawn_obstacle};
pub use state::{GameEvent, GameState, Obstacle, RunState, RunStats};
pub use tick::{TickInput, apply_intent, tick};
