//! Astro Dodge - A three-lane meteor dodging arcade game
//!
//! Core modules:
//! - `sim`: Simulation (run state, lanes, spawning, collisions, scoring)
//! - `input`: Key signal to intent decoding
//! - `session`: Frame driver tying the sim to input and best-score storage
//! - `persistence`: Best-score storage
//! - `leaderboard`: Remote leaderboard wire types (not wired into the session)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod input;
pub mod leaderboard;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use input::{InputDecoder, Intent, KeyCode, KeySignal};
pub use session::Session;
pub use settings::{KeyBindings, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Number of lanes
    pub const LANE_COUNT: usize = 3;
    /// Canonical X of each lane
    pub const LANE_X: [f32; LANE_COUNT] = [-3.2, 0.0, 3.2];
    /// Lane the craft starts in and returns to on reset
    pub const CENTER_LANE: usize = 1;
    /// Per-tick easing factor toward the target lane
    pub const LANE_DAMPING: f32 = 0.18;
    /// Roll per unit of remaining lateral offset (visual only)
    pub const ROLL_FACTOR: f32 = 0.08;

    /// Score accrued per simulated second while running
    pub const SCORE_RATE: f32 = 20.0;

    /// Spawn cadence: interval = max(floor, base - score * decay)
    pub const SPAWN_BASE_INTERVAL: f32 = 1.05;
    pub const SPAWN_DECAY: f32 = 0.002;
    pub const SPAWN_FLOOR_INTERVAL: f32 = 0.55;

    /// Obstacle speed: base + score * gain (units/s)
    pub const OBSTACLE_BASE_SPEED: f32 = 12.0;
    pub const OBSTACLE_SPEED_GAIN: f32 = 0.03;

    /// Depth (Z) obstacles appear at
    pub const SPAWN_DEPTH: f32 = -35.0;
    /// Obstacles past this depth are behind the player and get pruned
    pub const DESPAWN_DEPTH: f32 = 10.0;
    /// Player's depth plane
    pub const PLAYER_DEPTH: f32 = 0.0;
    /// Hover height of the craft
    pub const PLAYER_HEIGHT: f32 = 0.52;
    /// Height obstacles travel at
    pub const OBSTACLE_HEIGHT: f32 = 0.5;

    /// Contact when |dz| is inside this band...
    pub const CONTACT_DEPTH: f32 = 1.1;
    /// ...and |dx| is below this tolerance
    pub const CONTACT_LATERAL: f32 = 1.2;

    /// Largest delta a single frame may advance (spiral of death guard)
    pub const MAX_FRAME_DT: f32 = 0.033;
    /// Delta used when no previous frame time exists
    pub const NOMINAL_FRAME_DT: f32 = 1.0 / 60.0;
}

/// Exponential smoothing step: move `current` a fixed fraction toward `target`
#[inline]
pub fn damp_toward(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Random sign (+1 or -1)
#[inline]
pub fn random_sign<R: rand::Rng>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}
