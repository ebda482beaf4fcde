//! Game state and core simulation types
//!
//! `GameState` is the whole simulation context: run state, craft, live
//! obstacles, score, spawn timer and the spawn RNG. The frame driver owns it
//! and passes it into every tick.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::lane::Player;
use super::spawner::SpawnScheduler;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Waiting for confirm
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended on contact
    GameOver,
}

impl RunState {
    /// HUD status line
    pub fn status_line(&self) -> &'static str {
        match self {
            RunState::Idle => "Press SPACE to start",
            RunState::Running => "Running...",
            RunState::GameOver => "GAME OVER - Press SPACE to restart",
        }
    }
}

/// A meteor travelling down one lane toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: usize,
    /// x is fixed to the lane, z (depth) grows toward the player
    pub pos: Vec3,
    /// Euler orientation (cosmetic)
    pub rotation: Vec3,
    /// Spin rate per axis in rad/s (cosmetic)
    pub angular_vel: Vec3,
}

impl Obstacle {
    #[inline]
    pub fn depth(&self) -> f32 {
        self.pos.z
    }

    /// Move toward the player and spin
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.pos.z += speed * dt;
        self.rotation += self.angular_vel * dt;
    }
}

/// Absorbs the representation error of f32 frame deltas (0.01 is not exact)
/// so a whole point is not lost right at an integer boundary
const DISPLAY_EPSILON: f64 = 1e-4;

/// Events kept when nobody drains them; the oldest are dropped beyond this
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Score for the current run plus the session best
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Continuous score of the current run. f64 so long runs do not drift.
    pub score: f64,
    /// Best whole score across finished runs
    pub best: u64,
}

impl RunStats {
    pub fn new(best: u64) -> Self {
        Self { score: 0.0, best }
    }

    /// Whole points shown on the HUD
    #[inline]
    pub fn displayed(&self) -> u64 {
        (self.score.max(0.0) + DISPLAY_EPSILON).floor() as u64
    }

    /// Fold the finished run into `best`. Returns true on a new best.
    pub fn finish_run(&mut self) -> bool {
        let final_score = self.displayed();
        if final_score > self.best {
            self.best = final_score;
            true
        } else {
            false
        }
    }
}

/// Things that happened during a tick, drained by the frame driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    /// Game over -> reset -> running in one confirm
    RunRestarted,
    ObstacleSpawned { id: u32, lane: usize },
    /// Obstacle passed behind the player
    ObstacleCleared { id: u32 },
    Collision { id: u32 },
    GameOver { score: u64, best: u64, new_best: bool },
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the spawn RNG started from (for logging / reproduction)
    pub seed: u64,
    /// Gameplay balance
    pub tuning: Tuning,
    /// Current run state
    pub run_state: RunState,
    /// Player craft
    pub player: Player,
    /// Live obstacles (owned by the run)
    pub obstacles: Vec<Obstacle>,
    /// Score and best
    pub stats: RunStats,
    /// Spawn cadence accumulator
    pub spawner: SpawnScheduler,
    /// Simulation ticks since construction
    pub time_ticks: u64,
    /// Spawn RNG
    pub(crate) rng: Pcg32,
    /// Events recorded since the last drain
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            player: Player::new(&tuning),
            tuning,
            run_state: RunState::Idle,
            obstacles: Vec::new(),
            stats: RunStats::default(),
            spawner: SpawnScheduler::default(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Seed the session best (read from the store at startup)
    pub fn with_best(mut self, best: u64) -> Self {
        self.stats.best = best;
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            let excess = self.events.len() + 1 - MAX_PENDING_EVENTS;
            self.events.drain(..excess);
        }
        self.events.push(event);
    }

    /// Events since the last call. Whoever drives `tick` should drain these
    /// every frame; undrained events are capped at `MAX_PENDING_EVENTS`.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Look at pending events without draining them
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}
