//! Remote leaderboard interface
//!
//! Wire types and validation for the score service (`POST /score`,
//! `GET /leaderboard`). The session does not call the service; this module
//! fixes the contract and ships an in-memory implementation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of entries `GET /leaderboard` returns
pub const LEADERBOARD_SIZE: usize = 10;

pub const ENDPOINT_SUBMIT: &str = "/score";
pub const ENDPOINT_LEADERBOARD: &str = "/leaderboard";

/// Client errors (HTTP 400 on the service)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("player_name required")]
    MissingPlayerName,

    #[error("score must be number")]
    ScoreNotNumber,
}

/// Failures a caller can see from the service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// 4xx
    #[error("rejected: {0}")]
    Rejected(#[from] SubmissionError),

    /// 5xx
    #[error("server error: {0}")]
    Server(String),
}

/// `POST /score` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub player_name: String,
    pub score: f64,
}

impl ScoreSubmission {
    pub fn new(player_name: impl Into<String>, score: u64) -> Self {
        Self {
            player_name: player_name.into(),
            score: score as f64,
        }
    }

    /// Same rules the service applies before inserting
    pub fn validate(&self) -> Result<(), SubmissionError> {
        if self.player_name.is_empty() {
            return Err(SubmissionError::MissingPlayerName);
        }
        if !self.score.is_finite() {
            return Err(SubmissionError::ScoreNotNumber);
        }
        Ok(())
    }
}

/// A stored leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: f64,
    /// Insertion time as reported by the service (ISO-8601)
    pub created_at: String,
}

/// `201` body for `POST /score`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub data: LeaderboardEntry,
}

/// `4xx/5xx` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(e: &ServiceError) -> Self {
        match e {
            ServiceError::Rejected(inner) => Self {
                error: inner.to_string(),
            },
            ServiceError::Server(msg) => Self { error: msg.clone() },
        }
    }
}

/// The score service
pub trait LeaderboardService {
    /// Submit one finished run
    fn submit(&mut self, submission: ScoreSubmission) -> Result<SubmitResponse, ServiceError>;

    /// Top entries, highest score first
    fn top(&self) -> Result<Vec<LeaderboardEntry>, ServiceError>;
}

/// In-memory leaderboard
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeaderboard {
    /// All entries, sorted descending by score (ties keep insertion order)
    entries: Vec<LeaderboardEntry>,
    /// Supplies `created_at` for new rows
    clock: Option<fn() -> String>,
}

impl InMemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `clock` to stamp new entries
    pub fn with_clock(clock: fn() -> String) -> Self {
        Self {
            entries: Vec::new(),
            clock: Some(clock),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank a score would take (1-indexed) if it fits in the top list
    pub fn potential_rank(&self, score: f64) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len())
            + 1;
        (rank <= LEADERBOARD_SIZE).then_some(rank)
    }
}

impl LeaderboardService for InMemoryLeaderboard {
    fn submit(&mut self, submission: ScoreSubmission) -> Result<SubmitResponse, ServiceError> {
        submission.validate()?;

        let entry = LeaderboardEntry {
            player_name: submission.player_name,
            score: submission.score,
            created_at: self.clock.map(|clock| clock()).unwrap_or_default(),
        };

        // Find insertion point (sorted descending by score)
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry.clone());

        Ok(SubmitResponse {
            success: true,
            data: entry,
        })
    }

    fn top(&self) -> Result<Vec<LeaderboardEntry>, ServiceError> {
        Ok(self.entries.iter().take(LEADERBOARD_SIZE).cloned().collect())
    }
}
