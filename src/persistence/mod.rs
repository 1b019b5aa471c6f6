//! High score and leaderboard storage
//!
//! The simulation treats storage as best-effort: a failing store is logged
//! and the game carries on. Stores:
//! - `MemoryStore`: process-local, for tests and storage-less hosts
//! - `JsonFileStore`: versioned JSON file with atomic replace

mod error;
mod file;

pub use error::StoreError;
pub use file::JsonFileStore;

use serde::{Deserialize, Serialize};

use crate::highscores::{Leaderboard, LeaderboardEntry};
use crate::sim::Difficulty;

/// Storage boundary for finished runs
pub trait ScoreStore {
    /// Best score ever recorded (0 when none)
    fn load_high_score(&self) -> Result<u64, StoreError>;

    /// Record a finished run; true if it set a new high score
    fn record_session_end(
        &mut self,
        score: u64,
        difficulty: Difficulty,
        player_name: &str,
    ) -> Result<bool, StoreError>;

    /// Top runs, best first
    fn load_leaderboard(&self) -> Result<Leaderboard, StoreError>;

    fn clear_leaderboard(&mut self) -> Result<(), StoreError>;
}

/// Everything a store persists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(default)]
    pub high_score: u64,
    #[serde(default)]
    pub leaderboard: Leaderboard,
}

impl ScoreRecord {
    /// Fold a finished run in; true if it beat the high score
    pub fn record(
        &mut self,
        score: u64,
        difficulty: Difficulty,
        player_name: &str,
        timestamp: f64,
    ) -> bool {
        self.leaderboard.add(LeaderboardEntry {
            name: player_name.to_string(),
            score,
            difficulty,
            timestamp,
        });
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub record: ScoreRecord,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_high_score(high_score: u64) -> Self {
        Self {
            record: ScoreRecord {
                high_score,
                ..Default::default()
            },
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load_high_score(&self) -> Result<u64, StoreError> {
        Ok(self.record.high_score)
    }

    fn record_session_end(
        &mut self,
        score: u64,
        difficulty: Difficulty,
        player_name: &str,
    ) -> Result<bool, StoreError> {
        Ok(self
            .record
            .record(score, difficulty, player_name, crate::unix_millis()))
    }

    fn load_leaderboard(&self) -> Result<Leaderboard, StoreError> {
        Ok(self.record.leaderboard.clone())
    }

    fn clear_leaderboard(&mut self) -> Result<(), StoreError> {
        self.record.leaderboard.clear();
        Ok(())
    }
}
