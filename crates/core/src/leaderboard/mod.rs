//! Local score persistence.
//!
//! Won rounds are scored from their attempt count and kept in a bounded,
//! best-first leaderboard.

mod sqlite_store;
mod types;

pub use sqlite_store::SqliteLeaderboard;
pub use types::*;

use thiserror::Error;

/// Default number of entries returned by a leaderboard query.
pub const DEFAULT_TOP_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for LeaderboardError {
    fn from(e: rusqlite::Error) -> Self {
        LeaderboardError::Database(e.to_string())
    }
}

/// Trait for leaderboard storage backends.
///
/// Records are ordered by score, highest first; equal scores keep insertion
/// order. Backends keep at most their configured number of records.
pub trait LeaderboardStore: Send + Sync {
    /// Add a record, dropping whatever falls past the bound.
    fn insert(&self, record: &ScoreRecord) -> Result<(), LeaderboardError>;

    /// The best `limit` records.
    fn top(&self, limit: usize) -> Result<Vec<ScoreRecord>, LeaderboardError>;

    /// Every stored record.
    fn all(&self) -> Result<Vec<ScoreRecord>, LeaderboardError>;

    fn stats(&self) -> Result<LeaderboardStats, LeaderboardError>;
}
