use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score before any penalty.
pub const BASE_SCORE: u32 = 1000;
/// Floor of the score.
pub const MIN_SCORE: u32 = 100;
/// Attempts allowed before the penalty kicks in.
pub const FREE_ATTEMPTS: u32 = 5;
/// Penalty per attempt past the free ones.
pub const ATTEMPT_PENALTY: u32 = 10;

/// Score of a round won in `attempts` guesses.
pub fn compute_score(attempts: u32) -> u32 {
    let penalty = attempts.saturating_sub(FREE_ATTEMPTS).saturating_mul(ATTEMPT_PENALTY);
    BASE_SCORE.saturating_sub(penalty).max(MIN_SCORE)
}

/// One won round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub score: u32,
    pub attempts: u32,
    /// Distinct words revealed when the round ended.
    pub words_found: u32,
    pub post_title: String,
    pub date: DateTime<Utc>,
    pub post_id: String,
}

impl ScoreRecord {
    /// Record for a round won just now.
    pub fn new(attempts: u32, words_found: u32, post_title: &str, post_id: &str) -> Self {
        Self {
            score: compute_score(attempts),
            attempts,
            words_found,
            post_title: post_title.to_string(),
            date: Utc::now(),
            post_id: post_id.to_string(),
        }
    }
}

/// Aggregates over the stored records, averages rounded to the nearest integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardStats {
    pub total_games: u32,
    pub average_score: u32,
    pub best_score: u32,
    pub average_attempts: u32,
}
