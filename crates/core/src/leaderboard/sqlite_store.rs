//! SQLite-backed leaderboard implementation.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tracing::debug;

use super::{LeaderboardError, LeaderboardStats, LeaderboardStore, ScoreRecord};

/// SQLite-backed leaderboard, bounded to `max_entries` records.
pub struct SqliteLeaderboard {
    conn: Mutex<Connection>,
    max_entries: usize,
}

impl SqliteLeaderboard {
    /// Open the leaderboard database, creating the file and tables if needed.
    pub fn new(path: &Path, max_entries: usize) -> Result<Self, LeaderboardError> {
        let conn = Connection::open(path)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            max_entries,
        })
    }

    /// Create an in-memory leaderboard (useful for testing).
    pub fn in_memory(max_entries: usize) -> Result<Self, LeaderboardError> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            max_entries,
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), LeaderboardError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS scores (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                score INTEGER NOT NULL,
                attempts INTEGER NOT NULL,
                words_found INTEGER NOT NULL,
                post_title TEXT NOT NULL,
                post_id TEXT NOT NULL,
                date TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_scores_rank ON scores(score DESC, seq ASC);
            "#,
        )?;
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, LeaderboardError> {
        self.conn
            .lock()
            .map_err(|_| LeaderboardError::Database("connection lock poisoned".to_string()))
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<ScoreRecord> {
        let date_str: String = row.get(4)?;
        let date = DateTime::parse_from_rfc3339(&date_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(ScoreRecord {
            score: row.get(0)?,
            attempts: row.get(1)?,
            words_found: row.get(2)?,
            post_title: row.get(3)?,
            date,
            post_id: row.get(5)?,
        })
    }

    fn query_top(conn: &Connection, limit: usize) -> Result<Vec<ScoreRecord>, LeaderboardError> {
        let mut stmt = conn.prepare(
            "SELECT score, attempts, words_found, post_title, date, post_id
             FROM scores ORDER BY score DESC, seq ASC LIMIT ?1",
        )?;
        let records = stmt
            .query_map(params![limit as i64], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

impl LeaderboardStore for SqliteLeaderboard {
    fn insert(&self, record: &ScoreRecord) -> Result<(), LeaderboardError> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO scores (score, attempts, words_found, post_title, post_id, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.score,
                record.attempts,
                record.words_found,
                record.post_title,
                record.post_id,
                record.date.to_rfc3339(),
            ],
        )?;

        // Keep the best `max_entries`; on equal scores the oldest stay.
        let pruned = conn.execute(
            "DELETE FROM scores WHERE seq NOT IN (
                SELECT seq FROM scores ORDER BY score DESC, seq ASC LIMIT ?1
             )",
            params![self.max_entries as i64],
        )?;

        debug!(score = record.score, pruned, "Score recorded");
        Ok(())
    }

    fn top(&self, limit: usize) -> Result<Vec<ScoreRecord>, LeaderboardError> {
        let conn = self.conn()?;
        Self::query_top(&conn, limit)
    }

    fn all(&self) -> Result<Vec<ScoreRecord>, LeaderboardError> {
        let conn = self.conn()?;
        Self::query_top(&conn, self.max_entries)
    }

    fn stats(&self) -> Result<LeaderboardStats, LeaderboardError> {
        let conn = self.conn()?;
        let (count, total_score, best, total_attempts): (i64, i64, i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(score), 0), COALESCE(MAX(score), 0),
                    COALESCE(SUM(attempts), 0)
             FROM scores",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )?;

        if count == 0 {
            return Ok(LeaderboardStats::default());
        }

        let average = |total: i64| (total as f64 / count as f64).round() as u32;
        Ok(LeaderboardStats {
            total_games: count as u32,
            average_score: average(total_score),
            best_score: best as u32,
            average_attempts: average(total_attempts),
        })
    }
}
