//! Leaderboard API handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use redditix_core::leaderboard::DEFAULT_TOP_LIMIT;
use redditix_core::{LeaderboardStats, ScoreRecord};

use crate::state::AppState;

/// Upper bound for `limit`; the store never holds more than this many anyway.
const MAX_LIMIT: usize = 100;

/// Query parameters for the leaderboard
#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<usize>,
}

/// Response for the leaderboard
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<ScoreRecord>,
    pub limit: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct LeaderboardErrorResponse {
    pub error: String,
}

/// Best scores, highest first
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, (StatusCode, Json<LeaderboardErrorResponse>)> {
    let limit = params.limit.unwrap_or(DEFAULT_TOP_LIMIT).clamp(1, MAX_LIMIT);

    match state.session().leaderboard(limit) {
        Ok(entries) => Ok(Json(LeaderboardResponse { entries, limit })),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(LeaderboardErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// Aggregates over every stored score
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LeaderboardStats>, (StatusCode, Json<LeaderboardErrorResponse>)> {
    state.session().stats().map(Json).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(LeaderboardErrorResponse {
                error: e.to_string(),
            }),
        )
    })
}
