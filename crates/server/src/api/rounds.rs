//! Round API handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use redditix_core::{GuessError, RoundStart, RoundView, SessionError};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for submitting a guess
#[derive(Debug, Deserialize)]
pub struct GuessBody {
    pub word: String,
}

/// Response for an accepted guess
#[derive(Debug, Serialize)]
pub struct GuessResponse {
    /// Whether the guess revealed at least one token.
    pub success: bool,
    pub match_count: usize,
    /// Player-facing summary, e.g. "Trouvé 2 mots !".
    pub message: String,
    pub won: bool,
    pub round: Option<RoundView>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct RoundErrorResponse {
    pub error: String,
    /// Stable error identifier.
    pub kind: &'static str,
}

type ApiError = (StatusCode, Json<RoundErrorResponse>);

fn api_error(status: StatusCode, kind: &'static str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(RoundErrorResponse {
            error: error.into(),
            kind,
        }),
    )
}

fn session_error(e: SessionError) -> ApiError {
    match &e {
        SessionError::NoActiveRound => api_error(StatusCode::NOT_FOUND, "no_active_round", e.to_string()),
        SessionError::Guess(guess) => {
            let status = match guess {
                GuessError::TooShort { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                GuessError::AlreadyTried(_) | GuessError::RoundOver => StatusCode::CONFLICT,
            };
            api_error(status, guess.kind(), e.to_string())
        }
        SessionError::RoundLoad(_) => {
            api_error(StatusCode::SERVICE_UNAVAILABLE, "round_load", e.to_string())
        }
        SessionError::Leaderboard(_) => {
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "leaderboard", e.to_string())
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Start a new round
pub async fn start_round(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<RoundView>), ApiError> {
    match state.session().start_new_round().await {
        Ok(RoundStart::Started(view)) => Ok((StatusCode::CREATED, Json(view))),
        Ok(RoundStart::AlreadyLoading) => Err(api_error(
            StatusCode::CONFLICT,
            "already_loading",
            "A round is already loading",
        )),
        Ok(RoundStart::Superseded) => Err(api_error(
            StatusCode::CONFLICT,
            "superseded",
            "The round was abandoned while loading",
        )),
        Err(e) => Err(session_error(e)),
    }
}

/// Get the active round
pub async fn current_round(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoundView>, ApiError> {
    state
        .session()
        .view()
        .await
        .map(Json)
        .ok_or_else(|| session_error(SessionError::NoActiveRound))
}

/// Submit a guess for the active round
pub async fn submit_guess(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GuessBody>,
) -> Result<Json<GuessResponse>, ApiError> {
    let outcome = state
        .session()
        .submit_guess(&body.word)
        .await
        .map_err(session_error)?;

    Ok(Json(GuessResponse {
        success: outcome.is_hit(),
        match_count: outcome.matches,
        message: outcome.message(),
        won: outcome.won,
        round: state.session().view().await,
    }))
}

/// Reveal the whole post (not scored)
pub async fn reveal_round(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoundView>, ApiError> {
    state
        .session()
        .reveal_round()
        .await
        .map(Json)
        .map_err(session_error)
}

/// Drop the active round (DELETE endpoint)
pub async fn abandon_round(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session().abandon_round().await;
    StatusCode::NO_CONTENT
}
