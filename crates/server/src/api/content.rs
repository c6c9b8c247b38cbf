//! First-party content endpoint.
//!
//! `GET /api/content?community=<name>` fetches the hot listing of a community
//! from Reddit, filters it and answers with one qualifying post picked at
//! random. This is what the proxy tier of the acquisition chain calls.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, warn};

use redditix_core::ContentError;

use crate::state::AppState;

const DEFAULT_COMMUNITY: &str = "france";

#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    pub community: Option<String>,
}

/// Routes of the content endpoint, with the permissive CORS policy it is
/// served under.
pub fn content_routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/content",
            get(get_content)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(cors)
}

pub async fn get_content(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContentQuery>,
) -> Response {
    let community = query
        .community
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_COMMUNITY)
        .to_string();

    debug!(community = %community, "Content requested");

    let candidates = match state.reddit().fetch_community(&community).await {
        Ok(candidates) => candidates,
        Err(ContentError::NoQualifyingContent(_)) => return no_content(&community),
        Err(e) => {
            warn!(community = %community, error = %e, "Failed to fetch Reddit post");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to fetch Reddit post",
                    "message": e.to_string(),
                    "fallback": true,
                })),
            )
                .into_response();
        }
    };

    match state.pick_post(&candidates) {
        Some(post) => {
            debug!(community = %community, post_id = %post.id, "Serving post");
            Json(post).into_response()
        }
        None => no_content(&community),
    }
}

fn no_content(community: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "No valid French posts found",
            "community": community,
        })),
    )
        .into_response()
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}
