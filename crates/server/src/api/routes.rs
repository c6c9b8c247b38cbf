use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::content::content_routes;
use super::middleware::metrics_middleware;
use super::{handlers, leaderboard, rounds, ws};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Game API
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Rounds
        .route("/rounds", post(rounds::start_round))
        .route(
            "/rounds/current",
            get(rounds::current_round).delete(rounds::abandon_round),
        )
        .route("/rounds/current/guess", post(rounds::submit_guess))
        .route("/rounds/current/reveal", post(rounds::reveal_round))
        // Leaderboard
        .route("/leaderboard", get(leaderboard::get_leaderboard))
        .route("/leaderboard/stats", get(leaderboard::get_stats))
        // Event stream
        .route("/ws", get(ws::ws_handler));

    Router::new()
        .merge(content_routes())
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .route_layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
