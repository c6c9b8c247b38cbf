//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Content acquisition (per strategy and outcome)
//! - Guesses (by outcome)
//! - Rounds (started, completed)

use once_cell::sync::Lazy;
use prometheus::{core::Collector, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Content Acquisition Metrics
// =============================================================================

/// Acquisition attempts by strategy and result.
pub static ACQUISITION_ATTEMPTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "redditix_acquisition_attempts_total",
            "Content acquisition attempts per strategy",
        ),
        &["source", "result"], // result: "success", "failed", "corrupt"
    )
    .unwrap()
});

/// Posts served, by the tag of the tier that produced them.
pub static POSTS_SERVED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("redditix_posts_served_total", "Posts handed to rounds"),
        &["source_tag"], // "primary", "curated", "fallback"
    )
    .unwrap()
});

// =============================================================================
// Game Metrics
// =============================================================================

/// Guesses by outcome.
pub static GUESSES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("redditix_guesses_total", "Guesses submitted"),
        &["result"], // "hit", "miss", "too_short", "already_tried", "round_over"
    )
    .unwrap()
});

/// Rounds started.
pub static ROUNDS_STARTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("redditix_rounds_started_total", "Rounds started").unwrap()
});

/// Rounds completed by how they ended.
pub static ROUNDS_COMPLETED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("redditix_rounds_completed_total", "Rounds completed"),
        &["outcome"], // "won", "revealed"
    )
    .unwrap()
});

/// All core metrics, for registration by the server.
pub fn all_metrics() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(ACQUISITION_ATTEMPTS.clone()),
        Box::new(POSTS_SERVED.clone()),
        Box::new(GUESSES_TOTAL.clone()),
        Box::new(ROUNDS_STARTED.clone()),
        Box::new(ROUNDS_COMPLETED.clone()),
    ]
}
