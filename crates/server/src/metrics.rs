//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the Redditix server:
//! - HTTP request metrics (latency, counts)
//! - WebSocket connection metrics
//! - Session and leaderboard gauges (collected dynamically)
//!
//! Acquisition and gameplay counters live in `redditix_core::metrics` and are
//! registered here as well.

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

use crate::state::AppState;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "redditix_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("redditix_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "redditix_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// WebSocket Metrics
// =============================================================================

/// Active WebSocket connections.
pub static WS_CONNECTIONS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "redditix_ws_connections_active",
        "Number of active WebSocket connections",
    )
    .unwrap()
});

/// Total WebSocket connections (cumulative).
pub static WS_CONNECTIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "redditix_ws_connections_total",
        "Total WebSocket connections since startup",
    )
    .unwrap()
});

/// WebSocket messages sent by type.
pub static WS_MESSAGES_SENT: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("redditix_ws_messages_sent_total", "WebSocket messages sent"),
        &["type"],
    )
    .unwrap()
});

/// WebSocket lag events (when client falls behind).
pub static WS_LAG_EVENTS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "redditix_ws_lag_events_total",
        "WebSocket lag events (client fell behind)",
    )
    .unwrap()
});

// =============================================================================
// Session Metrics
// =============================================================================

/// 1 while a round acquisition is in flight (collected dynamically).
pub static ROUND_LOADING: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "redditix_round_loading",
        "Whether a round acquisition is in flight",
    )
    .unwrap()
});

/// Scores currently kept on the leaderboard (collected dynamically).
pub static LEADERBOARD_ENTRIES: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "redditix_leaderboard_entries",
        "Number of scores on the leaderboard",
    )
    .unwrap()
});

/// Best score on the leaderboard (collected dynamically).
pub static LEADERBOARD_BEST_SCORE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "redditix_leaderboard_best_score",
        "Best score on the leaderboard",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // WebSocket
    registry
        .register(Box::new(WS_CONNECTIONS_ACTIVE.clone()))
        .unwrap();
    registry
        .register(Box::new(WS_CONNECTIONS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(WS_MESSAGES_SENT.clone()))
        .unwrap();
    registry.register(Box::new(WS_LAG_EVENTS.clone())).unwrap();

    // Session
    registry.register(Box::new(ROUND_LOADING.clone())).unwrap();
    registry
        .register(Box::new(LEADERBOARD_ENTRIES.clone()))
        .unwrap();
    registry
        .register(Box::new(LEADERBOARD_BEST_SCORE.clone()))
        .unwrap();

    // Core metrics (acquisition, guesses, rounds)
    for metric in redditix_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Collect dynamic metrics from current application state.
///
/// This is called before encoding metrics to update gauges with current values
/// from the session and the leaderboard.
pub fn collect_dynamic_metrics(state: &AppState) {
    let session = state.session();
    ROUND_LOADING.set(if session.is_loading() { 1 } else { 0 });

    if let Ok(stats) = session.stats() {
        LEADERBOARD_ENTRIES.set(stats.total_games as i64);
        LEADERBOARD_BEST_SCORE.set(stats.best_score as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();

        let output = encode_metrics();
        assert!(output.contains("redditix_http_requests_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }

    #[test]
    fn test_registry_contains_all_metrics() {
        // Vectors only show up once a label set has been touched
        HTTP_REQUEST_DURATION
            .with_label_values(&["GET", "/test", "200"])
            .observe(0.1);
        HTTP_REQUESTS_IN_FLIGHT.set(0);
        WS_CONNECTIONS_ACTIVE.set(0);
        WS_CONNECTIONS_TOTAL.inc();
        ROUND_LOADING.set(0);
        LEADERBOARD_ENTRIES.set(0);
        redditix_core::metrics::ROUNDS_STARTED.inc();

        let output = encode_metrics();

        // HTTP metrics
        assert!(output.contains("redditix_http_request_duration_seconds"));
        assert!(output.contains("redditix_http_requests_in_flight"));

        // WebSocket metrics
        assert!(output.contains("redditix_ws_connections_active"));
        assert!(output.contains("redditix_ws_connections_total"));

        // Session metrics
        assert!(output.contains("redditix_round_loading"));
        assert!(output.contains("redditix_leaderboard_entries"));

        // Core metrics
        assert!(output.contains("redditix_rounds_started_total"));
    }
}
