use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redditix_core::{
    load_config, seeded_source, validate_config, Config, ContentCoordinator, LeaderboardStore,
    RedditClient, SessionController, SessionEvents, SqliteLeaderboard,
};

use redditix_server::api::create_router;
use redditix_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Redditix {}", VERSION);

    // Determine config path
    let config_path = std::env::var("REDDITIX_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Communities: {}", config.content.communities.join(", "));
    info!("Leaderboard path: {:?}", config.leaderboard.path);

    // Independent streams per consumer; derived from the seed when one is set
    let seed = |offset: u64| config.game.seed.map(|s| s.wrapping_add(offset));

    // Content acquisition chain
    let proxy_url = proxy_url(&config);
    info!("Proxy tier endpoint: {}", proxy_url);
    let coordinator = ContentCoordinator::from_config(
        &config.content,
        Some(proxy_url.as_str()),
        seeded_source(seed(0)),
    )
    .context("Failed to create content coordinator")?;
    info!(
        "Acquisition chain: {}",
        coordinator.source_names().join(" -> ")
    );

    // Leaderboard
    let leaderboard: Arc<dyn LeaderboardStore> = Arc::new(
        SqliteLeaderboard::new(&config.leaderboard.path, config.leaderboard.max_entries)
            .context("Failed to open leaderboard")?,
    );
    info!("Leaderboard initialized");

    // Session
    let session = Arc::new(SessionController::new(
        Arc::new(coordinator),
        leaderboard,
        config.game.clone(),
        seeded_source(seed(1)),
        SessionEvents::default(),
    ));

    // Client behind the first-party content endpoint
    let reddit = RedditClient::new(&config.content).context("Failed to create Reddit client")?;

    // Create app state
    let state = Arc::new(AppState::new(
        config.clone(),
        session,
        reddit,
        seeded_source(seed(2)),
    ));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Base URL of the proxy tier: the configured one, or this server's own
/// content endpoint.
fn proxy_url(config: &Config) -> String {
    if let Some(url) = &config.content.proxy_url {
        return url.clone();
    }

    let host = match config.server.host {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    format!("http://{}/api", SocketAddr::new(host, config.server.port))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
