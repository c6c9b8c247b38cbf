//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock content source and a fake Reddit, enabling E2E testing of the
//! game API and the content endpoint without network access.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use redditix_core::testing::{MockContentSource, ScriptedRandom};
use redditix_core::{
    Config, ContentConfig, ContentCoordinator, CuratedPool, GameConfig, LeaderboardConfig,
    LeaderboardStore, RedditClient, ServerConfig, SessionController, SessionEvents,
    SqliteLeaderboard,
};

/// Helper to assert a response has expected status.
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}

/// Helper to assert a JSON path equals expected value.
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}

/// Re-export fixtures for test convenience
pub use redditix_core::testing::fixtures;

/// Title and body of the post every round is played on.
pub const ROUND_TITLE: &str = "Maurice";
pub const ROUND_BODY: &str = "Maurice adore les croissants, Maurice vole les croissants, \
     Maurice dort ensuite sur le canapé toute la journée.";

/// Guesses that win the round in 7 attempts once every word is a keyword.
pub const WINNING_GUESSES: [&str; 7] = [
    "maurice", "croissant", "adore", "vole", "canap", "toute", "journée",
];

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process server with:
/// - A mock content source feeding rounds (MockContentSource)
/// - A fake Reddit behind the content endpoint
/// - A leaderboard in a temporary directory
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_round_creation() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.post("/api/v1/rounds", json!({})).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock content source - controls what rounds are played on
    pub source: Arc<MockContentSource>,
    /// Leaderboard shared with the session
    pub leaderboard: Arc<SqliteLeaderboard>,
    /// Temporary directory for the leaderboard database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Fake Reddit: `france` has one playable post, `vide` has nothing playable,
/// `panne` is down.
fn fake_reddit() -> Router {
    Router::new()
        .route(
            "/r/france/hot.json",
            get(|| async {
                let mut nsfw = fixtures::raw_post_json("nsfw", "Interdit");
                nsfw["over_18"] = Value::Bool(true);
                Json(fixtures::listing_json(vec![
                    nsfw,
                    fixtures::raw_post_json("good1", "Mon chat"),
                ]))
            }),
        )
        .route(
            "/r/vide/hot.json",
            get(|| async { Json(fixtures::listing_json(vec![])) }),
        )
        .route(
            "/r/panne/hot.json",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        )
}

/// Serve `app` on an ephemeral port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake server");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake server failed");
    });
    format!("http://{}", addr)
}

impl TestFixture {
    /// Create a new test fixture where every non-stopword is a keyword.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let reddit_base = spawn(fake_reddit()).await;

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            content: ContentConfig {
                reddit_base_url: reddit_base,
                communities: vec!["france".to_string()],
                timeout_secs: 5,
                ..Default::default()
            },
            game: GameConfig::default(),
            leaderboard: LeaderboardConfig {
                path: db_path.clone(),
                max_entries: 50,
            },
        };

        let source = Arc::new(MockContentSource::with_posts(
            "direct",
            vec![fixtures::post_with_text("p1", ROUND_TITLE, ROUND_BODY)],
        ));
        let coordinator = Arc::new(ContentCoordinator::new(
            vec![source.clone()],
            config.content.communities.clone(),
            CuratedPool::bundled().expect("Failed to load bundled pool"),
            Box::new(ScriptedRandom::new()),
        ));

        let leaderboard = Arc::new(
            SqliteLeaderboard::new(&db_path, config.leaderboard.max_entries)
                .expect("Failed to open leaderboard"),
        );
        let session = Arc::new(SessionController::new(
            coordinator,
            Arc::clone(&leaderboard) as Arc<dyn LeaderboardStore>,
            config.game.clone(),
            Box::new(ScriptedRandom::constant(0.0)),
            SessionEvents::default(),
        ));

        let reddit = RedditClient::new(&config.content).expect("Failed to create Reddit client");

        let state = Arc::new(redditix_server::state::AppState::new(
            config,
            session,
            reddit,
            Box::new(ScriptedRandom::new()),
        ));

        let router = redditix_server::api::create_router(state);

        Self {
            router,
            source,
            leaderboard,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a request with no body and an arbitrary method.
    pub async fn send(&self, method: &str, path: &str) -> TestResponse {
        self.request(method, path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.dispatch(request).await.0
    }

    /// Send a raw request and return the response with its headers.
    pub async fn dispatch(&self, request: Request<Body>) -> (TestResponse, axum::http::HeaderMap) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body_bytes).into_owned()))
        };

        (TestResponse { status, body }, headers)
    }

    /// Number of scores stored on the leaderboard.
    pub fn leaderboard_len(&self) -> usize {
        self.leaderboard.all().map(|records| records.len()).unwrap_or(0)
    }

    /// Start a round and play it to victory.
    pub async fn win_round(&self) -> TestResponse {
        let response = self.post("/api/v1/rounds", serde_json::json!({})).await;
        assert_status!(response, StatusCode::CREATED);

        let mut last = None;
        for word in WINNING_GUESSES {
            last = Some(
                self.post("/api/v1/rounds/current/guess", serde_json::json!({ "word": word }))
                    .await,
            );
        }
        last.expect("no guess sent")
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.dispatch(request).await.0
    }
}
