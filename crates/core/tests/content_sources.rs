//! Content source integration tests.
//!
//! Each test runs the HTTP sources against an in-process fake of Reddit,
//! the relays or the first-party content endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use redditix_core::testing::fixtures;
use redditix_core::{
    ContentConfig, ContentCoordinator, ContentError, ContentSource, CuratedPool, DirectSource,
    ProxySource, RedditClient, RelayConfig, RelaySource, SourceTag,
};

/// Serve `app` on an ephemeral port and return its base URL.
async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake server");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A listing with one playable post among entries the filter must drop.
fn mixed_listing() -> Value {
    let mut nsfw = fixtures::raw_post_json("nsfw", "Interdit");
    nsfw["over_18"] = json!(true);
    let mut pinned = fixtures::raw_post_json("pinned", "Règles du sub");
    pinned["stickied"] = json!(true);
    let mut short = fixtures::raw_post_json("short", "Court");
    short["selftext"] = json!("Je suis trop court.");
    let mut english = fixtures::raw_post_json("english", "Hello");
    english["selftext"] = json!("x".repeat(150));

    fixtures::listing_json(vec![
        nsfw,
        pinned,
        fixtures::raw_post_json("good1", "Mon chat"),
        short,
        english,
    ])
}

/// Fake Reddit: `france` has content, `vide` has nothing playable, `panne` is down.
fn fake_reddit() -> Router {
    Router::new()
        .route(
            "/r/france/hot.json",
            get(|| async { Json(mixed_listing()) }),
        )
        .route(
            "/r/vide/hot.json",
            get(|| async { Json(fixtures::listing_json(vec![])) }),
        )
        .route(
            "/r/panne/hot.json",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        )
        .route("/r/casse/hot.json", get(|| async { "<html>oops</html>" }))
}

fn config_for(base_url: &str) -> ContentConfig {
    ContentConfig {
        reddit_base_url: base_url.to_string(),
        communities: vec!["france".to_string()],
        timeout_secs: 5,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_direct_source_keeps_only_qualifying_posts() {
    let base = spawn(fake_reddit()).await;
    let source = DirectSource::new(RedditClient::new(&config_for(&base)).unwrap());

    let posts = source.fetch_candidates("france").await.unwrap();
    assert_eq!(posts.len(), 1);

    let post = &posts[0];
    assert_eq!(post.id, "good1");
    assert_eq!(post.url, "https://reddit.com/r/france/comments/good1/");
    assert_eq!(post.source_tag, SourceTag::Primary);
    assert!(post.is_valid());
}

#[tokio::test]
async fn test_direct_source_failures() {
    let base = spawn(fake_reddit()).await;
    let source = DirectSource::new(RedditClient::new(&config_for(&base)).unwrap());

    assert!(matches!(
        source.fetch_candidates("vide").await,
        Err(ContentError::NoQualifyingContent(c)) if c == "vide"
    ));
    assert!(matches!(
        source.fetch_candidates("panne").await,
        Err(ContentError::SourceUnavailable(msg)) if msg == "HTTP 503"
    ));
    assert!(matches!(
        source.fetch_candidates("casse").await,
        Err(ContentError::Parse(_))
    ));
}

#[tokio::test]
async fn test_relays_are_tried_in_order_until_one_succeeds() {
    let reddit_base = spawn(fake_reddit()).await;

    let relay = Router::new().route(
        "/raw",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let upstream = params.get("url").cloned().unwrap_or_default();
            if upstream.ends_with("/r/france/hot.json?limit=25") {
                Json(mixed_listing()).into_response()
            } else {
                StatusCode::BAD_REQUEST.into_response()
            }
        }),
    );
    let relay_base = spawn(relay).await;

    let relays = vec![
        // Unrouted path: answers 404
        RelayConfig::new("broken", format!("{}/missing/{{url}}", relay_base)),
        RelayConfig::new("working", format!("{}/raw?url={{url_encoded}}", relay_base)),
    ];
    let reddit = RedditClient::new(&config_for(&reddit_base)).unwrap();
    let source = RelaySource::new(reddit, relays);

    let posts = source.fetch_candidates("france").await.unwrap();
    assert_eq!(posts[0].id, "good1");
}

#[tokio::test]
async fn test_all_relays_failing() {
    let relay_base = spawn(Router::new()).await;
    let relays = vec![
        RelayConfig::new("first", format!("{}/a?u={{url_encoded}}", relay_base)),
        RelayConfig::new("second", format!("{}/b?u={{url_encoded}}", relay_base)),
    ];
    let reddit = RedditClient::new(&config_for("http://127.0.0.1:1")).unwrap();
    let source = RelaySource::new(reddit, relays);

    match source.fetch_candidates("france").await {
        Err(ContentError::AllRelaysFailed(failures)) => {
            let names: Vec<&str> = failures.iter().map(|(n, _)| n.as_str()).collect();
            assert_eq!(names, vec!["first", "second"]);
        }
        other => panic!("expected AllRelaysFailed, got {:?}", other),
    }
}

/// Fake first-party endpoint mounted under `/api`.
fn fake_proxy() -> Router {
    Router::new().route(
        "/api/content",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            match params.get("community").map(String::as_str) {
                Some("vide") => (
                    StatusCode::NOT_FOUND,
                    Json(json!({"error": "No valid French posts found", "community": "vide"})),
                )
                    .into_response(),
                Some("panne") => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Failed to fetch Reddit post", "message": "boom", "fallback": true})),
                )
                    .into_response(),
                Some("signal") => Json(json!({"fallback": true})).into_response(),
                _ => Json(fixtures::post("proxied", "Mon chat")).into_response(),
            }
        }),
    )
}

#[tokio::test]
async fn test_proxy_source() {
    let base = spawn(fake_proxy()).await;
    let source = ProxySource::new(format!("{}/api", base), 5).unwrap();

    let posts = source.fetch_candidates("france").await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, "proxied");

    assert!(matches!(
        source.fetch_candidates("vide").await,
        Err(ContentError::NoQualifyingContent(_))
    ));
    assert!(matches!(
        source.fetch_candidates("panne").await,
        Err(ContentError::SourceUnavailable(_))
    ));
    assert!(matches!(
        source.fetch_candidates("signal").await,
        Err(ContentError::FallbackSignal)
    ));
}

#[tokio::test]
async fn test_coordinator_escalates_from_proxy_to_direct() {
    let reddit_base = spawn(fake_reddit()).await;
    let reddit = RedditClient::new(&config_for(&reddit_base)).unwrap();

    let coordinator = ContentCoordinator::new(
        vec![
            Arc::new(ProxySource::new("http://127.0.0.1:1/api", 2).unwrap()),
            Arc::new(DirectSource::new(reddit)),
        ],
        vec!["france".to_string()],
        CuratedPool::default(),
        redditix_core::seeded_source(Some(1)),
    );

    let acquired = coordinator.acquire().await;
    assert_eq!(acquired.source, "direct");
    assert_eq!(acquired.post.id, "good1");
}

#[tokio::test]
async fn test_coordinator_falls_to_curated_when_nothing_qualifies() {
    let reddit_base = spawn(fake_reddit()).await;
    let proxy_base = spawn(fake_proxy()).await;
    let reddit = RedditClient::new(&config_for(&reddit_base)).unwrap();

    let coordinator = ContentCoordinator::new(
        vec![
            Arc::new(ProxySource::new(format!("{}/api", proxy_base), 5).unwrap()),
            Arc::new(DirectSource::new(reddit)),
        ],
        vec!["vide".to_string()],
        CuratedPool::bundled().unwrap(),
        redditix_core::seeded_source(Some(1)),
    );

    let acquired = coordinator.acquire().await;
    assert_eq!(acquired.source, "curated");
    assert_eq!(acquired.post.source_tag, SourceTag::Curated);
}

#[tokio::test]
async fn test_coordinator_with_everything_unreachable_yields_valid_post() {
    let config = ContentConfig {
        reddit_base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 2,
        relays: vec![RelayConfig::new("dead", "http://127.0.0.1:1/raw?url={url_encoded}")],
        ..Default::default()
    };
    let coordinator = ContentCoordinator::from_config(
        &config,
        Some("http://127.0.0.1:1/api"),
        redditix_core::seeded_source(Some(2)),
    )
    .unwrap();

    for _ in 0..3 {
        let post = coordinator.acquire_post().await;
        assert!(post.is_valid());
        assert_eq!(post.source_tag, SourceTag::Curated);
    }
}
