//! Testing utilities and mock implementations.
//!
//! This module provides a mock `ContentSource`, a scripted `RandomSource` and
//! post fixtures, allowing round lifecycles to be tested without network
//! access.
//!
//! # Example
//!
//! ```rust,ignore
//! use redditix_core::testing::{fixtures, MockContentSource, ScriptedRandom};
//!
//! let source = MockContentSource::with_posts("direct", vec![fixtures::post("p1", "Mon chat")]);
//! let random = ScriptedRandom::new().with_floats([0.0, 0.0]);
//!
//! // Hand both to a ContentCoordinator...
//! ```

mod mock_content_source;
mod scripted_random;

pub use mock_content_source::MockContentSource;
pub use scripted_random::ScriptedRandom;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    use crate::content::{Post, RawPost, SourceTag};

    /// A French body long enough to pass both the filter and validation.
    pub const FRENCH_BODY: &str = "Je suis allé au marché ce matin avec mon chat pour acheter des croissants. \
        Le boulanger était très sympa et nous avons parlé pendant une heure de la pluie et du beau temps.";

    /// A valid primary post with reasonable defaults.
    pub fn post(id: &str, title: &str) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            content: FRENCH_BODY.to_string(),
            url: format!("https://reddit.com/r/france/comments/{}/", id),
            author: "testeur".to_string(),
            subreddit: "france".to_string(),
            score: 42,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            source_tag: SourceTag::Primary,
        }
    }

    /// A post with exactly the given title and body.
    pub fn post_with_text(id: &str, title: &str, content: &str) -> Post {
        Post {
            content: content.to_string(),
            ..post(id, title)
        }
    }

    /// A raw listing entry that passes the shared filter.
    pub fn raw_post(id: &str, title: &str) -> RawPost {
        RawPost {
            id: id.to_string(),
            title: title.to_string(),
            selftext: FRENCH_BODY.to_string(),
            permalink: format!("/r/france/comments/{}/", id),
            author: "testeur".to_string(),
            subreddit: "france".to_string(),
            score: 42,
            created_utc: 1_709_294_400.0,
            over_18: false,
            stickied: false,
        }
    }

    /// A `hot.json` body wrapping `children` (each a raw post JSON object).
    pub fn listing_json(children: Vec<Value>) -> Value {
        json!({
            "kind": "Listing",
            "data": {
                "children": children
                    .into_iter()
                    .map(|data| json!({"kind": "t3", "data": data}))
                    .collect::<Vec<_>>()
            }
        })
    }

    /// JSON object of a qualifying listing entry.
    pub fn raw_post_json(id: &str, title: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "selftext": FRENCH_BODY,
            "permalink": format!("/r/france/comments/{}/", id),
            "author": "testeur",
            "subreddit": "france",
            "score": 42,
            "created_utc": 1_709_294_400.0,
            "over_18": false,
            "stickied": false
        })
    }
}
