//! Content acquisition.
//!
//! Posts come from an ordered chain of `ContentSource` strategies (first-party
//! proxy, direct Reddit call, anonymizing relays). When every network tier
//! fails, a post is drawn from the curated pool, and from the built-in
//! fallback pool when even that is unusable. Acquisition never fails.

mod coordinator;
mod filter;
mod pool;
mod proxy;
mod reddit;
mod relay;
mod types;

pub use coordinator::{AcquiredPost, ContentCoordinator};
pub use filter::{
    contains_french_words, filter_candidates, is_qualifying, FRENCH_INDICATORS, MAX_BODY_CHARS,
    MIN_BODY_CHARS,
};
pub use pool::{builtin_fallback_posts, CuratedPool};
pub use proxy::ProxySource;
pub use reddit::{DirectSource, RedditClient};
pub use relay::{relay_url, RelaySource};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors produced while acquiring content. None of them reach the player:
/// the coordinator logs them and escalates to the next tier.
#[derive(Debug, Error)]
pub enum ContentError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered with a failure status or is unreachable.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// Response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The batch was empty once filtered.
    #[error("No qualifying content in r/{0}")]
    NoQualifyingContent(String),

    /// The first-party endpoint answered in fallback mode.
    #[error("Source answered with a fallback indicator")]
    FallbackSignal,

    /// An acquired post failed minimal shape validation.
    #[error("Corrupt post: {0}")]
    CorruptPost(String),

    /// Every relay of tier 3 failed (relay name, error).
    #[error("All {} relays failed", .0.len())]
    AllRelaysFailed(Vec<(String, String)>),

    /// The curated pool could not be read.
    #[error("Curated pool unavailable: {0}")]
    PoolUnavailable(String),
}

/// One strategy of the acquisition chain.
///
/// Implementations fetch a batch for the given community and return only the
/// candidates that pass the shared filter. An empty result is reported as
/// `NoQualifyingContent`, never as `Ok(vec![])`.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Strategy name for logs and metrics.
    fn name(&self) -> &str;

    /// Fetch the qualifying candidates of `community`.
    async fn fetch_candidates(&self, community: &str) -> Result<Vec<Post>, ContentError>;
}
