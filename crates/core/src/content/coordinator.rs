//! Content acquisition coordinator.
//!
//! Walks the ordered strategy list with a single try-else-escalate loop and
//! ends in the curated and built-in pools, so a post is always produced.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::config::ContentConfig;
use crate::metrics::{ACQUISITION_ATTEMPTS, POSTS_SERVED};
use crate::random::{self, RandomSource};

use super::pool::{pick_fallback, CuratedPool};
use super::proxy::ProxySource;
use super::reddit::{DirectSource, RedditClient};
use super::relay::RelaySource;
use super::types::Post;
use super::{ContentError, ContentSource};

const DEFAULT_COMMUNITY: &str = "france";

/// A post and the strategy that produced it.
#[derive(Debug, Clone)]
pub struct AcquiredPost {
    pub post: Post,
    /// Strategy name ("proxy", "direct", "relay", "curated" or "fallback").
    pub source: String,
}

pub struct ContentCoordinator {
    sources: Vec<Arc<dyn ContentSource>>,
    communities: Vec<String>,
    curated: CuratedPool,
    random: Mutex<Box<dyn RandomSource>>,
}

impl ContentCoordinator {
    /// Create a coordinator over `sources`, tried in the given order.
    pub fn new(
        sources: Vec<Arc<dyn ContentSource>>,
        communities: Vec<String>,
        curated: CuratedPool,
        random: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            sources,
            communities,
            curated,
            random: Mutex::new(random),
        }
    }

    /// Build the standard chain: proxy (when `proxy_url` is set), direct, relays.
    ///
    /// An unreadable curated pool is logged and treated as empty, which
    /// routes tier 4 straight to the built-in posts.
    pub fn from_config(
        config: &ContentConfig,
        proxy_url: Option<&str>,
        random: Box<dyn RandomSource>,
    ) -> Result<Self, ContentError> {
        let reddit = RedditClient::new(config)?;
        let mut sources: Vec<Arc<dyn ContentSource>> = Vec::new();

        if let Some(url) = proxy_url {
            sources.push(Arc::new(ProxySource::new(url, config.timeout_secs)?));
        }
        sources.push(Arc::new(DirectSource::new(reddit.clone())));
        if !config.relays.is_empty() {
            sources.push(Arc::new(RelaySource::new(reddit, config.relays.clone())));
        }

        let curated = match CuratedPool::load(config.curated_path.as_deref()) {
            Ok(pool) => pool,
            Err(e) => {
                warn!(error = %e, "Curated pool unavailable, built-in posts only");
                CuratedPool::default()
            }
        };
        info!(
            sources = sources.len(),
            curated_posts = curated.len(),
            "Content coordinator ready"
        );

        Ok(Self::new(
            sources,
            config.communities.clone(),
            curated,
            random,
        ))
    }

    /// Names of the network strategies, in order.
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn curated_pool(&self) -> &CuratedPool {
        &self.curated
    }

    /// Produce a post. Never fails.
    pub async fn acquire_post(&self) -> Post {
        self.acquire().await.post
    }

    /// Produce a post together with the strategy that produced it.
    pub async fn acquire(&self) -> AcquiredPost {
        for source in &self.sources {
            let community = self.pick_community();
            debug!(source = source.name(), community = %community, "Trying content source");

            match self.try_source(source.as_ref(), &community).await {
                Ok(post) => {
                    info!(
                        source = source.name(),
                        community = %community,
                        post_id = %post.id,
                        "Post acquired"
                    );
                    ACQUISITION_ATTEMPTS
                        .with_label_values(&[source.name(), "success"])
                        .inc();
                    return self.served(post, source.name());
                }
                Err(ContentError::CorruptPost(reason)) => {
                    warn!(
                        source = source.name(),
                        reason = %reason,
                        "Corrupt post, falling back to curated pool"
                    );
                    ACQUISITION_ATTEMPTS
                        .with_label_values(&[source.name(), "corrupt"])
                        .inc();
                    break;
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Content source failed");
                    ACQUISITION_ATTEMPTS
                        .with_label_values(&[source.name(), "failed"])
                        .inc();
                }
            }
        }

        self.from_pools()
    }

    async fn try_source(
        &self,
        source: &dyn ContentSource,
        community: &str,
    ) -> Result<Post, ContentError> {
        let candidates = source.fetch_candidates(community).await?;
        let post = self
            .pick_candidate(&candidates)
            .ok_or_else(|| ContentError::NoQualifyingContent(community.to_string()))?;
        post.validate()?;
        Ok(post)
    }

    fn from_pools(&self) -> AcquiredPost {
        let mut random = self.random.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(post) = self.curated.pick(random.as_mut()) {
            info!(post_id = %post.id, "Using curated post");
            drop(random);
            return self.served(post, "curated");
        }

        let post = pick_fallback(random.as_mut());
        drop(random);
        warn!(post_id = %post.id, "Curated pool empty, using built-in post");
        self.served(post, "fallback")
    }

    fn served(&self, post: Post, source: &str) -> AcquiredPost {
        POSTS_SERVED
            .with_label_values(&[post.source_tag.as_str()])
            .inc();
        AcquiredPost {
            post,
            source: source.to_string(),
        }
    }

    fn pick_community(&self) -> String {
        let mut random = self.random.lock().unwrap_or_else(PoisonError::into_inner);
        random::pick(self.communities.as_slice(), random.as_mut())
            .cloned()
            .unwrap_or_else(|| DEFAULT_COMMUNITY.to_string())
    }

    fn pick_candidate(&self, candidates: &[Post]) -> Option<Post> {
        let mut random = self.random.lock().unwrap_or_else(PoisonError::into_inner);
        random::pick(candidates, random.as_mut()).cloned()
    }
}
