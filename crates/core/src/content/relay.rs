//! Tier 3: the listing fetched through anonymizing relays, one at a time.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::RelayConfig;

use super::reddit::RedditClient;
use super::types::Post;
use super::{ContentError, ContentSource};

/// Expand a relay template around the upstream URL.
pub fn relay_url(template: &str, upstream: &str) -> String {
    template
        .replace("{url_encoded}", &urlencoding::encode(upstream))
        .replace("{url}", upstream)
}

pub struct RelaySource {
    reddit: RedditClient,
    relays: Vec<RelayConfig>,
}

impl RelaySource {
    pub fn new(reddit: RedditClient, relays: Vec<RelayConfig>) -> Self {
        Self { reddit, relays }
    }

    pub fn relays(&self) -> &[RelayConfig] {
        &self.relays
    }
}

#[async_trait]
impl ContentSource for RelaySource {
    fn name(&self) -> &str {
        "relay"
    }

    async fn fetch_candidates(&self, community: &str) -> Result<Vec<Post>, ContentError> {
        let upstream = self.reddit.listing_url(community);
        let mut failures = Vec::new();

        // Strictly sequential: the next relay is only contacted once the previous one failed.
        for relay in &self.relays {
            let url = relay_url(&relay.url_template, &upstream);
            debug!(relay = %relay.name, "Trying relay");

            match self.reddit.fetch_candidates_from(&url, community).await {
                Ok(posts) => {
                    info!(relay = %relay.name, candidates = posts.len(), "Relay succeeded");
                    return Ok(posts);
                }
                Err(e) => {
                    warn!(relay = %relay.name, error = %e, "Relay failed");
                    failures.push((relay.name.clone(), e.to_string()));
                }
            }
        }

        Err(ContentError::AllRelaysFailed(failures))
    }
}
