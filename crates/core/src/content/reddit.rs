//! Reddit listing client and the direct (tier 2) source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use tracing::debug;

use crate::config::ContentConfig;

use super::filter::filter_candidates;
use super::types::{Listing, Post, RawPost};
use super::{ContentError, ContentSource};

/// Fetches `hot.json` listings, either straight from Reddit or through a
/// relay URL wrapping the listing URL.
#[derive(Debug, Clone)]
pub struct RedditClient {
    client: Client,
    base_url: String,
    user_agent: String,
    listing_limit: u32,
}

impl RedditClient {
    pub fn new(config: &ContentConfig) -> Result<Self, ContentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.reddit_base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            listing_limit: config.listing_limit,
        })
    }

    /// `GET <base>/r/<community>/hot.json?limit=<n>`
    pub fn listing_url(&self, community: &str) -> String {
        format!(
            "{}/r/{}/hot.json?limit={}",
            self.base_url,
            urlencoding::encode(community),
            self.listing_limit
        )
    }

    /// Fetch and decode a listing from `url`.
    pub async fn fetch_listing(&self, url: &str) -> Result<Vec<RawPost>, ContentError> {
        debug!(url = url, "Fetching Reddit listing");

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ContentError::SourceUnavailable("request timed out".to_string())
                } else if e.is_connect() {
                    ContentError::SourceUnavailable(format!("connection failed: {}", e))
                } else {
                    ContentError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::SourceUnavailable(format!("HTTP {}", status.as_u16())));
        }

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| ContentError::Parse(format!("Failed to parse listing: {}", e)))?;

        Ok(listing.into_posts())
    }

    /// Fetch a listing and keep the qualifying posts.
    pub async fn fetch_candidates_from(
        &self,
        url: &str,
        community: &str,
    ) -> Result<Vec<Post>, ContentError> {
        let raw = self.fetch_listing(url).await?;
        let total = raw.len();
        let candidates = filter_candidates(raw);

        debug!(
            community = community,
            total = total,
            qualifying = candidates.len(),
            "Listing filtered"
        );

        if candidates.is_empty() {
            return Err(ContentError::NoQualifyingContent(community.to_string()));
        }
        Ok(candidates)
    }

    /// Fetch the qualifying posts of a community straight from Reddit.
    pub async fn fetch_community(&self, community: &str) -> Result<Vec<Post>, ContentError> {
        let url = self.listing_url(community);
        self.fetch_candidates_from(&url, community).await
    }
}

/// Tier 2: call Reddit directly from our own network context.
pub struct DirectSource {
    reddit: RedditClient,
}

impl DirectSource {
    pub fn new(reddit: RedditClient) -> Self {
        Self { reddit }
    }
}

#[async_trait]
impl ContentSource for DirectSource {
    fn name(&self) -> &str {
        "direct"
    }

    async fn fetch_candidates(&self, community: &str) -> Result<Vec<Post>, ContentError> {
        self.reddit.fetch_community(community).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url() {
        let config = ContentConfig {
            reddit_base_url: "https://www.reddit.com/".to_string(),
            ..Default::default()
        };
        let client = RedditClient::new(&config).unwrap();
        assert_eq!(
            client.listing_url("france"),
            "https://www.reddit.com/r/france/hot.json?limit=25"
        );
    }

    #[test]
    fn test_listing_url_encodes_community() {
        let client = RedditClient::new(&ContentConfig::default()).unwrap();
        assert_eq!(
            client.listing_url("a b"),
            "https://www.reddit.com/r/a%20b/hot.json?limit=25"
        );
    }
}
