//! Tier 1: the first-party content endpoint.
//!
//! The endpoint queries Reddit on our behalf, applies the shared filter and
//! answers with a single post. A 404 means nothing qualified; a body with a
//! truthy `fallback` field means the endpoint itself gave up.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::types::Post;
use super::{ContentError, ContentSource};

pub struct ProxySource {
    client: Client,
    base_url: String,
}

impl ProxySource {
    pub fn new(base_url: impl Into<String>, timeout_secs: u32) -> Result<Self, ContentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs as u64))
            .build()?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn content_url(&self) -> String {
        format!("{}/content", self.base_url)
    }
}

/// JavaScript-style truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Decode a proxy response body into a post.
pub(crate) fn decode_proxy_body(body: Value) -> Result<Post, ContentError> {
    if body.get("fallback").map(is_truthy).unwrap_or(false) {
        return Err(ContentError::FallbackSignal);
    }
    serde_json::from_value(body)
        .map_err(|e| ContentError::Parse(format!("Failed to parse proxy post: {}", e)))
}

#[async_trait]
impl ContentSource for ProxySource {
    fn name(&self) -> &str {
        "proxy"
    }

    async fn fetch_candidates(&self, community: &str) -> Result<Vec<Post>, ContentError> {
        let url = self.content_url();
        debug!(url = %url, community = community, "Calling content proxy");

        let response = self
            .client
            .get(&url)
            .query(&[("community", community)])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ContentError::SourceUnavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ContentError::NoQualifyingContent(community.to_string()));
        }
        if !status.is_success() {
            return Err(ContentError::SourceUnavailable(format!(
                "proxy returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ContentError::Parse(format!("Failed to parse proxy response: {}", e)))?;

        Ok(vec![decode_proxy_body(body)?])
    }
}
