//! Mock content source for testing.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::content::{ContentError, ContentSource, Post};

/// What the mock answers once queued responses are exhausted.
#[derive(Debug, Clone)]
enum Behavior {
    Posts(Vec<Post>),
    Fail(String),
}

/// Mock implementation of the `ContentSource` trait.
///
/// Provides controllable behavior for testing:
/// - Return a fixed batch of candidates, or fail every call
/// - Queue one-off responses ahead of the default behavior
/// - Record the community of every call
/// - Simulate latency
///
/// # Example
///
/// ```rust,ignore
/// use redditix_core::testing::{fixtures, MockContentSource};
///
/// let source = MockContentSource::with_posts("direct", vec![fixtures::post("p1", "Titre")]);
/// source.push_error(ContentError::SourceUnavailable("HTTP 503".into()));
///
/// assert!(source.fetch_candidates("france").await.is_err());
/// assert!(source.fetch_candidates("france").await.is_ok());
/// assert_eq!(source.call_count(), 2);
/// ```
pub struct MockContentSource {
    name: String,
    behavior: Mutex<Behavior>,
    queued: Mutex<VecDeque<Result<Vec<Post>, ContentError>>>,
    calls: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
}

impl std::fmt::Debug for MockContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockContentSource")
            .field("name", &self.name)
            .field("calls", &self.call_count())
            .finish()
    }
}

impl MockContentSource {
    /// A source answering every call with `posts`.
    pub fn with_posts(name: &str, posts: Vec<Post>) -> Self {
        Self::build(name, Behavior::Posts(posts))
    }

    /// A source failing every call with `SourceUnavailable`.
    pub fn failing(name: &str) -> Self {
        Self::build(name, Behavior::Fail(format!("{} is down", name)))
    }

    fn build(name: &str, behavior: Behavior) -> Self {
        Self {
            name: name.to_string(),
            behavior: Mutex::new(behavior),
            queued: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            delay: Mutex::new(None),
        }
    }

    /// Replace the default batch.
    pub fn set_posts(&self, posts: Vec<Post>) {
        *lock(&self.behavior) = Behavior::Posts(posts);
    }

    /// Make every following call fail.
    pub fn set_failing(&self) {
        *lock(&self.behavior) = Behavior::Fail(format!("{} is down", self.name));
    }

    /// Queue a one-off batch served before the default behavior.
    pub fn push_posts(&self, posts: Vec<Post>) {
        lock(&self.queued).push_back(Ok(posts));
    }

    /// Queue a one-off error served before the default behavior.
    pub fn push_error(&self, error: ContentError) {
        lock(&self.queued).push_back(Err(error));
    }

    /// Sleep this long before answering.
    pub fn set_delay(&self, delay: Duration) {
        *lock(&self.delay) = Some(delay);
    }

    /// Number of fetches performed.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Communities requested, in call order.
    pub fn communities(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    fn next_response(&self) -> Result<Vec<Post>, ContentError> {
        if let Some(queued) = lock(&self.queued).pop_front() {
            return queued;
        }
        match &*lock(&self.behavior) {
            Behavior::Posts(posts) => Ok(posts.clone()),
            Behavior::Fail(reason) => Err(ContentError::SourceUnavailable(reason.clone())),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl ContentSource for MockContentSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_candidates(&self, community: &str) -> Result<Vec<Post>, ContentError> {
        lock(&self.calls).push(community.to_string());

        let delay = *lock(&self.delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let posts = self.next_response()?;
        if posts.is_empty() {
            return Err(ContentError::NoQualifyingContent(community.to_string()));
        }
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_queued_responses_come_first() {
        let source = MockContentSource::with_posts("direct", vec![fixtures::post("p1", "Titre")]);
        source.push_error(ContentError::FallbackSignal);

        assert!(matches!(
            source.fetch_candidates("france").await,
            Err(ContentError::FallbackSignal)
        ));
        let posts = source.fetch_candidates("rance").await.unwrap();
        assert_eq!(posts[0].id, "p1");
        assert_eq!(source.communities(), vec!["france", "rance"]);
    }

    #[tokio::test]
    async fn test_empty_batch_is_no_qualifying_content() {
        let source = MockContentSource::with_posts("direct", vec![]);
        assert!(matches!(
            source.fetch_candidates("france").await,
            Err(ContentError::NoQualifyingContent(c)) if c == "france"
        ));
    }

    #[tokio::test]
    async fn test_switch_to_failing() {
        let source = MockContentSource::with_posts("direct", vec![fixtures::post("p1", "Titre")]);
        source.set_failing();
        assert!(source.fetch_candidates("france").await.is_err());
    }
}
