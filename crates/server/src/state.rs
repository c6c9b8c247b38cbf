use std::sync::{Arc, Mutex, PoisonError};

use redditix_core::random::{pick, RandomSource};
use redditix_core::{Config, Post, RedditClient, SanitizedConfig, SessionController};

/// Shared application state
pub struct AppState {
    config: Config,
    session: Arc<SessionController>,
    reddit: RedditClient,
    random: Mutex<Box<dyn RandomSource>>,
}

impl AppState {
    pub fn new(
        config: Config,
        session: Arc<SessionController>,
        reddit: RedditClient,
        random: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            config,
            session,
            reddit,
            random: Mutex::new(random),
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn session(&self) -> &SessionController {
        self.session.as_ref()
    }

    /// Client used by the content endpoint to reach Reddit.
    pub fn reddit(&self) -> &RedditClient {
        &self.reddit
    }

    /// Pick one of `candidates` uniformly.
    pub fn pick_post(&self, candidates: &[Post]) -> Option<Post> {
        let mut random = self.random.lock().unwrap_or_else(PoisonError::into_inner);
        pick(candidates, random.as_mut()).cloned()
    }
}
