//! Events emitted toward the UI.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Something the player should be told about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A new puzzle is ready.
    RoundStarted {
        post_id: String,
        /// Strategy that produced the post.
        source: String,
        token_count: usize,
    },
    /// A guess was processed, accepted or not.
    GuessResult {
        success: bool,
        match_count: usize,
        message: String,
    },
    /// The player reached the victory threshold.
    RoundWon { attempts: u32, score: u32 },
    /// The player gave up; the post is fully shown.
    RoundRevealed { post_id: String, url: String },
    /// No round could be started.
    RoundError { message: String },
}

impl SessionEvent {
    /// Wire `type` of the event.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::RoundStarted { .. } => "round_started",
            SessionEvent::GuessResult { .. } => "guess_result",
            SessionEvent::RoundWon { .. } => "round_won",
            SessionEvent::RoundRevealed { .. } => "round_revealed",
            SessionEvent::RoundError { .. } => "round_error",
        }
    }
}

/// Broadcaster for session events using a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    /// Create a new broadcaster with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Send an event to every subscriber.
    pub fn emit(&self, event: SessionEvent) {
        // No subscriber is not an error
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new(256)
    }
}
