//! Round lifecycle.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Mutex as AsyncMutex;
use tracing::{error, info, warn};

use crate::config::GameConfig;
use crate::content::{ContentCoordinator, Post};
use crate::leaderboard::{LeaderboardStats, LeaderboardStore, ScoreRecord};
use crate::metrics::{GUESSES_TOTAL, ROUNDS_COMPLETED, ROUNDS_STARTED};
use crate::puzzle::{GuessOutcome, Puzzle};
use crate::random::RandomSource;

use super::events::{SessionEvent, SessionEvents};
use super::view::RoundView;
use super::SessionError;

const ROUND_LOAD_MESSAGE: &str = "could not load a round, please retry";

/// Outcome of `SessionController::start_new_round`.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundStart {
    /// The new round is active.
    Started(RoundView),
    /// Another acquisition was in flight; this call did nothing.
    AlreadyLoading,
    /// The acquisition finished after the session moved on; its post was dropped.
    Superseded,
}

struct Round {
    post: Post,
    source: String,
    puzzle: Puzzle,
    score: Option<u32>,
}

impl Round {
    fn view(&self) -> RoundView {
        RoundView::build(&self.post, &self.source, &self.puzzle, self.score)
    }
}

/// Clears the loading flag when an acquisition ends, cancelled or not.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives rounds for one player.
pub struct SessionController {
    coordinator: Arc<ContentCoordinator>,
    leaderboard: Arc<dyn LeaderboardStore>,
    config: GameConfig,
    random: Mutex<Box<dyn RandomSource>>,
    events: SessionEvents,
    round: AsyncMutex<Option<Round>>,
    loading: AtomicBool,
    sequence: AtomicU64,
}

impl SessionController {
    pub fn new(
        coordinator: Arc<ContentCoordinator>,
        leaderboard: Arc<dyn LeaderboardStore>,
        config: GameConfig,
        random: Box<dyn RandomSource>,
        events: SessionEvents,
    ) -> Self {
        Self {
            coordinator,
            leaderboard,
            config,
            random: Mutex::new(random),
            events,
            round: AsyncMutex::new(None),
            loading: AtomicBool::new(false),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Whether an acquisition is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Acquire a post and make it the active round.
    ///
    /// At most one acquisition runs at a time. The acquired post is only
    /// installed if no later start or abandon happened meanwhile.
    pub async fn start_new_round(&self) -> Result<RoundStart, SessionError> {
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            info!("Round already loading, start ignored");
            return Ok(RoundStart::AlreadyLoading);
        }
        let _guard = LoadingGuard(&self.loading);
        let sequence = self.sequence.fetch_add(1, Ordering::AcqRel) + 1;

        let acquired = self.coordinator.acquire().await;

        if let Err(e) = acquired.post.validate() {
            error!(error = %e, source = %acquired.source, "Acquired post failed validation");
            let mut round = self.round.lock().await;
            if self.sequence.load(Ordering::Acquire) == sequence {
                *round = None;
            }
            self.events.emit(SessionEvent::RoundError {
                message: ROUND_LOAD_MESSAGE.to_string(),
            });
            return Err(SessionError::RoundLoad(e.to_string()));
        }

        let puzzle = {
            let mut random = self.random.lock().unwrap_or_else(PoisonError::into_inner);
            Puzzle::new(&acquired.post.puzzle_text(), &self.config, random.as_mut())
        };

        let mut round = self.round.lock().await;
        if self.sequence.load(Ordering::Acquire) != sequence {
            info!(post_id = %acquired.post.id, "Stale acquisition discarded");
            return Ok(RoundStart::Superseded);
        }

        let new_round = Round {
            post: acquired.post,
            source: acquired.source,
            puzzle,
            score: None,
        };
        let view = new_round.view();
        *round = Some(new_round);
        drop(round);

        ROUNDS_STARTED.inc();
        info!(
            post_id = %view.post_id,
            source = %view.source,
            tokens = view.tokens.len(),
            "Round started"
        );
        self.events.emit(SessionEvent::RoundStarted {
            post_id: view.post_id.clone(),
            source: view.source.clone(),
            token_count: view.tokens.len(),
        });

        Ok(RoundStart::Started(view))
    }

    /// Drop the active round and invalidate any acquisition in flight.
    pub async fn abandon_round(&self) {
        let mut round = self.round.lock().await;
        self.sequence.fetch_add(1, Ordering::AcqRel);
        if let Some(old) = round.take() {
            info!(post_id = %old.post.id, "Round abandoned");
        }
    }

    /// Apply a guess to the active round.
    ///
    /// Rejected guesses are reported to the player as an unsuccessful
    /// `GuessResult` and returned as errors.
    pub async fn submit_guess(&self, text: &str) -> Result<GuessOutcome, SessionError> {
        let mut guard = self.round.lock().await;
        let round = guard.as_mut().ok_or(SessionError::NoActiveRound)?;

        let outcome = match round.puzzle.guess(text) {
            Ok(outcome) => outcome,
            Err(e) => {
                GUESSES_TOTAL.with_label_values(&[e.kind()]).inc();
                self.events.emit(SessionEvent::GuessResult {
                    success: false,
                    match_count: 0,
                    message: e.to_string(),
                });
                return Err(e.into());
            }
        };

        GUESSES_TOTAL
            .with_label_values(&[if outcome.is_hit() { "hit" } else { "miss" }])
            .inc();
        self.events.emit(SessionEvent::GuessResult {
            success: outcome.is_hit(),
            match_count: outcome.matches,
            message: outcome.message(),
        });

        if outcome.won {
            let attempts = round.puzzle.attempts();
            let record = ScoreRecord::new(
                attempts,
                round.puzzle.distinct_found_words() as u32,
                &round.post.title,
                &round.post.id,
            );
            round.score = Some(record.score);

            if let Err(e) = self.leaderboard.insert(&record) {
                warn!(error = %e, "Failed to record score");
            }

            ROUNDS_COMPLETED.with_label_values(&["won"]).inc();
            info!(post_id = %round.post.id, attempts, score = record.score, "Round won");
            self.events.emit(SessionEvent::RoundWon {
                attempts,
                score: record.score,
            });
        }

        Ok(outcome)
    }

    /// Show the whole post. Not scored.
    pub async fn reveal_round(&self) -> Result<RoundView, SessionError> {
        let mut guard = self.round.lock().await;
        let round = guard.as_mut().ok_or(SessionError::NoActiveRound)?;

        if !round.puzzle.is_won() {
            round.puzzle.reveal_all();
            ROUNDS_COMPLETED.with_label_values(&["revealed"]).inc();
            info!(post_id = %round.post.id, attempts = round.puzzle.attempts(), "Round revealed");
            self.events.emit(SessionEvent::RoundRevealed {
                post_id: round.post.id.clone(),
                url: round.post.url.clone(),
            });
        }

        Ok(round.view())
    }

    /// The active round, if any.
    pub async fn view(&self) -> Option<RoundView> {
        self.round.lock().await.as_ref().map(Round::view)
    }

    pub fn leaderboard(&self, limit: usize) -> Result<Vec<ScoreRecord>, SessionError> {
        Ok(self.leaderboard.top(limit)?)
    }

    pub fn stats(&self) -> Result<LeaderboardStats, SessionError> {
        Ok(self.leaderboard.stats()?)
    }
}
