//! Game session: ties content acquisition, the puzzle and the leaderboard
//! together for one player.

mod controller;
mod events;
mod view;

pub use controller::{RoundStart, SessionController};
pub use events::{SessionEvent, SessionEvents};
pub use view::RoundView;

use thiserror::Error;

use crate::leaderboard::LeaderboardError;
use crate::puzzle::GuessError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No active round")]
    NoActiveRound,

    #[error(transparent)]
    Guess(#[from] GuessError),

    #[error("Leaderboard error: {0}")]
    Leaderboard(#[from] LeaderboardError),

    #[error("Could not load a round: {0}")]
    RoundLoad(String),
}
