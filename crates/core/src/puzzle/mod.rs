//! Word-reveal puzzle engine.
//!
//! A post's title and body are split into tokens, each classified once as
//! common, important or keyword. Guesses reveal every token containing the
//! guessed substring; finding enough important and keyword tokens wins the
//! round and reveals the rest.

mod engine;
mod tokenizer;
mod types;

pub use engine::Puzzle;
pub use tokenizer::{build_tokens, classify, is_stopword, tokenize, STOPLIST};
pub use types::*;

use thiserror::Error;

/// Reasons a guess is rejected. None of them change the puzzle.
///
/// Messages are shown to the player as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("Mot trop court (minimum {min} caractères)")]
    TooShort { min: usize },

    #[error("Mot déjà essayé")]
    AlreadyTried(String),

    #[error("La manche est terminée")]
    RoundOver,
}

impl GuessError {
    /// Stable identifier for metrics and API errors.
    pub fn kind(&self) -> &'static str {
        match self {
            GuessError::TooShort { .. } => "too_short",
            GuessError::AlreadyTried(_) => "already_tried",
            GuessError::RoundOver => "round_over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_error_messages() {
        assert_eq!(
            GuessError::TooShort { min: 2 }.to_string(),
            "Mot trop court (minimum 2 caractères)"
        );
        assert_eq!(GuessError::AlreadyTried("chat".into()).to_string(), "Mot déjà essayé");
        assert_eq!(GuessError::RoundOver.kind(), "round_over");
    }
}
