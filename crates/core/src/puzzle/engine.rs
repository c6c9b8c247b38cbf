//! The word-reveal state machine.

use std::collections::HashSet;

use tracing::debug;

use crate::config::GameConfig;
use crate::random::RandomSource;

use super::tokenizer::build_tokens;
use super::types::{
    GuessOutcome, GuessRecord, PuzzleStatus, RenderedToken, Token, Victory,
};
use super::GuessError;

/// One post turned into a puzzle.
///
/// `found` flags only ever go from false to true until `reset`, and
/// `attempts` counts novel guesses of acceptable length. `Won` is terminal.
#[derive(Debug, Clone)]
pub struct Puzzle {
    tokens: Vec<Token>,
    guessed: HashSet<String>,
    history: Vec<String>,
    attempts: u32,
    status: PuzzleStatus,
    min_guess_length: usize,
    victory_threshold: f64,
}

impl Puzzle {
    /// Tokenize and classify `text` (a post's title and body).
    pub fn new(text: &str, config: &GameConfig, random: &mut dyn RandomSource) -> Self {
        let tokens = build_tokens(text, config, random);
        debug!(
            tokens = tokens.len(),
            keywords = tokens.iter().filter(|t| t.category == super::Category::Keyword).count(),
            important = tokens.iter().filter(|t| t.category == super::Category::Important).count(),
            "Puzzle initialized"
        );
        Self::from_tokens(tokens, config)
    }

    /// Build a puzzle over already classified tokens.
    pub fn from_tokens(tokens: Vec<Token>, config: &GameConfig) -> Self {
        Self {
            tokens,
            guessed: HashSet::new(),
            history: Vec::new(),
            attempts: 0,
            status: PuzzleStatus::Initialized,
            min_guess_length: config.min_guess_length,
            victory_threshold: config.victory_threshold,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn status(&self) -> PuzzleStatus {
        self.status
    }

    pub fn is_won(&self) -> bool {
        self.status.is_won()
    }

    /// Submit a guess. Rejected guesses leave the puzzle untouched.
    pub fn guess(&mut self, raw: &str) -> Result<GuessOutcome, GuessError> {
        if self.is_won() {
            return Err(GuessError::RoundOver);
        }

        let guess = raw.trim().to_lowercase();
        if guess.chars().count() < self.min_guess_length {
            return Err(GuessError::TooShort {
                min: self.min_guess_length,
            });
        }
        if self.guessed.contains(&guess) {
            return Err(GuessError::AlreadyTried(guess));
        }

        self.attempts += 1;
        self.guessed.insert(guess.clone());
        self.history.push(guess.clone());
        self.status = PuzzleStatus::InProgress;

        let mut matches = 0;
        for token in self
            .tokens
            .iter_mut()
            .filter(|t| !t.found && t.normalized_text.contains(&guess))
        {
            token.found = true;
            matches += 1;
        }

        let won = matches > 0 && self.check_victory();
        debug!(guess = %guess, matches, won, attempts = self.attempts, "Guess applied");

        Ok(GuessOutcome {
            guess,
            matches,
            won,
        })
    }

    /// Win when enough targets are found, revealing every token.
    ///
    /// A puzzle without important or keyword tokens can only be revealed.
    pub fn check_victory(&mut self) -> bool {
        if self.is_won() {
            return true;
        }

        let (found, total) = self.target_counts();
        if total == 0 {
            return false;
        }

        if found as f64 / total as f64 >= self.victory_threshold {
            self.reveal_tokens();
            self.status = PuzzleStatus::Won(Victory::Earned);
            return true;
        }
        false
    }

    /// Give up: reveal everything.
    pub fn reveal_all(&mut self) {
        self.reveal_tokens();
        self.status = PuzzleStatus::Won(Victory::Revealed);
    }

    /// Back to the initial state. Categories are kept.
    pub fn reset(&mut self) {
        for token in &mut self.tokens {
            token.found = false;
        }
        self.guessed.clear();
        self.history.clear();
        self.attempts = 0;
        self.status = PuzzleStatus::Initialized;
    }

    pub fn render(&self) -> Vec<RenderedToken> {
        self.tokens.iter().map(RenderedToken::from_token).collect()
    }

    /// Found targets as a rounded percentage; 0 without targets.
    pub fn progress_percent(&self) -> u32 {
        let (found, total) = self.target_counts();
        if total == 0 {
            return 0;
        }
        (found as f64 / total as f64 * 100.0).round() as u32
    }

    /// Number of distinct lowercase words currently revealed.
    pub fn distinct_found_words(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| t.found)
            .map(|t| t.normalized_text.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Guesses in submission order.
    pub fn guess_history(&self) -> Vec<GuessRecord> {
        self.history
            .iter()
            .map(|word| GuessRecord {
                word: word.clone(),
                found: self
                    .tokens
                    .iter()
                    .any(|t| t.found && t.normalized_text.contains(word.as_str())),
            })
            .collect()
    }

    fn target_counts(&self) -> (usize, usize) {
        self.tokens
            .iter()
            .filter(|t| t.category.is_target())
            .fold((0, 0), |(found, total), t| {
                (found + usize::from(t.found), total + 1)
            })
    }

    fn reveal_tokens(&mut self) {
        for token in &mut self.tokens {
            token.found = true;
        }
    }
}
