use serde::Serialize;

use crate::content::Post;
use crate::puzzle::{GuessRecord, Puzzle, RenderedToken};

/// What the player sees of the active round.
///
/// The post itself is only included once the round is over, since its title
/// and body are the solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundView {
    pub post_id: String,
    /// Strategy that produced the post.
    pub source: String,
    /// `source_tag` of the post.
    pub source_tag: String,
    /// "initialized", "in_progress", "won" or "revealed".
    pub status: String,
    pub tokens: Vec<RenderedToken>,
    pub attempts: u32,
    pub progress_percent: u32,
    pub words_found: usize,
    pub guesses: Vec<GuessRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Post>,
}

impl RoundView {
    pub(crate) fn build(post: &Post, source: &str, puzzle: &Puzzle, score: Option<u32>) -> Self {
        Self {
            post_id: post.id.clone(),
            source: source.to_string(),
            source_tag: post.source_tag.as_str().to_string(),
            status: puzzle.status().as_str().to_string(),
            tokens: puzzle.render(),
            attempts: puzzle.attempts(),
            progress_percent: puzzle.progress_percent(),
            words_found: puzzle.distinct_found_words(),
            guesses: puzzle.guess_history(),
            score,
            post: puzzle.is_won().then(|| post.clone()),
        }
    }
}
