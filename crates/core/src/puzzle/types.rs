use serde::{Deserialize, Serialize};

/// Placeholder character for hidden tokens.
pub const HIDDEN_CHAR: char = '█';

/// How much a token counts toward victory. Assigned once, never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Common,
    Important,
    Keyword,
}

impl Category {
    /// Important and keyword tokens are victory targets.
    pub fn is_target(&self) -> bool {
        matches!(self, Category::Important | Category::Keyword)
    }

    pub fn weight(&self) -> Weight {
        match self {
            Category::Keyword => Weight::High,
            Category::Important => Weight::Medium,
            Category::Common => Weight::Low,
        }
    }
}

/// Display emphasis of a revealed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weight {
    High,
    Medium,
    Low,
}

/// A classified word of the post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Text as it appears in the post.
    pub display_text: String,
    /// Lowercase form used for matching.
    pub normalized_text: String,
    pub category: Category,
    pub found: bool,
    /// Index in the token sequence.
    pub position: usize,
}

impl Token {
    pub fn new(display_text: &str, category: Category, position: usize) -> Self {
        Self {
            display_text: display_text.to_string(),
            normalized_text: display_text.to_lowercase(),
            category,
            found: false,
            position,
        }
    }
}

/// How a won round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Victory {
    /// The player reached the victory threshold.
    Earned,
    /// The player gave up and asked for the solution.
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleStatus {
    Initialized,
    InProgress,
    Won(Victory),
}

impl PuzzleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PuzzleStatus::Initialized => "initialized",
            PuzzleStatus::InProgress => "in_progress",
            PuzzleStatus::Won(Victory::Earned) => "won",
            PuzzleStatus::Won(Victory::Revealed) => "revealed",
        }
    }

    pub fn is_won(&self) -> bool {
        matches!(self, PuzzleStatus::Won(_))
    }
}

/// Result of an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    /// Normalized guess.
    pub guess: String,
    /// Tokens newly revealed by this guess.
    pub matches: usize,
    /// Whether this guess completed the puzzle.
    pub won: bool,
}

impl GuessOutcome {
    pub fn is_hit(&self) -> bool {
        self.matches > 0
    }

    /// Player-facing feedback line.
    pub fn message(&self) -> String {
        match self.matches {
            0 => "Aucun mot trouvé".to_string(),
            1 => "Trouvé 1 mot !".to_string(),
            n => format!("Trouvé {} mots !", n),
        }
    }
}

/// A token as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedToken {
    /// Literal text when found, `█` repeated to its length otherwise.
    pub text: String,
    pub found: bool,
    /// Emphasis of a found token; absent while hidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
}

impl RenderedToken {
    pub fn from_token(token: &Token) -> Self {
        if token.found {
            Self {
                text: token.display_text.clone(),
                found: true,
                weight: Some(token.category.weight()),
            }
        } else {
            Self {
                text: HIDDEN_CHAR
                    .to_string()
                    .repeat(token.display_text.chars().count()),
                found: false,
                weight: None,
            }
        }
    }
}

/// A past guess and whether it currently reveals something.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessRecord {
    pub word: String,
    pub found: bool,
}
