pub mod config;
pub mod content;
pub mod leaderboard;
pub mod metrics;
pub mod puzzle;
pub mod random;
pub mod session;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ContentConfig,
    GameConfig, LeaderboardConfig, RelayConfig, SanitizedConfig, ServerConfig,
};
pub use content::{
    AcquiredPost, ContentCoordinator, ContentError, ContentSource, CuratedPool, DirectSource, Post,
    ProxySource, RedditClient, RelaySource, SourceTag,
};
pub use leaderboard::{
    compute_score, LeaderboardError, LeaderboardStats, LeaderboardStore, ScoreRecord,
    SqliteLeaderboard,
};
pub use puzzle::{Category, GuessError, GuessOutcome, Puzzle, PuzzleStatus, Token, Victory};
pub use random::{seeded_source, RandomSource};
pub use session::{RoundStart, RoundView, SessionController, SessionError, SessionEvent, SessionEvents};
