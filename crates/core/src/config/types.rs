use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Content acquisition configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentConfig {
    /// Base URL of the first-party content endpoint (tier 1), e.g.
    /// "http://127.0.0.1:8080/api". When unset the server points it at itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    /// Reddit base URL used by the direct and relay tiers.
    #[serde(default = "default_reddit_base_url")]
    pub reddit_base_url: String,
    /// User-Agent sent to Reddit.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Number of hot posts requested per listing.
    #[serde(default = "default_listing_limit")]
    pub listing_limit: u32,
    /// Communities picked from uniformly at random.
    #[serde(default = "default_communities")]
    pub communities: Vec<String>,
    /// Relay endpoints tried in order by tier 3.
    #[serde(default = "default_relays")]
    pub relays: Vec<RelayConfig>,
    /// JSON file holding the curated pool. The bundled pool is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curated_path: Option<PathBuf>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            proxy_url: None,
            reddit_base_url: default_reddit_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            listing_limit: default_listing_limit(),
            communities: default_communities(),
            relays: default_relays(),
            curated_path: None,
        }
    }
}

fn default_reddit_base_url() -> String {
    "https://www.reddit.com".to_string()
}

fn default_user_agent() -> String {
    "RedditTix:v1.0.0 (by /u/RedditTix)".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_listing_limit() -> u32 {
    25
}

fn default_communities() -> Vec<String> {
    [
        "france",
        "rance",
        "paslegorafi",
        "commeditlajeunemariee",
        "rienabranler",
        "francedigeste",
        "AskFrance",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// An anonymizing relay wrapping the upstream listing URL.
///
/// `url_template` must contain `{url}` (raw upstream URL) or
/// `{url_encoded}` (percent-encoded upstream URL).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RelayConfig {
    pub name: String,
    pub url_template: String,
}

impl RelayConfig {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
        }
    }
}

fn default_relays() -> Vec<RelayConfig> {
    vec![
        RelayConfig::new("allorigins", "https://api.allorigins.win/raw?url={url_encoded}"),
        RelayConfig::new("cors-anywhere", "https://cors-anywhere.herokuapp.com/{url}"),
        RelayConfig::new("codetabs", "https://api.codetabs.com/v1/proxy?quest={url_encoded}"),
        RelayConfig::new("thingproxy", "https://thingproxy.freeboard.io/fetch/{url}"),
    ]
}

/// Puzzle tuning.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GameConfig {
    /// Tokens shorter than this are dropped.
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,
    /// Guesses shorter than this are rejected.
    #[serde(default = "default_min_guess_length")]
    pub min_guess_length: usize,
    /// Found ratio over important + keyword tokens that wins the round.
    #[serde(default = "default_victory_threshold")]
    pub victory_threshold: f64,
    #[serde(default = "default_keyword_probability")]
    pub keyword_probability: f64,
    #[serde(default = "default_important_probability")]
    pub important_probability: f64,
    /// Seed for reproducible puzzles. Entropy-seeded when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_word_length: default_min_word_length(),
            min_guess_length: default_min_guess_length(),
            victory_threshold: default_victory_threshold(),
            keyword_probability: default_keyword_probability(),
            important_probability: default_important_probability(),
            seed: None,
        }
    }
}

fn default_min_word_length() -> usize {
    3
}

fn default_min_guess_length() -> usize {
    2
}

fn default_victory_threshold() -> f64 {
    0.8
}

fn default_keyword_probability() -> f64 {
    0.15
}

fn default_important_probability() -> f64 {
    0.3
}

/// Leaderboard storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeaderboardConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("redditix.db")
}

fn default_max_entries() -> usize {
    50
}

/// Sanitized config for API responses (local paths and relay URLs hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub content: SanitizedContentConfig,
    pub game: GameConfig,
    pub leaderboard_max_entries: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedContentConfig {
    pub proxy_configured: bool,
    pub communities: Vec<String>,
    pub relays: Vec<String>,
    pub curated_pool: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            content: SanitizedContentConfig {
                proxy_configured: config.content.proxy_url.is_some(),
                communities: config.content.communities.clone(),
                relays: config.content.relays.iter().map(|r| r.name.clone()).collect(),
                curated_pool: match config.content.curated_path {
                    Some(_) => "file".to_string(),
                    None => "bundled".to_string(),
                },
            },
            game: config.game.clone(),
            leaderboard_max_entries: config.leaderboard.max_entries,
        }
    }
}
