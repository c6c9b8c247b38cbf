//! Post model and Reddit listing wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ContentError;

/// Minimum body length (exclusive) for a post to be playable.
pub const MIN_VALID_CONTENT_CHARS: usize = 50;

/// Where a post came from.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    /// Live content fetched from Reddit (any network tier).
    #[default]
    #[serde(alias = "reddit")]
    Primary,
    /// Hand-authored pool shipped with the game.
    Curated,
    /// Minimal built-in pool, used when nothing else is usable.
    Fallback,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Primary => "primary",
            SourceTag::Curated => "curated",
            SourceTag::Fallback => "fallback",
        }
    }
}

/// A post used as puzzle material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: String,
    pub title: String,
    /// Body text.
    pub content: String,
    pub url: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub score: i64,
    #[serde(rename = "created", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "source", default)]
    pub source_tag: SourceTag,
}

impl Post {
    /// Text that gets tokenized into the puzzle.
    pub fn puzzle_text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }

    /// Minimal shape check: non-empty title and url, body longer than 50 characters.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.title.trim().is_empty() {
            return Err(ContentError::CorruptPost(format!("post {} has no title", self.id)));
        }
        if self.url.trim().is_empty() {
            return Err(ContentError::CorruptPost(format!("post {} has no url", self.id)));
        }
        let len = self.content.chars().count();
        if len <= MIN_VALID_CONTENT_CHARS {
            return Err(ContentError::CorruptPost(format!(
                "post {} content too short ({} chars)",
                self.id, len
            )));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Copy of this post carrying a different source tag.
    pub fn with_source(mut self, tag: SourceTag) -> Self {
        self.source_tag = tag;
        self
    }
}

/// `GET /r/<community>/hot.json` response.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingChild {
    pub data: RawPost,
}

/// A post as Reddit returns it. Only the fields the game reads are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub over_18: bool,
    #[serde(default)]
    pub stickied: bool,
}

impl Listing {
    pub fn into_posts(self) -> Vec<RawPost> {
        self.data.children.into_iter().map(|c| c.data).collect()
    }
}

impl From<RawPost> for Post {
    fn from(raw: RawPost) -> Self {
        let created_at = DateTime::from_timestamp(raw.created_utc as i64, 0).unwrap_or_else(Utc::now);
        Self {
            url: format!("https://reddit.com{}", raw.permalink),
            id: raw.id,
            title: raw.title,
            content: raw.selftext,
            author: raw.author,
            subreddit: raw.subreddit,
            score: raw.score,
            created_at,
            source_tag: SourceTag::Primary,
        }
    }
}
