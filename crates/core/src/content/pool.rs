//! Tier 4: curated and built-in posts.

use std::path::Path;

use chrono::Utc;

use crate::random::RandomSource;

use super::types::{Post, SourceTag};
use super::ContentError;

const BUNDLED_CURATED_POSTS: &str = include_str!("../../data/curated_posts.json");

/// Hand-authored posts bundled with the game or loaded from a file.
///
/// Only posts passing `Post::validate` are kept; every kept post is tagged
/// `curated`.
#[derive(Debug, Clone, Default)]
pub struct CuratedPool {
    posts: Vec<Post>,
}

impl CuratedPool {
    pub fn from_posts(posts: Vec<Post>) -> Self {
        let posts = posts
            .into_iter()
            .filter(Post::is_valid)
            .map(|p| p.with_source(SourceTag::Curated))
            .collect();
        Self { posts }
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let posts: Vec<Post> = serde_json::from_str(json)
            .map_err(|e| ContentError::PoolUnavailable(format!("invalid curated pool: {}", e)))?;
        Ok(Self::from_posts(posts))
    }

    /// The pool compiled into the binary.
    pub fn bundled() -> Result<Self, ContentError> {
        Self::from_json(BUNDLED_CURATED_POSTS)
    }

    pub fn from_file(path: &Path) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ContentError::PoolUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Load from `path` when given, the bundled pool otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ContentError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::bundled(),
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Uniformly random post, or `None` when the pool is empty.
    pub fn pick(&self, random: &mut dyn RandomSource) -> Option<Post> {
        crate::random::pick(self.posts.as_slice(), random).cloned()
    }
}

/// Minimal pool used when nothing else is usable. Always valid.
pub fn builtin_fallback_posts() -> Vec<Post> {
    vec![
        Post {
            id: "fallback_1".to_string(),
            title: "Mon chat mange mes croissants tous les matins".to_string(),
            content: "Je me lève tous les matins à 7h pour préparer mes croissants. Mais Maurice, mon chat roux de 3 ans, a développé une obsession pour la pâte feuilletée. Dès que je pose les croissants sur la table, il saute dessus et en dévore un entier. Ma femme dit que c'est mignon mais moi je n'ai plus jamais de petit-déjeuner !".to_string(),
            url: "https://reddit.com/r/france/example1".to_string(),
            author: String::new(),
            subreddit: "france".to_string(),
            score: 0,
            created_at: Utc::now(),
            source_tag: SourceTag::Fallback,
        },
        Post {
            id: "fallback_2".to_string(),
            title: "Ma voisine collectionne 400 nains de jardin".to_string(),
            content: "Hier, j'ai découvert que ma voisine Henriette collectionne plus de 400 nains de jardin dans son appartement parisien de 30m². Elle les a disposés sur chaque étagère, dans chaque coin. Quand je lui demande pourquoi, elle me répond qu'ils lui tiennent compagnie depuis la mort de son mari. C'est touchant mais terrifiant quand on entre chez elle !".to_string(),
            url: "https://reddit.com/r/france/example2".to_string(),
            author: String::new(),
            subreddit: "france".to_string(),
            score: 0,
            created_at: Utc::now(),
            source_tag: SourceTag::Fallback,
        },
    ]
}

/// Uniformly random built-in post, stamped now with a random score in `[10, 110)`.
pub(crate) fn pick_fallback(random: &mut dyn RandomSource) -> Post {
    let mut posts = builtin_fallback_posts();
    let index = random.next_index(posts.len());
    let mut post = posts.swap_remove(index);
    post.created_at = Utc::now();
    post.score = 10 + random.next_index(100) as i64;
    post
}
