//! Candidate filtering shared by every network tier.

use super::types::{Post, RawPost};

/// Body length bounds, both exclusive.
pub const MIN_BODY_CHARS: usize = 100;
pub const MAX_BODY_CHARS: usize = 2000;

/// Substrings that mark a text as French. Deliberately loose: a plain
/// case-insensitive substring search, no tokenization.
pub const FRENCH_INDICATORS: &[&str] = &[
    // articles
    "le ", "la ", "les ", "un ", "une ", "des ",
    // pronouns
    "je ", "tu ", "il ", "elle ", "nous ", "vous ", "ils ", "elles ",
    // common words
    "est ", "sont ", "avoir ", "être ", "faire ", "aller ", "avec ", "dans ",
    "pour ", "sur ", "par ", "mais ", "donc ", "alors ", "quand ", "comment ",
    // expressions
    "c'est ", "il y a ", "qu'est-ce que ", "est-ce que ",
    // accented
    "à ", "où ", "ça ", "déjà ", "français", "être", "hôtel",
];

/// Whether `text` trips the French allow-list.
pub fn contains_french_words(text: &str) -> bool {
    let lower = text.to_lowercase();
    FRENCH_INDICATORS.iter().any(|indicator| lower.contains(indicator))
}

/// Whether a raw listing entry is playable.
pub fn is_qualifying(post: &RawPost) -> bool {
    let len = post.selftext.chars().count();
    len > MIN_BODY_CHARS
        && len < MAX_BODY_CHARS
        && !post.over_18
        && !post.stickied
        && contains_french_words(&post.selftext)
}

/// Keep the qualifying entries of a listing, converted to posts.
pub fn filter_candidates(raw: Vec<RawPost>) -> Vec<Post> {
    raw.into_iter().filter(is_qualifying).map(Post::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(selftext: &str) -> RawPost {
        RawPost {
            id: "x".to_string(),
            title: "Titre".to_string(),
            selftext: selftext.to_string(),
            permalink: "/r/france/x".to_string(),
            ..Default::default()
        }
    }

    fn french_body(len: usize) -> String {
        let mut s = String::from("Je pense que ");
        while s.chars().count() < len {
            s.push('a');
        }
        s
    }

    #[test]
    fn test_contains_french_words_case_insensitive() {
        assert!(contains_french_words("VOUS ÊTES là"));
        assert!(contains_french_words("Quel bel HÔTEL"));
        assert!(!contains_french_words("The quick brown fox jumps"));
    }

    #[test]
    fn test_contains_french_words_is_substring_match() {
        // "table " ends with "le ", which is enough
        assert!(contains_french_words("table ronde"));
    }

    #[test]
    fn test_length_bounds_are_exclusive() {
        assert!(!is_qualifying(&raw(&french_body(100))));
        assert!(is_qualifying(&raw(&french_body(101))));
        assert!(is_qualifying(&raw(&french_body(1999))));
        assert!(!is_qualifying(&raw(&french_body(2000))));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 101 characters, far more than 101 bytes
        let mut body = String::from("je ");
        while body.chars().count() < 101 {
            body.push('é');
        }
        assert!(body.len() > 150);
        assert!(is_qualifying(&raw(&body)));
    }

    #[test]
    fn test_adult_and_sticky_are_rejected() {
        let mut adult = raw(&french_body(300));
        adult.over_18 = true;
        assert!(!is_qualifying(&adult));

        let mut sticky = raw(&french_body(300));
        sticky.stickied = true;
        assert!(!is_qualifying(&sticky));
    }

    #[test]
    fn test_non_french_rejected() {
        let body = "x".repeat(300);
        assert!(!is_qualifying(&raw(&body)));
    }

    #[test]
    fn test_filter_candidates_keeps_only_qualifying() {
        let candidates = filter_candidates(vec![
            raw(&french_body(300)),
            raw("trop court"),
            raw(&"x".repeat(300)),
        ]);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://reddit.com/r/france/x");
    }
}
