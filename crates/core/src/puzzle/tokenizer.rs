//! Text tokenization and token classification.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::config::GameConfig;
use crate::random::RandomSource;

use super::types::{Category, Token};

/// Anything that is not an ASCII word character, whitespace or Latin-1 letter.
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\sÀ-ÿ]").unwrap());

/// French function words. Always `common`, whatever the draws say.
pub const STOPLIST: &[&str] = &[
    "le", "la", "les", "un", "une", "des", "du", "de",
    "je", "tu", "il", "elle", "nous", "vous", "ils", "elles",
    "mon", "ma", "mes", "ton", "ta", "tes", "son", "sa", "ses",
    "notre", "votre", "leur", "leurs", "ce", "cette", "ces",
    "qui", "que", "quoi", "dont", "où", "comment", "quand", "pourquoi",
    "et", "ou", "mais", "donc", "car", "ni", "or",
    "dans", "sur", "sous", "avec", "sans", "pour", "par", "vers",
    "chez", "entre", "parmi", "selon", "pendant", "depuis",
    "est", "sont", "était", "étaient", "sera", "seront",
    "a", "ont", "avait", "avaient", "aura", "auront",
    "très", "plus", "moins", "assez", "trop", "bien", "mal",
    "oui", "non", "peut", "être", "avoir", "faire", "dire", "aller",
    "voir", "savoir", "pouvoir", "vouloir", "venir", "falloir",
    "devoir", "croire", "partir", "prendre", "donner", "mettre",
];

pub fn is_stopword(normalized: &str) -> bool {
    STOPLIST.contains(&normalized)
}

/// Split `text` into words of at least `min_word_length` characters.
pub fn tokenize(text: &str, min_word_length: usize) -> Vec<String> {
    SEPARATORS
        .replace_all(text, " ")
        .split_whitespace()
        .filter(|word| word.chars().count() >= min_word_length)
        .map(str::to_string)
        .collect()
}

/// Category of a lowercase word.
///
/// Stopwords never draw. Other words draw once for `keyword` and, failing
/// that, once more for `important`.
pub fn classify(normalized: &str, config: &GameConfig, random: &mut dyn RandomSource) -> Category {
    if is_stopword(normalized) {
        return Category::Common;
    }
    if random.next_f64() < config.keyword_probability {
        Category::Keyword
    } else if random.next_f64() < config.important_probability {
        Category::Important
    } else {
        Category::Common
    }
}

/// Tokenize and classify `text`.
pub fn build_tokens(text: &str, config: &GameConfig, random: &mut dyn RandomSource) -> Vec<Token> {
    tokenize(text, config.min_word_length)
        .iter()
        .enumerate()
        .map(|(position, word)| {
            let category = classify(&word.to_lowercase(), config, random);
            Token::new(word, category, position)
        })
        .collect()
}
