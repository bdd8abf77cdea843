//! Keyword extraction from a single text.
//!
//! Each text is processed on its own: a keyword's rank is the number of
//! times it occurs in the text, so higher ranks mean more relevant terms.

use std::collections::HashMap;

use trivia_types::{ExtractionSettings, Rank};

/// Produces ranked keywords for one text body.
///
/// Implementations must only return non-empty keywords with ranks >= 1.
/// An empty result is valid (e.g. a body made only of stop words).
pub trait KeywordExtractor: Send + Sync {
    /// Extract `(keyword, rank)` pairs. No ordering is guaranteed.
    fn extract(&self, body: &str) -> Vec<(String, Rank)>;
}

/// Term-frequency keyword extractor.
///
/// Keeps the `max_keywords` most frequent terms; equal counts are ordered
/// alphabetically so the cut is deterministic.
#[derive(Debug, Clone)]
pub struct FrequencyExtractor {
    max_keywords: usize,
    min_token_length: usize,
}

impl FrequencyExtractor {
    pub fn new(settings: &ExtractionSettings) -> Self {
        Self {
            max_keywords: settings.max_keywords,
            min_token_length: settings.min_token_length,
        }
    }
}

impl Default for FrequencyExtractor {
    fn default() -> Self {
        Self::new(&ExtractionSettings::default())
    }
}

impl KeywordExtractor for FrequencyExtractor {
    fn extract(&self, body: &str) -> Vec<(String, Rank)> {
        let mut counts: HashMap<String, Rank> = HashMap::new();
        for term in tokenize(body, self.min_token_length) {
            *counts.entry(term).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, Rank)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_keywords);
        ranked
    }
}

/// Tokenize text into lowercase words.
///
/// Filters out:
/// - Stop words (common English words)
/// - Tokens shorter than `min_len` characters
/// - Numbers
pub fn tokenize(text: &str, min_len: usize) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .filter(|s| s.chars().count() >= min_len)
        .filter(|s| !is_stop_word(s))
        .filter(|s| !s.chars().all(|c| c.is_numeric()))
        .map(String::from)
        .collect()
}

/// Check if a word is a stop word.
fn is_stop_word(word: &str) -> bool {
    const STOP_WORDS: &[&str] = &[
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
        "it", "its", "of", "on", "or", "that", "the", "to", "was", "were", "will", "with", "this",
        "they", "but", "have", "had", "what", "when", "where", "who", "which", "why", "how", "all",
        "each", "every", "both", "few", "more", "most", "other", "some", "such", "no", "nor",
        "not", "only", "own", "same", "so", "than", "too", "very", "can", "just", "should", "now",
        "also", "been", "being", "do", "does", "did", "doing", "would", "could", "might", "must",
        "shall", "about", "above", "after", "again", "against", "am", "any", "before", "below",
        "between", "into", "through", "during", "out", "over", "under", "up", "down", "then",
        "once", "here", "there", "if", "else", "while", "because", "until", "we", "you", "your",
        "our", "their", "him", "her", "them", "me", "my", "myself", "itself", "those", "these",
        "his", "she", "i",
    ];

    STOP_WORDS.contains(&word)
}
