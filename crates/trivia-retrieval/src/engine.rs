//! Keyword-overlap retrieval over an aggregated document.
//!
//! Every operation takes the document text directly and is a pure
//! function of it. An empty document yields empty results.

use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use tracing::debug;
use trivia_types::KeywordSet;

use crate::error::RetrievalError;
use crate::segmenter::{ParagraphSegmenter, Segmenter, SentenceSegmenter};

/// Upper bound on compiled pattern size, in bytes.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Number of keywords occurring in `unit` as a case-sensitive substring.
///
/// Matching is not token-aware: "cat" also counts inside "category".
pub fn keyword_score(unit: &str, keywords: &KeywordSet) -> usize {
    keywords
        .iter()
        .filter(|k| unit.contains(k.as_str()))
        .count()
}

/// Highest-scoring `n` units. Equal scores keep document order.
fn top_units<'a>(units: Vec<&'a str>, keywords: &KeywordSet, n: usize) -> Vec<&'a str> {
    let mut scored: Vec<(usize, &str)> = units
        .into_iter()
        .map(|unit| (keyword_score(unit, keywords), unit))
        .collect();
    // sort_by is stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(n).map(|(_, unit)| unit).collect()
}

/// Retrieval engine with pluggable segmenters.
#[derive(Clone)]
pub struct RetrievalEngine {
    sentences: Arc<dyn Segmenter>,
    paragraphs: Arc<dyn Segmenter>,
}

impl Default for RetrievalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RetrievalEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalEngine").finish_non_exhaustive()
    }
}

impl RetrievalEngine {
    /// Engine using the rule-based sentence splitter and newline paragraphs.
    pub fn new() -> Self {
        Self::with_segmenters(
            Arc::new(SentenceSegmenter::new()),
            Arc::new(ParagraphSegmenter::new()),
        )
    }

    pub fn with_segmenters(sentences: Arc<dyn Segmenter>, paragraphs: Arc<dyn Segmenter>) -> Self {
        Self {
            sentences,
            paragraphs,
        }
    }

    /// Sentences of `document`, in order.
    pub fn sentences<'a>(&self, document: &'a str) -> Vec<&'a str> {
        self.sentences.segment(document)
    }

    /// Paragraphs of `document`, in order.
    pub fn paragraphs<'a>(&self, document: &'a str) -> Vec<&'a str> {
        self.paragraphs.segment(document)
    }

    /// Up to `n` sentences ranked by keyword overlap.
    ///
    /// With no keywords every score is zero and the first `n` sentences
    /// come back in document order.
    pub fn top_sentences<'a>(
        &self,
        document: &'a str,
        keywords: &KeywordSet,
        n: usize,
    ) -> Vec<&'a str> {
        let units = self.sentences(document);
        debug!(
            sentences = units.len(),
            keywords = keywords.len(),
            n,
            "Ranking sentences"
        );
        top_units(units, keywords, n)
    }

    /// Up to `n` paragraphs ranked by keyword overlap.
    pub fn top_paragraphs<'a>(
        &self,
        document: &'a str,
        keywords: &KeywordSet,
        n: usize,
    ) -> Vec<&'a str> {
        let units = self.paragraphs(document);
        debug!(
            paragraphs = units.len(),
            keywords = keywords.len(),
            n,
            "Ranking paragraphs"
        );
        top_units(units, keywords, n)
    }

    /// Compile a search pattern.
    pub fn compile_pattern(pattern: &str) -> Result<Regex, RetrievalError> {
        Ok(RegexBuilder::new(pattern)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()?)
    }

    /// Sentences matching `pattern` anywhere within them, in document order.
    pub fn find_matching<'a>(
        &self,
        document: &'a str,
        pattern: &str,
    ) -> Result<Vec<&'a str>, RetrievalError> {
        let regex = Self::compile_pattern(pattern)?;
        Ok(self.find_matching_regex(document, &regex))
    }

    pub fn find_matching_regex<'a>(&self, document: &'a str, regex: &Regex) -> Vec<&'a str> {
        self.sentences(document)
            .into_iter()
            .filter(|sentence| regex.is_match(sentence))
            .collect()
    }

    /// Whether `candidate` is exactly one of the document's sentences.
    pub fn is_exact_sentence(&self, document: &str, candidate: &str) -> bool {
        self.sentences(document)
            .into_iter()
            .any(|sentence| sentence == candidate)
    }
}
