//! Topic-level keyword ranking.
//!
//! Sums the ranks of every keyword row in a topic and sorts the result.
//! Nothing is maintained incrementally: each call reads the current rows,
//! so concurrent ingestions into the same topic need no coordination.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument};
use trivia_storage::Storage;
use trivia_types::{Keyword, Rank, RankedKeyword};

use crate::error::KeywordsError;

/// Sum ranks per keyword string.
///
/// Output is sorted by total rank descending, then keyword ascending, and
/// lists each distinct keyword exactly once.
pub fn aggregate_rows<'a>(rows: impl IntoIterator<Item = &'a Keyword>) -> Vec<RankedKeyword> {
    let mut totals: HashMap<&str, Rank> = HashMap::new();
    for row in rows {
        *totals.entry(row.keyword.as_str()).or_insert(0) += row.rank;
    }

    let mut ranked: Vec<RankedKeyword> = totals
        .into_iter()
        .map(|(keyword, total_rank)| RankedKeyword::new(keyword, total_rank))
        .collect();
    ranked.sort_by(|a, b| {
        b.total_rank
            .cmp(&a.total_rank)
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    ranked
}

/// Reads a topic's keyword rows from storage and ranks them.
pub struct TopicKeywordAggregator {
    storage: Arc<Storage>,
}

impl TopicKeywordAggregator {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Ranked keywords of a topic. An unknown topic yields an empty list.
    #[instrument(skip(self))]
    pub fn aggregate(&self, topic: &str) -> Result<Vec<RankedKeyword>, KeywordsError> {
        let rows = self.storage.find_keywords(topic)?;
        let ranked = aggregate_rows(&rows);
        debug!(rows = rows.len(), keywords = ranked.len(), "Aggregated topic keywords");
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use trivia_types::Text;

    fn row(text: &Text, keyword: &str, rank: Rank) -> Keyword {
        Keyword::for_text(0, text, keyword, rank)
    }

    #[test]
    fn test_aggregate_rows_sums_and_sorts() {
        let a = Text::new(1, "", "animals");
        let b = Text::new(2, "", "animals");
        let rows = vec![
            row(&a, "dog", 3),
            row(&a, "cat", 5),
            row(&b, "cat", 2),
            row(&b, "fox", 1),
        ];

        let ranked = aggregate_rows(&rows);
        assert_eq!(
            ranked,
            vec![
                RankedKeyword::new("cat", 7),
                RankedKeyword::new("dog", 3),
                RankedKeyword::new("fox", 1),
            ]
        );
    }

    #[test]
    fn test_aggregate_rows_ties_are_alphabetical() {
        let a = Text::new(1, "", "t");
        let rows = vec![row(&a, "pear", 2), row(&a, "apple", 2), row(&a, "fig", 2)];
        let keywords: Vec<String> = aggregate_rows(&rows)
            .into_iter()
            .map(|k| k.keyword)
            .collect();
        assert_eq!(keywords, vec!["apple", "fig", "pear"]);
    }

    #[test]
    fn test_aggregate_rows_preserves_total() {
        let a = Text::new(1, "", "t");
        let b = Text::new(2, "", "t");
        let rows = vec![
            row(&a, "x", 4),
            row(&a, "y", 9),
            row(&b, "x", 1),
            row(&b, "z", 6),
            row(&b, "y", 2),
        ];
        let input_total: Rank = rows.iter().map(|r| r.rank).sum();
        let ranked = aggregate_rows(&rows);
        let output_total: Rank = ranked.iter().map(|k| k.total_rank).sum();
        assert_eq!(input_total, output_total);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_aggregate_rows_empty() {
        assert!(aggregate_rows(&Vec::<Keyword>::new()).is_empty());
    }

    #[test]
    fn test_aggregate_from_storage() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Arc::new(Storage::open(temp_dir.path()).unwrap());

        let one = storage.save_text("The cat sat.", "animals").unwrap();
        let two = storage.save_text("The dog ran.", "animals").unwrap();
        let other = storage.save_text("Roses.", "plants").unwrap();
        storage
            .save_keywords(
                one.text_id,
                "animals",
                &[("cat".to_string(), 5), ("dog".to_string(), 1)],
            )
            .unwrap();
        storage
            .save_keywords(two.text_id, "animals", &[("dog".to_string(), 2)])
            .unwrap();
        storage
            .save_keywords(other.text_id, "plants", &[("rose".to_string(), 9)])
            .unwrap();

        let aggregator = TopicKeywordAggregator::new(storage);
        let ranked = aggregator.aggregate("animals").unwrap();
        assert_eq!(
            ranked,
            vec![RankedKeyword::new("cat", 5), RankedKeyword::new("dog", 3)]
        );
        assert!(aggregator.aggregate("minerals").unwrap().is_empty());
    }
}
