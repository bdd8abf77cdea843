//! End-to-end keyword ranking tests.
//!
//! Covers extraction at ingestion time and topic-level aggregation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use pretty_assertions::assert_eq;

use e2e_tests::{FixedExtractor, TestHarness, ANIMAL_TEXTS};
use trivia_types::{Rank, RankedKeyword};

#[tokio::test]
async fn test_topic_keywords_from_corpus() {
    let harness = TestHarness::new();
    harness.ingest_all(ANIMAL_TEXTS).await;

    let ranked = harness
        .service
        .get_topic_keywords("animals", Some(4))
        .await
        .unwrap();
    assert_eq!(
        ranked,
        vec![
            RankedKeyword::new("fox", 3),
            RankedKeyword::new("dog", 2),
            RankedKeyword::new("owl", 2),
            RankedKeyword::new("ran", 2),
        ]
    );

    let plants = harness.service.get_topic_keywords("plants", None).await.unwrap();
    assert_eq!(plants[0], RankedKeyword::new("rose", 2));
    assert!(plants.iter().all(|k| k.keyword != "fox"));
}

#[tokio::test]
async fn test_aggregate_lists_each_keyword_once_and_preserves_sum() {
    let harness = TestHarness::new();
    harness.ingest_all(ANIMAL_TEXTS).await;

    let rows = harness.storage.find_keywords("animals").unwrap();
    let row_total: Rank = rows.iter().map(|k| k.rank).sum();
    let distinct: HashSet<&str> = rows.iter().map(|k| k.keyword.as_str()).collect();

    let ranked = harness.service.get_topic_keywords("animals", None).await.unwrap();
    let ranked_total: Rank = ranked.iter().map(|k| k.total_rank).sum();

    assert_eq!(ranked.len(), distinct.len());
    assert_eq!(ranked_total, row_total);
    for pair in ranked.windows(2) {
        assert!(
            pair[0].total_rank > pair[1].total_rank
                || (pair[0].total_rank == pair[1].total_rank && pair[0].keyword < pair[1].keyword)
        );
    }
}

#[tokio::test]
async fn test_fixed_ranks_sort_descending() {
    let extractor = Arc::new(FixedExtractor::new(&[("cat", 5), ("dog", 3)]));
    let harness = TestHarness::with_extractor(extractor);
    harness
        .ingest_all(&[("animals", "The cat sat. The dog ran. Cats and dogs play.")])
        .await;

    let ranked = harness.service.get_topic_keywords("animals", None).await.unwrap();
    assert_eq!(
        ranked,
        vec![RankedKeyword::new("cat", 5), RankedKeyword::new("dog", 3)]
    );
}

#[tokio::test]
async fn test_keyword_rows_carry_text_topic() {
    let harness = TestHarness::new();
    let ids = harness.ingest_all(ANIMAL_TEXTS).await;

    let topics: HashMap<u64, String> = ids
        .iter()
        .map(|&id| {
            let text = harness.storage.get_text(id).unwrap();
            (id, text.topic)
        })
        .collect();

    for topic in ["animals", "plants"] {
        for row in harness.storage.find_keywords(topic).unwrap() {
            assert_eq!(row.topic, topics[&row.text_id]);
        }
    }
}

#[tokio::test]
async fn test_concurrent_ingestion_into_one_topic() {
    let harness = TestHarness::new();

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = harness.service.clone();
        handles.push(tokio::spawn(async move {
            let body = if i % 2 == 0 { "The fox ran." } else { "The fox and the owl." };
            service.ingest_text(body, "animals").await.unwrap()
        }));
    }
    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }
    assert_eq!(ids.len(), 8);

    let ranked = harness.service.get_topic_keywords("animals", None).await.unwrap();
    assert_eq!(ranked[0], RankedKeyword::new("fox", 8));
    assert!(ranked.contains(&RankedKeyword::new("owl", 4)));
    assert!(ranked.contains(&RankedKeyword::new("ran", 4)));
}
