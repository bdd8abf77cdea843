//! End-to-end session building tests.

use std::collections::{BTreeSet, HashSet};

use pretty_assertions::assert_eq;

use e2e_tests::{keywords_json, TestHarness, ANIMAL_TEXTS};

#[tokio::test]
async fn test_session_texts_belong_to_topic() {
    let harness = TestHarness::new();
    harness.ingest_all(ANIMAL_TEXTS).await;

    for keywords in [
        &["fox"][..],
        &["cat", "owl"][..],
        &["rose", "dog", "night"][..],
    ] {
        let session_id = harness
            .service
            .start_session("animals", &keywords_json(keywords))
            .await
            .unwrap();
        let session = harness.service.get_session(session_id).await.unwrap();
        assert!(!session.text_ids.is_empty());
        for text_id in session.text_ids {
            assert_eq!(harness.storage.get_text(text_id).unwrap().topic, "animals");
        }
    }
}

#[tokio::test]
async fn test_session_picks_most_relevant_text() {
    let harness = TestHarness::new();
    let ids = harness.ingest_all(ANIMAL_TEXTS).await;

    // "fox" occurs twice in the second text and once in the third
    let session_id = harness
        .service
        .start_session("animals", &keywords_json(&["fox"]))
        .await
        .unwrap();
    let session = harness.service.get_session(session_id).await.unwrap();
    assert_eq!(session.text_ids, BTreeSet::from([ids[1]]));
}

#[tokio::test]
async fn test_session_collapses_and_skips() {
    let harness = TestHarness::new();
    let ids = harness.ingest_all(ANIMAL_TEXTS).await;

    let session_id = harness
        .service
        .start_session("animals", &keywords_json(&["owl", "hooted", "unicorn", "owl"]))
        .await
        .unwrap();
    let session = harness.service.get_session(session_id).await.unwrap();
    assert_eq!(session.text_ids, BTreeSet::from([ids[2]]));
}

#[tokio::test]
async fn test_session_without_matches_is_not_found() {
    let harness = TestHarness::new();
    harness.ingest_all(ANIMAL_TEXTS).await;

    let err = harness
        .service
        .start_session("animals", &keywords_json(&["rose"]))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Not found: no matching texts");
}

#[tokio::test]
async fn test_concurrent_sessions_get_distinct_ids() {
    let harness = TestHarness::new();
    harness.ingest_all(ANIMAL_TEXTS).await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let service = harness.service.clone();
        handles.push(tokio::spawn(async move {
            service
                .start_session("animals", r#"["fox","cat"]"#)
                .await
                .unwrap()
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }
    assert_eq!(ids.len(), 10);
    assert_eq!(harness.storage.get_stats().unwrap().session_count, 10);
}
