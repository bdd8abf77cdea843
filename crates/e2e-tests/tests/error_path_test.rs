//! Error taxonomy at the service boundary.
//!
//! Bad input, not found and internal failures must stay distinguishable.

use std::sync::Arc;

use e2e_tests::{keywords_json, FixedExtractor, TestHarness, ANIMAL_TEXTS};

#[tokio::test]
async fn test_missing_fields_are_bad_input() {
    let harness = TestHarness::new();
    let service = &harness.service;

    assert!(service.ingest_text("", "animals").await.unwrap_err().is_bad_input());
    assert!(service.ingest_text("A fox.", "").await.unwrap_err().is_bad_input());
    assert!(service.get_topic_keywords("", None).await.unwrap_err().is_bad_input());
    assert!(service.start_session("", "[]").await.unwrap_err().is_bad_input());
    assert!(service.add_site("animals", " ").await.unwrap_err().is_bad_input());
}

#[tokio::test]
async fn test_malformed_keyword_sets_are_bad_input() {
    let harness = TestHarness::new();
    harness.ingest_all(ANIMAL_TEXTS).await;
    let service = &harness.service;
    let session_id = service
        .start_session("animals", &keywords_json(&["fox"]))
        .await
        .unwrap();

    for raw in ["fox", "{\"fox\":1}", "[1]", "[\"fox\""] {
        assert!(service.start_session("animals", raw).await.unwrap_err().is_bad_input());
        assert!(service.top_sentences(session_id, raw).await.unwrap_err().is_bad_input());
        assert!(service.top_paragraphs(session_id, raw).await.unwrap_err().is_bad_input());
    }
}

#[tokio::test]
async fn test_malformed_pattern_is_bad_input() {
    let harness = TestHarness::new();
    harness.ingest_all(ANIMAL_TEXTS).await;
    let session_id = harness
        .service
        .start_session("animals", &keywords_json(&["fox"]))
        .await
        .unwrap();

    for pattern in ["f(x", "[fox", "*fox"] {
        let err = harness.service.find_matching(session_id, pattern).await.unwrap_err();
        assert!(err.is_bad_input(), "{pattern:?} should be rejected");
    }
}

#[tokio::test]
async fn test_unknown_records_are_not_found() {
    let harness = TestHarness::new();
    let service = &harness.service;

    assert!(service.top_sentences(404, "[]").await.unwrap_err().is_not_found());
    assert!(service.top_paragraphs(404, "[]").await.unwrap_err().is_not_found());
    assert!(service.find_matching(404, "fox").await.unwrap_err().is_not_found());
    assert!(service.is_exact_sentence(404, "A fox.").await.unwrap_err().is_not_found());
    assert!(service.get_text(404).await.unwrap_err().is_not_found());
    assert!(service.delete_text(404).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_unknown_topic_has_no_keywords() {
    let harness = TestHarness::new();
    harness.ingest_all(ANIMAL_TEXTS).await;
    assert!(harness
        .service
        .get_topic_keywords("minerals", None)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_rejected_extraction_leaves_no_text() {
    let harness = TestHarness::with_extractor(Arc::new(FixedExtractor::new(&[
        ("jumped", 1),
        ("fox", 0),
    ])));

    let err = harness
        .service
        .ingest_text("A fox jumped.", "animals")
        .await
        .unwrap_err();
    assert!(err.is_bad_input());

    let stats = harness.storage.get_stats().unwrap();
    assert_eq!(stats.text_count, 0);
    assert_eq!(stats.keyword_count, 0);
    assert!(harness.storage.get_text(1).is_err());
}
