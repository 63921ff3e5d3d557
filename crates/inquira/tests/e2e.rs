// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the complete inquiry pipeline.
//!
//! Each test creates an isolated TestHarness with temp SQLite storage and
//! mock adapters. Tests are independent and order-insensitive.

use std::sync::Arc;

use inquira_core::Category;
use inquira_core::InquiryRecorder;
use inquira_pipeline::{
    BatchRunner, ConcurrentBatch, PooledBatch, FALLBACK_RESPONSE,
};
use inquira_storage::{HistoryFilter, SearchField};
use inquira_test_utils::{make_inquiry, make_inquiry_for, TestHarness};

// ---- Single-inquiry pipeline ----

#[tokio::test]
async fn scripted_inquiry_produces_categorized_outcome() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec![
            "homes under 500k in Seattle with 2+ bedrooms".to_string(),
            "Availability Check".to_string(),
            "Several matching listings are currently available.".to_string(),
        ])
        .build()
        .await
        .unwrap();

    let inquiry = make_inquiry("What properties are available under $500k in Seattle?");
    let outcome = harness.process_and_record(&inquiry).await.unwrap();

    assert_eq!(outcome.category, Category::AvailabilityCheck);
    assert_eq!(
        outcome.response,
        "Several matching listings are currently available."
    );
    assert_eq!(outcome.email, "buyer@example.com");
    assert!(!outcome.processing_id.is_empty());

    // Delivery used the category-bearing subject.
    let sent = harness.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1, "Re: Your Real Estate Inquiry - Availability Check");
}

#[tokio::test]
async fn outcome_is_persisted_to_history() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec![
            "expanded".to_string(),
            "Price Inquiry".to_string(),
            "Comparable homes list between $450k and $520k.".to_string(),
        ])
        .build()
        .await
        .unwrap();

    let inquiry = make_inquiry("how much does it cost?");
    harness.process_and_record(&inquiry).await.unwrap();

    let rows = harness.recorder.list(HistoryFilter::new()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Price Inquiry");
    assert_eq!(rows[0].message, "how much does it cost?");
    assert_eq!(rows[0].response, "Comparable homes list between $450k and $520k.");
    assert_eq!(rows[0].listing_id.as_deref(), Some("L-1"));
}

#[tokio::test]
async fn categorization_failure_yields_general_inquiry() {
    let harness = TestHarness::builder()
        // Only expand and answer consume from the queue; categorize fails.
        .with_mock_responses(vec![
            "expanded".to_string(),
            "still a fine answer".to_string(),
        ])
        .with_failing_categorization()
        .build()
        .await
        .unwrap();

    let outcome = harness.processor.process(&make_inquiry("hello?")).await;
    assert_eq!(outcome.category, Category::GeneralInquiry);
    assert_eq!(outcome.response, "still a fine answer");
}

#[tokio::test]
async fn answer_failure_keeps_category_and_falls_back() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec![
            "expanded".to_string(),
            "Schedule Visit".to_string(),
        ])
        // Every response template opens with this phrase.
        .with_failure_marker("helpful real estate assistant")
        .build()
        .await
        .unwrap();

    let outcome = harness
        .processor
        .process(&make_inquiry("can I tour saturday?"))
        .await;
    assert_eq!(outcome.category, Category::ScheduleVisit);
    assert_eq!(outcome.response, FALLBACK_RESPONSE);
}

#[tokio::test]
async fn expansion_failure_uses_raw_message_for_retrieval_question() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec![
            "Neighborhood Info".to_string(),
            "The area is quiet and walkable.".to_string(),
        ])
        .with_failing_expansion()
        .build()
        .await
        .unwrap();

    let outcome = harness
        .processor
        .process(&make_inquiry("is the area walkable?"))
        .await;
    assert_eq!(outcome.category, Category::NeighborhoodInfo);

    // The answer prompt carried the raw message as its question.
    let prompts = harness.provider.prompts().await;
    let answer_prompt = prompts.last().unwrap();
    assert!(answer_prompt.contains("Customer inquiry: is the area walkable?"));
}

#[tokio::test]
async fn retrieval_failure_falls_back_to_apology() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec![
            "expanded".to_string(),
            "Financing Question".to_string(),
        ])
        .with_retriever_failing()
        .build()
        .await
        .unwrap();

    let outcome = harness
        .processor
        .process(&make_inquiry("what loans exist?"))
        .await;
    assert_eq!(outcome.category, Category::FinancingQuestion);
    assert_eq!(outcome.response, FALLBACK_RESPONSE);
}

#[tokio::test]
async fn disabled_notifier_makes_no_attempt_but_outcome_is_normal() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec![
            "expanded".to_string(),
            "General Inquiry".to_string(),
            "Happy to help!".to_string(),
        ])
        .with_notifier_disabled()
        .build()
        .await
        .unwrap();

    let outcome = harness.processor.process(&make_inquiry("hi")).await;
    assert_eq!(outcome.category, Category::GeneralInquiry);
    assert_eq!(outcome.response, "Happy to help!");
    assert_eq!(harness.notifier.attempt_count(), 0);
    assert_eq!(harness.notifier.sent_count(), 0);
}

#[tokio::test]
async fn notification_failure_never_corrupts_outcome_or_history() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec![
            "expanded".to_string(),
            "Price Inquiry".to_string(),
            "About $500k.".to_string(),
        ])
        .with_notifier_failing()
        .build()
        .await
        .unwrap();

    let inquiry = make_inquiry("price?");
    let outcome = harness.process_and_record(&inquiry).await.unwrap();
    assert_eq!(outcome.category, Category::PriceInquiry);
    assert_eq!(outcome.response, "About $500k.");

    let rows = harness.recorder.list(HistoryFilter::new()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].response, "About $500k.");
}

#[tokio::test]
async fn retrieved_context_is_fed_to_the_answer_prompt() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec![
            "expanded".to_string(),
            "Availability Check".to_string(),
            "See the Craftsman listing.".to_string(),
        ])
        .build()
        .await
        .unwrap();

    harness.processor.process(&make_inquiry("anything open?")).await;

    let prompts = harness.provider.prompts().await;
    let answer_prompt = prompts.last().unwrap();
    // Default mock retriever serves the L-1 Seattle chunk.
    assert!(answer_prompt.contains("Sunny Craftsman near the park"));
    assert!(answer_prompt.contains("listing L-1"));
    // The availability template was selected for the category.
    assert!(answer_prompt.contains("property availability"));
}

// ---- Batch processing ----

#[tokio::test]
async fn pooled_batch_preserves_length_and_order() {
    let harness = TestHarness::builder().build().await.unwrap();
    let runner = PooledBatch::new(&harness.batch_config);

    let inquiries: Vec<_> = (0..8)
        .map(|i| make_inquiry_for(&format!("buyer{i}@example.com"), &format!("message {i}")))
        .collect();
    let report = runner
        .run(harness.processor.clone(), inquiries.clone())
        .await;

    assert_eq!(report.outcomes.len(), 8);
    for (outcome, inquiry) in report.outcomes.iter().zip(&inquiries) {
        assert_eq!(outcome.email, inquiry.email);
        // Unscripted mock output never matches a canonical category.
        assert_eq!(outcome.category, Category::GeneralInquiry);
    }
}

#[tokio::test]
async fn concurrent_batch_matches_sequential_processing() {
    let inquiries: Vec<_> = (0..6)
        .map(|i| make_inquiry_for(&format!("buyer{i}@example.com"), &format!("message {i}")))
        .collect();

    let sequential_harness = TestHarness::builder().build().await.unwrap();
    let mut sequential = Vec::new();
    for inquiry in &inquiries {
        sequential.push(sequential_harness.processor.process(inquiry).await);
    }

    let concurrent_harness = TestHarness::builder().build().await.unwrap();
    let runner = ConcurrentBatch::new(&concurrent_harness.batch_config);
    let report = runner
        .run(concurrent_harness.processor.clone(), inquiries.clone())
        .await;

    assert_eq!(report.outcomes.len(), sequential.len());
    for (a, b) in sequential.iter().zip(&report.outcomes) {
        assert_eq!(a.email, b.email);
        assert_eq!(a.category, b.category);
        assert_eq!(a.response, b.response);
    }
}

#[tokio::test]
async fn batch_outcomes_are_recorded_index_aligned() {
    let harness = TestHarness::builder().build().await.unwrap();
    let runner = PooledBatch::new(&harness.batch_config);

    let inquiries: Vec<_> = (0..3)
        .map(|i| make_inquiry_for(&format!("user{i}@example.com"), &format!("q{i}")))
        .collect();
    let report = runner
        .run(harness.processor.clone(), inquiries.clone())
        .await;

    harness
        .recorder
        .record_batch(&inquiries, &report.outcomes)
        .await
        .unwrap();

    let rows = harness.recorder.list(HistoryFilter::new()).await.unwrap();
    assert_eq!(rows.len(), 3);
    for i in 0..3 {
        let row = rows
            .iter()
            .find(|r| r.email == format!("user{i}@example.com"))
            .unwrap();
        assert_eq!(row.message, format!("q{i}"));
    }
}

// ---- History queries over processed inquiries ----

#[tokio::test]
async fn history_filters_and_search_cover_processed_inquiries() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec![
            // First inquiry: price.
            "expanded one".to_string(),
            "Price Inquiry".to_string(),
            "It lists at $475k.".to_string(),
            // Second inquiry: visit.
            "expanded two".to_string(),
            "Schedule Visit".to_string(),
            "Tours run on weekends.".to_string(),
        ])
        .build()
        .await
        .unwrap();

    harness
        .process_and_record(&make_inquiry_for("alice@example.com", "how much?"))
        .await
        .unwrap();
    harness
        .process_and_record(&make_inquiry_for("bob@example.com", "can I tour it?"))
        .await
        .unwrap();

    let price_rows = harness
        .recorder
        .list(HistoryFilter {
            category: Some("Price Inquiry".into()),
            ..HistoryFilter::new()
        })
        .await
        .unwrap();
    assert_eq!(price_rows.len(), 1);
    assert_eq!(price_rows[0].email, "alice@example.com");

    let tour_rows = harness
        .recorder
        .search("tour", SearchField::Message, 50)
        .await
        .unwrap();
    assert_eq!(tour_rows.len(), 1);
    assert_eq!(tour_rows[0].email, "bob@example.com");

    let summary = harness.recorder.analytics(30).await.unwrap();
    assert_eq!(summary.total_inquiries, 2);
    assert_eq!(summary.category_distribution.get("Price Inquiry"), Some(&1));
    assert_eq!(summary.category_distribution.get("Schedule Visit"), Some(&1));
}

// ---- Harness isolation ----

#[tokio::test]
async fn harnesses_are_independent() {
    let h1 = TestHarness::builder()
        .with_mock_responses(vec![
            "e1".to_string(),
            "Price Inquiry".to_string(),
            "h1-response".to_string(),
        ])
        .build()
        .await
        .unwrap();
    let h2 = TestHarness::builder()
        .with_mock_responses(vec![
            "e2".to_string(),
            "Schedule Visit".to_string(),
            "h2-response".to_string(),
        ])
        .build()
        .await
        .unwrap();

    let o1 = h1.process_and_record(&make_inquiry("msg")).await.unwrap();
    let o2 = h2.process_and_record(&make_inquiry("msg")).await.unwrap();

    assert_eq!(o1.response, "h1-response");
    assert_eq!(o2.response, "h2-response");

    assert_eq!(h1.recorder.list(HistoryFilter::new()).await.unwrap().len(), 1);
    assert_eq!(h2.recorder.list(HistoryFilter::new()).await.unwrap().len(), 1);
}

// ---- Degraded outcome invariants ----

#[tokio::test]
async fn every_inquiry_yields_exactly_one_outcome_with_canonical_category() {
    // All stages failing at once still yields a well-formed outcome.
    let harness = TestHarness::builder()
        .with_failing_expansion()
        .with_failing_categorization()
        .with_failure_marker("helpful real estate assistant")
        .with_retriever_failing()
        .with_notifier_failing()
        .build()
        .await
        .unwrap();

    let outcome = harness.processor.process(&make_inquiry("outage")).await;
    assert_eq!(outcome.category, Category::GeneralInquiry);
    assert_eq!(outcome.response, FALLBACK_RESPONSE);
    assert!(!outcome.processing_id.is_empty());
    assert!(!outcome.processed_at.is_empty());
}

#[tokio::test]
async fn batch_report_exposes_elapsed_duration() {
    let harness = TestHarness::builder().build().await.unwrap();
    let runner = Arc::new(PooledBatch::new(&harness.batch_config));
    let report = runner
        .run(harness.processor.clone(), vec![make_inquiry("one")])
        .await;
    assert_eq!(report.outcomes.len(), 1);
    assert!(report.elapsed < std::time::Duration::from_secs(30));
}
