// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch coordination: fan a collection of inquiries out across the
//! processor with per-item isolation, and fan back in preserving input
//! order.
//!
//! Two interchangeable [`BatchRunner`] implementations exist: a bounded
//! worker pool with a sequential threshold ([`PooledBatch`]) and an
//! all-at-once cooperative fan-out ([`ConcurrentBatch`]). Both substitute a
//! degraded outcome at the index of any item that times out, errors, or
//! panics; siblings are unaffected.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use inquira_config::model::BatchConfig;
use inquira_core::types::{Category, Inquiry, InquiryOutcome};

use crate::processor::InquiryProcessor;

/// Degraded response substituted for an isolated per-item failure.
pub const BATCH_FALLBACK_RESPONSE: &str =
    "Sorry, we encountered an error processing your inquiry.";

/// Result of one batch run.
#[derive(Debug)]
pub struct BatchReport {
    /// One outcome per input inquiry, index-aligned.
    pub outcomes: Vec<InquiryOutcome>,
    /// Aggregate wall-clock duration of the batch.
    pub elapsed: Duration,
}

/// A bounded-concurrency fan-out strategy over the processor.
///
/// Implementations are length- and order-preserving: `outcomes[i]`
/// corresponds to `inquiries[i]`.
#[async_trait]
pub trait BatchRunner: Send + Sync {
    /// Process every inquiry, substituting degraded outcomes for isolated
    /// failures, and report the aggregate duration.
    async fn run(&self, processor: Arc<InquiryProcessor>, inquiries: Vec<Inquiry>)
        -> BatchReport;
}

/// The degraded outcome substituted when an item fails in isolation.
pub fn degraded_outcome(inquiry: &Inquiry) -> InquiryOutcome {
    InquiryOutcome {
        email: inquiry.email.clone(),
        category: Category::GeneralInquiry,
        response: BATCH_FALLBACK_RESPONSE.to_string(),
        email_title: Some("Error Processing Inquiry".to_string()),
        email_body: Some(
            "We apologize for the inconvenience. Please try again later.".to_string(),
        ),
        processing_id: uuid::Uuid::new_v4().to_string(),
        processed_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Worker-pool batch runner.
///
/// At or below `sequential_threshold` items the batch runs in-order, one at
/// a time. Above it, items fan out across tasks bounded by a semaphore of
/// `max_concurrency` permits, each under `item_timeout`.
pub struct PooledBatch {
    sequential_threshold: usize,
    max_concurrency: usize,
    item_timeout: Duration,
}

impl PooledBatch {
    /// Build from batch configuration.
    pub fn new(config: &BatchConfig) -> Self {
        Self {
            sequential_threshold: config.sequential_threshold,
            max_concurrency: config.max_concurrency,
            item_timeout: Duration::from_secs(config.item_timeout_secs),
        }
    }
}

#[async_trait]
impl BatchRunner for PooledBatch {
    async fn run(
        &self,
        processor: Arc<InquiryProcessor>,
        inquiries: Vec<Inquiry>,
    ) -> BatchReport {
        let start = Instant::now();
        let count = inquiries.len();
        info!(count, mode = "pooled", "starting batch processing");

        let outcomes = if count <= self.sequential_threshold {
            // Small batches skip the fan-out; each item still runs in its
            // own task so a panic is isolated to its index.
            let mut outcomes = Vec::with_capacity(count);
            for inquiry in &inquiries {
                let handle = spawn_item(
                    processor.clone(),
                    inquiry.clone(),
                    self.item_timeout,
                    None,
                );
                outcomes.push(resolve_item(handle.await, inquiry));
            }
            outcomes
        } else {
            let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
            let handles: Vec<JoinHandle<Option<InquiryOutcome>>> = inquiries
                .iter()
                .map(|inquiry| {
                    spawn_item(
                        processor.clone(),
                        inquiry.clone(),
                        self.item_timeout,
                        Some(semaphore.clone()),
                    )
                })
                .collect();
            join_in_order(handles, &inquiries).await
        };

        let elapsed = start.elapsed();
        info!(
            count,
            elapsed_ms = elapsed.as_millis() as u64,
            "batch processing completed"
        );
        BatchReport { outcomes, elapsed }
    }
}

/// Cooperative batch runner: every item is launched at once, no threshold,
/// and the fan-in join waits for all tasks regardless of individual failure.
pub struct ConcurrentBatch {
    item_timeout: Duration,
}

impl ConcurrentBatch {
    /// Build from batch configuration.
    pub fn new(config: &BatchConfig) -> Self {
        Self {
            item_timeout: Duration::from_secs(config.item_timeout_secs),
        }
    }
}

#[async_trait]
impl BatchRunner for ConcurrentBatch {
    async fn run(
        &self,
        processor: Arc<InquiryProcessor>,
        inquiries: Vec<Inquiry>,
    ) -> BatchReport {
        let start = Instant::now();
        let count = inquiries.len();
        info!(count, mode = "concurrent", "starting batch processing");

        let handles: Vec<JoinHandle<Option<InquiryOutcome>>> = inquiries
            .iter()
            .map(|inquiry| {
                spawn_item(processor.clone(), inquiry.clone(), self.item_timeout, None)
            })
            .collect();
        let outcomes = join_in_order(handles, &inquiries).await;

        let elapsed = start.elapsed();
        info!(
            count,
            elapsed_ms = elapsed.as_millis() as u64,
            "batch processing completed"
        );
        BatchReport { outcomes, elapsed }
    }
}

/// Spawn one item task; `None` means the item timed out (or the pool was
/// torn down before a permit arrived).
fn spawn_item(
    processor: Arc<InquiryProcessor>,
    inquiry: Inquiry,
    timeout: Duration,
    semaphore: Option<Arc<Semaphore>>,
) -> JoinHandle<Option<InquiryOutcome>> {
    tokio::spawn(async move {
        let _permit = match semaphore {
            Some(sem) => Some(sem.acquire_owned().await.ok()?),
            None => None,
        };
        tokio::time::timeout(timeout, processor.process(&inquiry))
            .await
            .ok()
    })
}

/// Resolve one joined item, substituting the degraded outcome on timeout
/// or panic.
fn resolve_item(
    result: Result<Option<InquiryOutcome>, tokio::task::JoinError>,
    inquiry: &Inquiry,
) -> InquiryOutcome {
    match result {
        Ok(Some(outcome)) => outcome,
        Ok(None) => {
            warn!(
                email = inquiry.email.as_str(),
                "inquiry timed out, substituting degraded outcome"
            );
            degraded_outcome(inquiry)
        }
        Err(e) => {
            error!(
                email = inquiry.email.as_str(),
                error = %e,
                "inquiry task failed, substituting degraded outcome"
            );
            degraded_outcome(inquiry)
        }
    }
}

/// Fan-in: wait for every task, then re-assemble outcomes in input order.
async fn join_in_order(
    handles: Vec<JoinHandle<Option<InquiryOutcome>>>,
    inquiries: &[Inquiry],
) -> Vec<InquiryOutcome> {
    futures::future::join_all(handles)
        .await
        .into_iter()
        .zip(inquiries)
        .map(|(result, inquiry)| resolve_item(result, inquiry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{make_inquiry_for, test_processor, StubBehavior};

    fn batch_config(threshold: usize, concurrency: usize, timeout_secs: u64) -> BatchConfig {
        BatchConfig {
            mode: "pooled".into(),
            sequential_threshold: threshold,
            max_concurrency: concurrency,
            item_timeout_secs: timeout_secs,
            max_batch_size: 100,
        }
    }

    fn inquiries(n: usize) -> Vec<Inquiry> {
        (0..n)
            .map(|i| make_inquiry_for(&format!("buyer{i}@example.com"), &format!("msg-{i}")))
            .collect()
    }

    /// Deterministic behavior where the response embeds the input message.
    fn echoing_behavior() -> StubBehavior {
        StubBehavior {
            // Failing expansion makes the raw message the answer question.
            fail_expand: true,
            echo_answer_prompt: true,
            ..StubBehavior::default()
        }
    }

    fn assert_index_aligned(outcomes: &[InquiryOutcome], input: &[Inquiry]) {
        assert_eq!(outcomes.len(), input.len());
        for (outcome, inquiry) in outcomes.iter().zip(input) {
            assert_eq!(outcome.email, inquiry.email);
        }
    }

    #[tokio::test]
    async fn small_batch_processes_sequentially_in_order() {
        let (processor, _) = test_processor(echoing_behavior());
        let runner = PooledBatch::new(&batch_config(5, 5, 30));

        let input = inquiries(3);
        let report = runner.run(processor, input.clone()).await;

        assert_index_aligned(&report.outcomes, &input);
        for (i, outcome) in report.outcomes.iter().enumerate() {
            assert!(outcome.response.contains(&format!("msg-{i}")));
        }
    }

    #[tokio::test]
    async fn large_batch_preserves_length_and_order() {
        let (processor, _) = test_processor(echoing_behavior());
        let runner = PooledBatch::new(&batch_config(5, 5, 30));

        let input = inquiries(12);
        let report = runner.run(processor, input.clone()).await;

        assert_index_aligned(&report.outcomes, &input);
        for (i, outcome) in report.outcomes.iter().enumerate() {
            assert!(
                outcome.response.contains(&format!("msg-{i}")),
                "outcome {i} does not correspond to its input"
            );
        }
    }

    #[tokio::test]
    async fn concurrent_runner_preserves_length_and_order() {
        let (processor, _) = test_processor(echoing_behavior());
        let runner = ConcurrentBatch::new(&batch_config(5, 5, 30));

        let input = inquiries(9);
        let report = runner.run(processor, input.clone()).await;

        assert_index_aligned(&report.outcomes, &input);
        for (i, outcome) in report.outcomes.iter().enumerate() {
            assert!(outcome.response.contains(&format!("msg-{i}")));
        }
    }

    #[tokio::test]
    async fn panicking_item_degrades_only_its_index() {
        let mut behavior = echoing_behavior();
        behavior.panic_marker = Some("msg-4".into());
        let (processor, _) = test_processor(behavior);
        let runner = PooledBatch::new(&batch_config(5, 5, 30));

        let input = inquiries(8);
        let report = runner.run(processor, input.clone()).await;

        assert_index_aligned(&report.outcomes, &input);
        assert_eq!(report.outcomes[4].response, BATCH_FALLBACK_RESPONSE);
        assert_eq!(report.outcomes[4].category, Category::GeneralInquiry);
        assert_eq!(
            report.outcomes[4].email_title.as_deref(),
            Some("Error Processing Inquiry")
        );
        for (i, outcome) in report.outcomes.iter().enumerate() {
            if i != 4 {
                assert!(outcome.response.contains(&format!("msg-{i}")));
            }
        }
    }

    #[tokio::test]
    async fn panicking_item_in_sequential_branch_is_isolated_too() {
        let mut behavior = echoing_behavior();
        behavior.panic_marker = Some("msg-1".into());
        let (processor, _) = test_processor(behavior);
        let runner = PooledBatch::new(&batch_config(5, 5, 30));

        let input = inquiries(3);
        let report = runner.run(processor, input.clone()).await;

        assert_eq!(report.outcomes[1].response, BATCH_FALLBACK_RESPONSE);
        assert!(report.outcomes[0].response.contains("msg-0"));
        assert!(report.outcomes[2].response.contains("msg-2"));
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_item_degrades_only_its_index() {
        let mut behavior = echoing_behavior();
        behavior.slow_marker = Some("msg-2".into());
        behavior.slow_duration = Some(Duration::from_secs(120));
        let (processor, _) = test_processor(behavior);
        let runner = PooledBatch::new(&batch_config(2, 5, 30));

        let input = inquiries(7);
        let report = runner.run(processor, input.clone()).await;

        assert_index_aligned(&report.outcomes, &input);
        assert_eq!(report.outcomes[2].response, BATCH_FALLBACK_RESPONSE);
        for (i, outcome) in report.outcomes.iter().enumerate() {
            if i != 2 {
                assert!(outcome.response.contains(&format!("msg-{i}")));
            }
        }
    }

    #[tokio::test]
    async fn pooled_matches_sequential_for_deterministic_stub() {
        let input = inquiries(10);

        let (sequential_processor, _) = test_processor(echoing_behavior());
        let mut sequential = Vec::new();
        for inquiry in &input {
            sequential.push(sequential_processor.process(inquiry).await);
        }

        let (pooled_processor, _) = test_processor(echoing_behavior());
        let runner = PooledBatch::new(&batch_config(5, 5, 30));
        let report = runner.run(pooled_processor, input.clone()).await;

        // Identical modulo per-invocation ids and timestamps.
        for (a, b) in sequential.iter().zip(&report.outcomes) {
            assert_eq!(a.email, b.email);
            assert_eq!(a.category, b.category);
            assert_eq!(a.response, b.response);
        }
    }

    #[tokio::test]
    async fn empty_batch_reports_zero_outcomes() {
        let (processor, _) = test_processor(StubBehavior::default());
        let runner = PooledBatch::new(&batch_config(5, 5, 30));
        let report = runner.run(processor, Vec::new()).await;
        assert!(report.outcomes.is_empty());
    }

    #[tokio::test]
    async fn report_exposes_elapsed_duration() {
        let (processor, _) = test_processor(StubBehavior::default());
        let runner = ConcurrentBatch::new(&batch_config(5, 5, 30));
        let report = runner.run(processor, inquiries(2)).await;
        // Wall-clock duration is measured; zero is fine for stubs, the
        // field just has to be populated and sane.
        assert!(report.elapsed < Duration::from_secs(30));
    }

    #[tokio::test]
    async fn degraded_outcome_carries_inquirer_email() {
        let inquiry = make_inquiry_for("someone@example.com", "msg");
        let outcome = degraded_outcome(&inquiry);
        assert_eq!(outcome.email, "someone@example.com");
        assert_eq!(outcome.category, Category::GeneralInquiry);
        assert!(!outcome.processing_id.is_empty());
    }
}
