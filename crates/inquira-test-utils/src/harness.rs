// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end test harness: processor + batch runners over mock adapters
//! and a temp-file SQLite recorder.

use std::sync::Arc;

use inquira_config::model::{BatchConfig, OpenAiConfig, StorageConfig};
use inquira_core::types::{Inquiry, InquiryOutcome, ScoredChunk};
use inquira_core::{InquiraError, InquiryRecorder};
use inquira_pipeline::{InquiryProcessor, LmGateway};
use inquira_storage::SqliteRecorder;

use crate::mock_provider::MockProvider;
use crate::mocks::{MockNotifier, MockRetriever};

/// A fully wired pipeline over mocks, with isolated temp storage.
pub struct TestHarness {
    pub processor: Arc<InquiryProcessor>,
    pub recorder: Arc<SqliteRecorder>,
    pub provider: Arc<MockProvider>,
    pub notifier: Arc<MockNotifier>,
    pub batch_config: BatchConfig,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::default()
    }

    /// Process one inquiry and record it, mirroring the serving path.
    pub async fn process_and_record(
        &self,
        inquiry: &Inquiry,
    ) -> Result<InquiryOutcome, InquiraError> {
        let outcome = self.processor.process(inquiry).await;
        self.recorder.record(inquiry, &outcome).await?;
        Ok(outcome)
    }
}

/// Builder for [`TestHarness`].
#[derive(Default)]
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    failure_markers: Vec<String>,
    notifier_disabled: bool,
    notifier_failing: bool,
    retriever_chunks: Option<Vec<ScoredChunk>>,
    retriever_failing: bool,
}

impl TestHarnessBuilder {
    /// Queue scripted completions (three per inquiry: expand, categorize,
    /// answer).
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Fail any completion whose prompt contains `marker`.
    pub fn with_failure_marker(mut self, marker: impl Into<String>) -> Self {
        self.failure_markers.push(marker.into());
        self
    }

    /// Fail only the categorization stage (its template's marker phrase).
    pub fn with_failing_categorization(self) -> Self {
        self.with_failure_marker("Classify the following real estate inquiry")
    }

    /// Fail only the expansion stage.
    pub fn with_failing_expansion(self) -> Self {
        self.with_failure_marker("clarify and expand")
    }

    pub fn with_notifier_disabled(mut self) -> Self {
        self.notifier_disabled = true;
        self
    }

    pub fn with_notifier_failing(mut self) -> Self {
        self.notifier_failing = true;
        self
    }

    pub fn with_retriever_chunks(mut self, chunks: Vec<ScoredChunk>) -> Self {
        self.retriever_chunks = Some(chunks);
        self
    }

    pub fn with_retriever_failing(mut self) -> Self {
        self.retriever_failing = true;
        self
    }

    pub async fn build(self) -> Result<TestHarness, InquiraError> {
        let temp_dir = tempfile::TempDir::new().map_err(|e| InquiraError::Storage {
            source: Box::new(e),
        })?;

        let recorder = Arc::new(SqliteRecorder::new(StorageConfig {
            database_path: temp_dir
                .path()
                .join("harness.db")
                .to_string_lossy()
                .into_owned(),
            wal_mode: true,
        }));
        recorder.initialize().await?;

        let provider = Arc::new(MockProvider::with_responses(self.responses));
        for marker in self.failure_markers {
            provider.fail_when_prompt_contains(marker).await;
        }

        let notifier = Arc::new(if self.notifier_disabled {
            MockNotifier::disabled()
        } else if self.notifier_failing {
            MockNotifier::failing()
        } else {
            MockNotifier::new()
        });

        let retriever = Arc::new(if self.retriever_failing {
            MockRetriever::failing()
        } else {
            match self.retriever_chunks {
                Some(chunks) => MockRetriever::with_chunks(chunks),
                None => MockRetriever::new(),
            }
        });

        let gateway = LmGateway::new(provider.clone(), &OpenAiConfig::default());
        let processor = Arc::new(InquiryProcessor::new(
            gateway,
            retriever,
            notifier.clone(),
        ));

        Ok(TestHarness {
            processor,
            recorder,
            provider,
            notifier,
            batch_config: BatchConfig::default(),
            _temp_dir: temp_dir,
        })
    }
}

/// An inquiry with fixed identity fields and the given message.
pub fn make_inquiry(message: &str) -> Inquiry {
    make_inquiry_for("buyer@example.com", message)
}

/// An inquiry with the given email and message.
pub fn make_inquiry_for(email: &str, message: &str) -> Inquiry {
    Inquiry {
        listing_id: "L-1".into(),
        name: "Test Buyer".into(),
        email: email.into(),
        message: message.into(),
        phone: None,
        submitted_at: None,
    }
}
