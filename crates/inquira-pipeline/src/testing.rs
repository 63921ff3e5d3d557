// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crate-internal stubs for processor and batch tests.
//!
//! The stub provider routes on distinctive phrases in each rendered
//! template, so per-stage failures can be injected independently.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use inquira_config::model::OpenAiConfig;
use inquira_core::types::{
    AdapterType, CompletionRequest, CompletionResponse, HealthStatus, Inquiry, NotifyStatus,
    ScoredChunk,
};
use inquira_core::{
    CompletionProvider, InquiraError, ListingRetriever, Notifier, ServiceAdapter,
};

use crate::gateway::LmGateway;
use crate::processor::InquiryProcessor;

/// Scripted behavior for the stub provider/retriever/notifier set.
#[derive(Debug, Clone, Default)]
pub struct StubBehavior {
    /// Fixed expansion output (default: "expanded query").
    pub expand: Option<String>,
    /// Fixed categorization output (default: "General Inquiry").
    pub categorize: Option<String>,
    /// Fixed answer output (default: "stub answer").
    pub answer: Option<String>,
    /// Return the full rendered answer prompt instead of `answer`.
    pub echo_answer_prompt: bool,
    pub fail_expand: bool,
    pub fail_categorize: bool,
    pub fail_answer: bool,
    pub fail_retrieval: bool,
    pub fail_notify: bool,
    pub disable_notify: bool,
    /// Panic on any call whose prompt contains this marker.
    pub panic_marker: Option<String>,
    /// Sleep on any call whose prompt contains this marker.
    pub slow_marker: Option<String>,
    /// How long slow-marker calls sleep (default 5s).
    pub slow_duration: Option<Duration>,
}

/// Completion provider stub driven by [`StubBehavior`].
pub struct StubProvider {
    behavior: StubBehavior,
}

fn provider_err(stage: &str) -> InquiraError {
    InquiraError::Provider {
        message: format!("stub {stage} failure"),
        source: None,
    }
}

#[async_trait]
impl ServiceAdapter for StubProvider {
    fn name(&self) -> &str {
        "stub-provider"
    }
    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }
    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }
    async fn health_check(&self) -> Result<HealthStatus, InquiraError> {
        Ok(HealthStatus::Healthy)
    }
    async fn shutdown(&self) -> Result<(), InquiraError> {
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, InquiraError> {
        let prompt = &request.prompt;

        if let Some(marker) = &self.behavior.panic_marker
            && prompt.contains(marker)
        {
            panic!("stub provider panic for marker {marker}");
        }
        if let Some(marker) = &self.behavior.slow_marker
            && prompt.contains(marker)
        {
            let nap = self
                .behavior
                .slow_duration
                .unwrap_or(Duration::from_secs(5));
            tokio::time::sleep(nap).await;
        }

        let content = if prompt.contains("clarify and expand") {
            if self.behavior.fail_expand {
                return Err(provider_err("expand"));
            }
            self.behavior
                .expand
                .clone()
                .unwrap_or_else(|| "expanded query".to_string())
        } else if prompt.contains("Classify the following real estate inquiry") {
            if self.behavior.fail_categorize {
                return Err(provider_err("categorize"));
            }
            self.behavior
                .categorize
                .clone()
                .unwrap_or_else(|| "General Inquiry".to_string())
        } else {
            if self.behavior.fail_answer {
                return Err(provider_err("answer"));
            }
            if self.behavior.echo_answer_prompt {
                prompt.clone()
            } else {
                self.behavior
                    .answer
                    .clone()
                    .unwrap_or_else(|| "stub answer".to_string())
            }
        };

        Ok(CompletionResponse {
            id: "stub-1".into(),
            content,
            model: request.model,
            usage: None,
        })
    }
}

/// Retriever stub returning one fixed Seattle chunk.
pub struct StubRetriever {
    fail: bool,
}

#[async_trait]
impl ServiceAdapter for StubRetriever {
    fn name(&self) -> &str {
        "stub-retriever"
    }
    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }
    fn adapter_type(&self) -> AdapterType {
        AdapterType::Retrieval
    }
    async fn health_check(&self) -> Result<HealthStatus, InquiraError> {
        Ok(HealthStatus::Healthy)
    }
    async fn shutdown(&self) -> Result<(), InquiraError> {
        Ok(())
    }
}

#[async_trait]
impl ListingRetriever for StubRetriever {
    async fn retrieve(&self, _query: &str) -> Result<Vec<ScoredChunk>, InquiraError> {
        if self.fail {
            return Err(InquiraError::uninitialized("listing index"));
        }
        Ok(vec![ScoredChunk {
            content: "Sunny Craftsman near the park".into(),
            listing_id: "L-1".into(),
            city: "Seattle".into(),
            price: Some(475_000.0),
            bedrooms: Some(3),
            bathrooms: Some(2.0),
            score: 0.92,
        }])
    }
}

/// Notifier stub with delivery counters.
pub struct StubNotifier {
    disabled: bool,
    fail: bool,
    attempts: AtomicUsize,
    sent: Mutex<Vec<(String, String, String)>>,
}

impl StubNotifier {
    /// Messages handed to the transport as (to, subject, body).
    pub fn sent(&self) -> Vec<(String, String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Delivery attempts, successful or not. Disabled calls never count.
    pub fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServiceAdapter for StubNotifier {
    fn name(&self) -> &str {
        "stub-notifier"
    }
    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }
    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifier
    }
    async fn health_check(&self) -> Result<HealthStatus, InquiraError> {
        Ok(HealthStatus::Healthy)
    }
    async fn shutdown(&self) -> Result<(), InquiraError> {
        Ok(())
    }
}

#[async_trait]
impl Notifier for StubNotifier {
    async fn notify(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<NotifyStatus, InquiraError> {
        if self.disabled {
            return Ok(NotifyStatus::Disabled);
        }
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(InquiraError::Notification {
                message: "stub delivery failure".into(),
                source: None,
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(NotifyStatus::Sent)
    }
}

/// Build a processor over the stub set with default model parameters.
pub fn test_processor(behavior: StubBehavior) -> (Arc<InquiryProcessor>, Arc<StubNotifier>) {
    test_processor_with_config(behavior, &OpenAiConfig::default())
}

/// Build a processor over the stub set with explicit model parameters.
pub fn test_processor_with_config(
    behavior: StubBehavior,
    config: &OpenAiConfig,
) -> (Arc<InquiryProcessor>, Arc<StubNotifier>) {
    let notifier = Arc::new(StubNotifier {
        disabled: behavior.disable_notify,
        fail: behavior.fail_notify,
        attempts: AtomicUsize::new(0),
        sent: Mutex::new(Vec::new()),
    });
    let retriever = Arc::new(StubRetriever {
        fail: behavior.fail_retrieval,
    });
    let provider = Arc::new(StubProvider { behavior });
    let gateway = LmGateway::new(provider, config);
    let processor = Arc::new(InquiryProcessor::new(gateway, retriever, notifier.clone()));
    (processor, notifier)
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
