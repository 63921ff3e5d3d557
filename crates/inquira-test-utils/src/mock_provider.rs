// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `CompletionProvider` with pre-configured
//! responses, enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use inquira_core::types::{
    AdapterType, CompletionRequest, CompletionResponse, HealthStatus, TokenUsage,
};
use inquira_core::{CompletionProvider, InquiraError, ServiceAdapter};

/// A mock completion provider that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty, a
/// default "mock response" text is returned. Prompts containing any
/// registered failure marker fail with a provider error instead, which lets
/// tests break a single pipeline stage (each stage's template carries a
/// distinctive phrase).
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<String>>>,
    failure_markers: Arc<Mutex<Vec<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            failure_markers: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        let provider = Self::new();
        *provider.responses.try_lock().expect("fresh mutex") = VecDeque::from(responses);
        provider
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: String) {
        self.responses.lock().await.push_back(text);
    }

    /// Fail any completion whose prompt contains `marker`.
    pub async fn fail_when_prompt_contains(&self, marker: String) {
        self.failure_markers.lock().await.push(marker);
    }

    /// All prompts received so far, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    /// Pop the next response, or return the default.
    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
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
impl CompletionProvider for MockProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, InquiraError> {
        self.prompts.lock().await.push(request.prompt.clone());

        let markers = self.failure_markers.lock().await.clone();
        if let Some(marker) = markers.iter().find(|m| request.prompt.contains(m.as_str())) {
            return Err(InquiraError::Provider {
                message: format!("mock failure for marker `{marker}`"),
                source: None,
            });
        }

        let text = self.next_response().await;
        Ok(CompletionResponse {
            id: format!("mock-resp-{}", uuid::Uuid::new_v4()),
            content: text,
            model: request.model,
            usage: Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 20,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str) -> CompletionRequest {
        CompletionRequest {
            model: "test-model".to_string(),
            prompt: prompt.to_string(),
            temperature: 0.3,
            max_tokens: 100,
        }
    }

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let provider = MockProvider::new();
        let resp = provider.complete(request("anything")).await.unwrap();
        assert_eq!(resp.content, "mock response");
    }

    #[tokio::test]
    async fn queued_responses_returned_in_order() {
        let provider = MockProvider::with_responses(vec![
            "first".to_string(),
            "second".to_string(),
            "third".to_string(),
        ]);

        assert_eq!(provider.complete(request("a")).await.unwrap().content, "first");
        assert_eq!(provider.complete(request("b")).await.unwrap().content, "second");
        assert_eq!(provider.complete(request("c")).await.unwrap().content, "third");
        // Queue exhausted, falls back to default
        assert_eq!(
            provider.complete(request("d")).await.unwrap().content,
            "mock response"
        );
    }

    #[tokio::test]
    async fn failure_marker_fails_matching_prompts_only() {
        let provider = MockProvider::with_responses(vec!["ok".to_string()]);
        provider
            .fail_when_prompt_contains("Classify".to_string())
            .await;

        let err = provider
            .complete(request("Classify the following"))
            .await
            .unwrap_err();
        assert!(matches!(err, InquiraError::Provider { .. }));

        let resp = provider.complete(request("expand this")).await.unwrap();
        assert_eq!(resp.content, "ok");
    }

    #[tokio::test]
    async fn prompts_are_recorded_in_order() {
        let provider = MockProvider::new();
        provider.complete(request("one")).await.unwrap();
        provider.complete(request("two")).await.unwrap();
        assert_eq!(provider.prompts().await, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn add_response_after_construction() {
        let provider = MockProvider::new();
        provider.add_response("dynamic response".to_string()).await;
        assert_eq!(
            provider.complete(request("x")).await.unwrap().content,
            "dynamic response"
        );
    }
}
