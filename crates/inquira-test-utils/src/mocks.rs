// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock retriever, embedder, and notifier adapters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use inquira_core::types::{
    AdapterType, EmbeddingInput, EmbeddingOutput, HealthStatus, NotifyStatus, ScoredChunk,
};
use inquira_core::{
    EmbeddingProvider, InquiraError, ListingRetriever, Notifier, ServiceAdapter,
};

/// A retriever returning a fixed chunk list for every query.
pub struct MockRetriever {
    chunks: Vec<ScoredChunk>,
    fail: bool,
}

impl MockRetriever {
    /// Retriever returning one Seattle listing chunk.
    pub fn new() -> Self {
        Self {
            chunks: vec![ScoredChunk {
                content: "Sunny Craftsman near the park".into(),
                listing_id: "L-1".into(),
                city: "Seattle".into(),
                price: Some(475_000.0),
                bedrooms: Some(3),
                bathrooms: Some(2.0),
                score: 0.92,
            }],
            fail: false,
        }
    }

    /// Retriever returning the given chunks.
    pub fn with_chunks(chunks: Vec<ScoredChunk>) -> Self {
        Self {
            chunks,
            fail: false,
        }
    }

    /// Retriever failing every call as if uninitialized.
    pub fn failing() -> Self {
        Self {
            chunks: Vec::new(),
            fail: true,
        }
    }
}

impl Default for MockRetriever {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceAdapter for MockRetriever {
    fn name(&self) -> &str {
        "mock-retriever"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Retrieval
    }

    async fn health_check(&self) -> Result<HealthStatus, InquiraError> {
        if self.fail {
            Err(InquiraError::uninitialized("listing index"))
        } else {
            Ok(HealthStatus::Healthy)
        }
    }

    async fn shutdown(&self) -> Result<(), InquiraError> {
        Ok(())
    }
}

#[async_trait]
impl ListingRetriever for MockRetriever {
    async fn retrieve(&self, _query: &str) -> Result<Vec<ScoredChunk>, InquiraError> {
        if self.fail {
            return Err(InquiraError::uninitialized("listing index"));
        }
        Ok(self.chunks.clone())
    }
}

/// A deterministic embedder: vectors derive from byte sums, so identical
/// texts embed identically.
pub struct MockEmbedder;

#[async_trait]
impl ServiceAdapter for MockEmbedder {
    fn name(&self) -> &str {
        "mock-embedder"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }

    async fn health_check(&self) -> Result<HealthStatus, InquiraError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), InquiraError> {
        Ok(())
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, InquiraError> {
        let embeddings = input
            .texts
            .iter()
            .map(|text| {
                let sum: u32 = text.bytes().map(u32::from).sum();
                let len = text.len().max(1) as f32;
                vec![(sum % 97) as f32 / 97.0, len / (len + 100.0), 0.5]
            })
            .collect();
        Ok(EmbeddingOutput { embeddings })
    }
}

/// A notifier recording every delivery, with switchable disabled/failing
/// behavior.
pub struct MockNotifier {
    disabled: bool,
    fail: bool,
    attempts: AtomicUsize,
    sent: Mutex<Vec<(String, String, String)>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            disabled: false,
            fail: false,
            attempts: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Notifier disabled by configuration: silent no-op.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::new()
        }
    }

    /// Notifier whose every delivery attempt fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

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

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceAdapter for MockNotifier {
    fn name(&self) -> &str {
        "mock-notifier"
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
impl Notifier for MockNotifier {
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
                message: "mock delivery failure".into(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_retriever_returns_fixed_chunks() {
        let retriever = MockRetriever::new();
        let chunks = retriever.retrieve("anything").await.unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].listing_id, "L-1");
    }

    #[tokio::test]
    async fn failing_retriever_errors() {
        let retriever = MockRetriever::failing();
        assert!(retriever.retrieve("q").await.is_err());
    }

    #[tokio::test]
    async fn mock_embedder_is_deterministic() {
        let embedder = MockEmbedder;
        let a = embedder
            .embed(EmbeddingInput {
                texts: vec!["same text".into()],
            })
            .await
            .unwrap();
        let b = embedder
            .embed(EmbeddingInput {
                texts: vec!["same text".into()],
            })
            .await
            .unwrap();
        assert_eq!(a.embeddings, b.embeddings);
    }

    #[tokio::test]
    async fn disabled_notifier_counts_no_attempts() {
        let notifier = MockNotifier::disabled();
        let status = notifier.notify("a@b.com", "s", "b").await.unwrap();
        assert_eq!(status, NotifyStatus::Disabled);
        assert_eq!(notifier.attempt_count(), 0);
        assert_eq!(notifier.sent_count(), 0);
    }

    #[tokio::test]
    async fn failing_notifier_counts_attempts_but_sends_nothing() {
        let notifier = MockNotifier::failing();
        assert!(notifier.notify("a@b.com", "s", "b").await.is_err());
        assert_eq!(notifier.attempt_count(), 1);
        assert_eq!(notifier.sent_count(), 0);
    }
}
