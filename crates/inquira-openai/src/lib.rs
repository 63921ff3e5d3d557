// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI provider adapters for Inquira.
//!
//! [`OpenAiProvider`] implements [`CompletionProvider`] over the
//! chat-completions endpoint; [`OpenAiEmbedder`] implements
//! [`EmbeddingProvider`] over the embeddings endpoint. Both share the
//! retrying [`OpenAiClient`] transport.

pub mod client;
pub mod types;

use async_trait::async_trait;
use tracing::debug;

use inquira_config::model::OpenAiConfig;
use inquira_core::types::{
    AdapterType, CompletionRequest, CompletionResponse, EmbeddingInput, EmbeddingOutput,
    HealthStatus, TokenUsage,
};
use inquira_core::{CompletionProvider, EmbeddingProvider, InquiraError, ServiceAdapter};

pub use client::OpenAiClient;
use types::{ChatMessage, ChatRequest, EmbeddingsRequest};

/// Resolve the API key from config or the `OPENAI_API_KEY` environment variable.
fn resolve_api_key(config: &OpenAiConfig) -> Result<String, InquiraError> {
    config
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            InquiraError::Config(
                "OpenAI API key required: set openai.api_key or OPENAI_API_KEY".to_string(),
            )
        })
}

/// Completion provider backed by the OpenAI chat-completions API.
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    /// Creates a provider from configuration.
    pub fn new(config: &OpenAiConfig) -> Result<Self, InquiraError> {
        let api_key = resolve_api_key(config)?;
        Ok(Self {
            client: OpenAiClient::new(&api_key)?,
        })
    }

    /// Creates a provider over an existing client (used by tests).
    pub fn with_client(client: OpenAiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ServiceAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, InquiraError> {
        // The client is stateless; a configured key and built transport is
        // the readiness condition. Request failures surface per call.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), InquiraError> {
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, InquiraError> {
        let chat_request = ChatRequest {
            model: request.model,
            messages: vec![ChatMessage::user(request.prompt)],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self.client.chat_completion(&chat_request).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| InquiraError::Provider {
                message: "API response contained no choices".to_string(),
                source: None,
            })?;

        debug!(
            id = response.id.as_str(),
            model = response.model.as_str(),
            "completion received"
        );

        Ok(CompletionResponse {
            id: response.id,
            content: choice.message.content,
            model: response.model,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            }),
        })
    }
}

/// Embedding provider backed by the OpenAI embeddings API.
pub struct OpenAiEmbedder {
    client: OpenAiClient,
    model: String,
}

impl OpenAiEmbedder {
    /// Creates an embedder from configuration.
    pub fn new(config: &OpenAiConfig) -> Result<Self, InquiraError> {
        let api_key = resolve_api_key(config)?;
        Ok(Self {
            client: OpenAiClient::new(&api_key)?,
            model: config.embedding_model.clone(),
        })
    }

    /// Creates an embedder over an existing client (used by tests).
    pub fn with_client(client: OpenAiClient, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl ServiceAdapter for OpenAiEmbedder {
    fn name(&self) -> &str {
        "openai-embeddings"
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
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, InquiraError> {
        if input.texts.is_empty() {
            return Ok(EmbeddingOutput { embeddings: vec![] });
        }

        let expected = input.texts.len();
        let response = self
            .client
            .embeddings(&EmbeddingsRequest {
                model: self.model.clone(),
                input: input.texts,
            })
            .await?;

        // The API returns vectors with explicit indices; re-assemble in
        // input order rather than trusting response ordering.
        let mut embeddings: Vec<Vec<f32>> = vec![Vec::new(); expected];
        for datum in response.data {
            if datum.index >= expected {
                return Err(InquiraError::Provider {
                    message: format!(
                        "embedding index {} out of range for {expected} inputs",
                        datum.index
                    ),
                    source: None,
                });
            }
            embeddings[datum.index] = datum.embedding;
        }

        if embeddings.iter().any(|e| e.is_empty()) {
            return Err(InquiraError::Provider {
                message: "embeddings response missing vectors for some inputs".to_string(),
                source: None,
            });
        }

        Ok(EmbeddingOutput { embeddings })
    }
}
