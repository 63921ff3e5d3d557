// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI API.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! authentication, and transient error retry for the chat-completions and
//! embeddings endpoints.

use std::time::Duration;

use inquira_core::InquiraError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{
    ApiErrorResponse, ChatRequest, ChatResponse, EmbeddingsRequest, EmbeddingsResponse,
};

/// Base URL for the OpenAI API.
const API_BASE_URL: &str = "https://api.openai.com/v1";

/// HTTP client for OpenAI API communication.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    max_retries: u32,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new OpenAI API client authenticating with the given key.
    pub fn new(api_key: &str) -> Result<Self, InquiraError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            InquiraError::Config(format!("invalid API key header value: {e}"))
        })?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| InquiraError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            max_retries: 1,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a chat-completion request and returns the full response.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    pub async fn chat_completion(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatResponse, InquiraError> {
        let url = format!("{}/chat/completions", self.base_url);
        self.post_json(&url, request, "completion").await
    }

    /// Sends an embeddings request and returns the full response.
    ///
    /// Same transient-retry policy as [`chat_completion`].
    ///
    /// [`chat_completion`]: OpenAiClient::chat_completion
    pub async fn embeddings(
        &self,
        request: &EmbeddingsRequest,
    ) -> Result<EmbeddingsResponse, InquiraError> {
        let url = format!("{}/embeddings", self.base_url);
        self.post_json(&url, request, "embeddings").await
    }

    /// Shared POST-and-deserialize path with the transient-retry policy.
    async fn post_json<Req, Resp>(
        &self,
        url: &str,
        request: &Req,
        kind: &str,
    ) -> Result<Resp, InquiraError>
    where
        Req: serde::Serialize + Sync,
        Resp: serde::de::DeserializeOwned,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, kind, "retrying request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(url)
                .json(request)
                .send()
                .await
                .map_err(|e| InquiraError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, kind, "response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| InquiraError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                return serde_json::from_str(&body).map_err(|e| InquiraError::Provider {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(InquiraError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let error_msg = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "OpenAI API error ({}): {}",
                    api_err.error.type_, api_err.error.message
                )
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(InquiraError::Provider {
                message: error_msg,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| InquiraError::Provider {
            message: format!("{kind} request failed after retries"),
            source: None,
        }))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
