// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait for language-model completion backends.

use async_trait::async_trait;

use crate::error::InquiraError;
use crate::traits::adapter::ServiceAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for language-model completion APIs.
///
/// Stateless per call: the same request may be issued concurrently from
/// any number of tasks. Transport and quota failures surface as
/// [`InquiraError::Provider`]; callers treat them as recoverable and
/// substitute stage-specific fallbacks.
///
/// [`InquiraError::Provider`]: crate::error::InquiraError::Provider
#[async_trait]
pub trait CompletionProvider: ServiceAdapter {
    /// Sends a completion request and returns the full response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, InquiraError>;
}
