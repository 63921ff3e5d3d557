// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language-model gateway: render a template, invoke the completion
//! provider, return trimmed text.

use std::sync::Arc;

use tracing::debug;

use inquira_config::model::OpenAiConfig;
use inquira_core::types::CompletionRequest;
use inquira_core::{CompletionProvider, InquiraError};

use crate::templates::{self, TemplateId};

/// Stateless per call gateway in front of a [`CompletionProvider`].
///
/// Carries the model/temperature/token parameters so call sites only name a
/// template and its variables.
pub struct LmGateway {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl LmGateway {
    /// Creates a gateway using the model parameters from configuration.
    pub fn new(provider: Arc<dyn CompletionProvider>, config: &OpenAiConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            temperature: config.temperature as f32,
            max_tokens: config.max_tokens,
        }
    }

    /// Render `template` with `vars` and return the provider's trimmed output.
    pub async fn complete(
        &self,
        template: TemplateId,
        vars: &[(&str, &str)],
    ) -> Result<String, InquiraError> {
        let prompt = templates::render(template, vars);
        let response = self
            .provider
            .complete(CompletionRequest {
                model: self.model.clone(),
                prompt,
                temperature: self.temperature,
                max_tokens: self.max_tokens,
            })
            .await?;

        debug!(template = ?template, model = response.model.as_str(), "template completion received");
        Ok(response.content.trim().to_string())
    }
}
