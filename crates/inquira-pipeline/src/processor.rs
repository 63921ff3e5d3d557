// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The inquiry processing state machine.
//!
//! Strictly sequential stages -- expand, categorize, answer, notify,
//! finalize -- each with an explicit fallback, so no stage failure is fatal.
//! [`InquiryProcessor::process`] is infallible: every inquiry yields exactly
//! one [`InquiryOutcome`].

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use inquira_core::types::{Category, Inquiry, InquiryOutcome, NotifyStatus, ScoredChunk};
use inquira_core::{InquiraError, ListingRetriever, Notifier};

use crate::gateway::LmGateway;
use crate::templates::TemplateId;

/// Fallback response when answer generation or retrieval fails.
pub const FALLBACK_RESPONSE: &str = "I apologize, but I'm having trouble processing your \
    inquiry right now. Please try again later or contact our support team directly.";

/// Fallback response when an unexpected error escapes the stage sequence.
pub const ERROR_FALLBACK_RESPONSE: &str = "I apologize, but I encountered an error \
    processing your inquiry. Please try again later.";

/// Processes one inquiry through the full stage sequence.
pub struct InquiryProcessor {
    gateway: LmGateway,
    retriever: Arc<dyn ListingRetriever>,
    notifier: Arc<dyn Notifier>,
}

impl InquiryProcessor {
    /// Creates a processor over the injected service seams.
    pub fn new(
        gateway: LmGateway,
        retriever: Arc<dyn ListingRetriever>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            retriever,
            notifier,
        }
    }

    /// Process an inquiry to exactly one outcome.
    ///
    /// Stage failures degrade via per-stage fallbacks; anything that still
    /// escapes is caught here and yields an outcome with the `Unknown`
    /// sentinel category and a generic apology.
    pub async fn process(&self, inquiry: &Inquiry) -> InquiryOutcome {
        match self.run(inquiry).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    email = inquiry.email.as_str(),
                    error = %e,
                    "unexpected error processing inquiry"
                );
                finalize(inquiry, Category::Unknown, ERROR_FALLBACK_RESPONSE.to_string())
            }
        }
    }

    /// The stage sequence behind the outer guard.
    async fn run(&self, inquiry: &Inquiry) -> Result<InquiryOutcome, InquiraError> {
        info!(
            email = inquiry.email.as_str(),
            listing_id = inquiry.listing_id.as_str(),
            "processing inquiry"
        );

        let expanded = self.expand(&inquiry.message).await;
        let category = self.categorize(&inquiry.message).await;
        let response = self.answer(category, &expanded).await;
        self.notify(inquiry, category, &response).await;

        Ok(finalize(inquiry, category, response))
    }

    /// Stage 1: expand the raw message into a richer search query.
    ///
    /// Falls back to the raw message verbatim on any provider failure or
    /// empty output.
    async fn expand(&self, message: &str) -> String {
        match self
            .gateway
            .complete(TemplateId::ExpandQuery, &[("message", message)])
            .await
        {
            Ok(expanded) if !expanded.is_empty() => {
                debug!(expanded = expanded.as_str(), "query expanded");
                expanded
            }
            Ok(_) => {
                warn!("query expansion returned empty output, using original query");
                message.to_string()
            }
            Err(e) => {
                warn!(error = %e, "query expansion failed, using original query");
                message.to_string()
            }
        }
    }

    /// Stage 2: classify the RAW message into a canonical category.
    ///
    /// Any transport error, empty output, or non-matching output falls back
    /// to `General Inquiry`.
    async fn categorize(&self, message: &str) -> Category {
        match self
            .gateway
            .complete(TemplateId::Categorize, &[("message", message)])
            .await
        {
            Ok(raw) => match Category::canonicalize(&raw) {
                Some(category) => {
                    info!(category = %category, "inquiry categorized");
                    category
                }
                None => {
                    warn!(raw = raw.as_str(), "unrecognized category output, using fallback");
                    Category::GeneralInquiry
                }
            },
            Err(e) => {
                error!(error = %e, "categorization failed");
                Category::GeneralInquiry
            }
        }
    }

    /// Stage 3: retrieval-augmented answer generation for the EXPANDED query.
    ///
    /// On retrieval or generation failure, substitutes the apology fallback.
    async fn answer(&self, category: Category, expanded: &str) -> String {
        let context = match self.retriever.retrieve(expanded).await {
            Ok(chunks) => format_context(&chunks),
            Err(e) => {
                error!(error = %e, "context retrieval failed");
                return FALLBACK_RESPONSE.to_string();
            }
        };

        match self
            .gateway
            .complete(
                TemplateId::Respond(category),
                &[("context", context.as_str()), ("question", expanded)],
            )
            .await
        {
            Ok(response) if !response.is_empty() => {
                info!("response generated");
                response
            }
            Ok(_) => {
                error!("response generation returned empty output");
                FALLBACK_RESPONSE.to_string()
            }
            Err(e) => {
                error!(error = %e, "response generation failed");
                FALLBACK_RESPONSE.to_string()
            }
        }
    }

    /// Stage 4: deliver the response to the inquirer.
    ///
    /// Disabled is a silent no-op; failure is logged and swallowed.
    async fn notify(&self, inquiry: &Inquiry, category: Category, response: &str) {
        let subject = format!("Re: Your Real Estate Inquiry - {category}");
        match self
            .notifier
            .notify(&inquiry.email, &subject, response)
            .await
        {
            Ok(NotifyStatus::Sent) => {
                info!(email = inquiry.email.as_str(), "notification sent");
            }
            Ok(NotifyStatus::Disabled) => {
                debug!("notifications disabled, skipping delivery");
            }
            Err(e) => {
                error!(
                    email = inquiry.email.as_str(),
                    error = %e,
                    "failed to send notification"
                );
            }
        }
    }
}

/// Stage 5: build the outcome with a fresh processing id and timestamp.
fn finalize(inquiry: &Inquiry, category: Category, response: String) -> InquiryOutcome {
    InquiryOutcome {
        email: inquiry.email.clone(),
        category,
        response,
        email_title: None,
        email_body: None,
        processing_id: uuid::Uuid::new_v4().to_string(),
        processed_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Format retrieved chunks into the context block given to the model.
fn format_context(chunks: &[ScoredChunk]) -> String {
    if chunks.is_empty() {
        return "No matching listings found.".to_string();
    }
    chunks
        .iter()
        .map(|chunk| {
            let mut details = vec![format!("listing {}", chunk.listing_id)];
            if !chunk.city.is_empty() {
                details.push(chunk.city.clone());
            }
            if let Some(price) = chunk.price {
                details.push(format!("${price:.0}"));
            }
            if let Some(bedrooms) = chunk.bedrooms {
                details.push(format!("{bedrooms} bd"));
            }
            if let Some(bathrooms) = chunk.bathrooms {
                details.push(format!("{bathrooms} ba"));
            }
            format!("- {} [{}]", chunk.content.trim(), details.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
