// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Inquira workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// An inbound customer inquiry about a property listing.
///
/// Immutable once received; consumed exactly once by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inquiry {
    /// Identifier of the listing the inquiry concerns.
    pub listing_id: String,
    /// Inquirer display name.
    pub name: String,
    /// Inquirer email address (also the notification recipient).
    pub email: String,
    /// Free-text inquiry message.
    pub message: String,
    /// Optional inquirer phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Optional ISO 8601 submission timestamp.
    #[serde(default)]
    pub submitted_at: Option<String>,
}

/// The classified intent of an inquiry.
///
/// A closed set: the six canonical customer-facing categories plus an
/// internal `Unknown` sentinel assigned only by the pipeline's outer
/// guard. Display/FromStr round-trip the canonical strings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Category {
    #[strum(serialize = "Price Inquiry")]
    #[serde(rename = "Price Inquiry")]
    PriceInquiry,
    #[strum(serialize = "Availability Check")]
    #[serde(rename = "Availability Check")]
    AvailabilityCheck,
    #[strum(serialize = "Schedule Visit")]
    #[serde(rename = "Schedule Visit")]
    ScheduleVisit,
    #[strum(serialize = "Neighborhood Info")]
    #[serde(rename = "Neighborhood Info")]
    NeighborhoodInfo,
    #[strum(serialize = "Financing Question")]
    #[serde(rename = "Financing Question")]
    FinancingQuestion,
    #[strum(serialize = "General Inquiry")]
    #[serde(rename = "General Inquiry")]
    GeneralInquiry,
    /// Sentinel for pipeline-level failure; never produced by classification.
    #[strum(serialize = "Unknown")]
    #[serde(rename = "Unknown")]
    Unknown,
}

/// The six canonical categories, excluding the `Unknown` sentinel.
pub const CANONICAL_CATEGORIES: [Category; 6] = [
    Category::PriceInquiry,
    Category::AvailabilityCheck,
    Category::ScheduleVisit,
    Category::NeighborhoodInfo,
    Category::FinancingQuestion,
    Category::GeneralInquiry,
];

impl Category {
    /// Canonicalize a model's free-text classification output.
    ///
    /// Policy: trim, exact match against the canonical strings, then
    /// ASCII-case-insensitive match. Returns `None` for anything else --
    /// the raw string is never used as a dispatch key.
    pub fn canonicalize(raw: &str) -> Option<Category> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        CANONICAL_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.to_string() == trimmed)
            .or_else(|| {
                CANONICAL_CATEGORIES
                    .iter()
                    .copied()
                    .find(|c| c.to_string().eq_ignore_ascii_case(trimmed))
            })
    }
}

/// The finalized result of processing one inquiry.
///
/// Exactly one outcome exists per inquiry, regardless of failure mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryOutcome {
    /// Inquirer email address the outcome belongs to.
    pub email: String,
    /// Resolved category (canonical value or the `Unknown` sentinel).
    pub category: Category,
    /// Generated (or fallback) response text.
    pub response: String,
    /// Optional richer email subject, if an email-generation flow filled it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_title: Option<String>,
    /// Optional richer email body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_body: Option<String>,
    /// Unique identifier for this processing invocation.
    pub processing_id: String,
    /// ISO 8601 completion timestamp.
    pub processed_at: String,
}

/// A retrieved listing snippet with metadata and similarity score.
///
/// Ephemeral: used only within one pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    /// Snippet text.
    pub content: String,
    /// Listing identifier the snippet came from.
    pub listing_id: String,
    /// Listing city.
    pub city: String,
    /// Listing price, if known.
    pub price: Option<f64>,
    /// Bedroom count, if known.
    pub bedrooms: Option<i64>,
    /// Bathroom count, if known.
    pub bathrooms: Option<f64>,
    /// Similarity score under the index's distance metric.
    pub score: f32,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Embedding,
    Retrieval,
    Notifier,
    Storage,
}

/// A single-shot completion request to a language-model provider.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier.
    pub model: String,
    /// Fully rendered prompt text.
    pub prompt: String,
    /// Sampling temperature; values above zero are a sanctioned source
    /// of run-to-run output variation.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

/// A completion response from a language-model provider.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Provider-assigned response identifier.
    pub id: String,
    /// Generated text.
    pub content: String,
    /// Model that produced the response.
    pub model: String,
    /// Token usage, if the provider reported it.
    pub usage: Option<TokenUsage>,
}

/// Token usage reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Input for an embedding provider.
#[derive(Debug, Clone)]
pub struct EmbeddingInput {
    /// Texts to embed, one vector per text.
    pub texts: Vec<String>,
}

/// Output from an embedding provider.
#[derive(Debug, Clone)]
pub struct EmbeddingOutput {
    /// One embedding per input text, in input order.
    pub embeddings: Vec<Vec<f32>>,
}

/// Result of a notification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyStatus {
    /// The message was handed to the transport.
    Sent,
    /// Notifications are disabled by configuration; no delivery was attempted.
    Disabled,
}
