// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Inquira inquiry assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Inquira configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InquiraConfig {
    /// Assistant identity and logging settings.
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// OpenAI API settings (completions and embeddings).
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Listing index and retrieval settings.
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Outbound email notification settings.
    #[serde(default)]
    pub email: EmailConfig,

    /// Inquiry history storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Batch processing settings.
    #[serde(default)]
    pub batch: BatchConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Assistant identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssistantConfig {
    /// Display name of the assistant.
    #[serde(default = "default_assistant_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: default_assistant_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_assistant_name() -> String {
    "inquira".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// OpenAI API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// OpenAI API key. `None` requires the environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Default model for completion requests.
    #[serde(default = "default_model")]
    pub model: String,

    /// Model for embedding requests.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Sampling temperature for completion requests.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            embedding_model: default_embedding_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}

fn default_temperature() -> f64 {
    0.3
}

fn default_max_tokens() -> u32 {
    1024
}

/// Listing index and retrieval configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetrievalConfig {
    /// Path to the SQLite listing index file.
    #[serde(default = "default_index_path")]
    pub index_path: String,

    /// Maximum number of chunks returned per retrieval (K).
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Minimum cosine similarity for a chunk to be returned (0.0-1.0).
    #[serde(default = "default_similarity_floor")]
    pub similarity_floor: f64,

    /// Maximum characters per ingested chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlapping characters between adjacent chunks.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            max_results: default_max_results(),
            similarity_floor: default_similarity_floor(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

fn default_index_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("inquira").join("listings.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("listings.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_max_results() -> usize {
    5
}

fn default_similarity_floor() -> f64 {
    0.0
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    100
}

/// Outbound email notification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmailConfig {
    /// Enable outbound notifications. When false, the notifier is a silent no-op.
    #[serde(default = "default_email_enabled")]
    pub enabled: bool,

    /// SMTP relay hostname.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP relay port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username. Required when enabled.
    #[serde(default)]
    pub username: Option<String>,

    /// SMTP password. Required when enabled.
    #[serde(default)]
    pub password: Option<String>,

    /// Display name on the From header.
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// From address. Required when enabled.
    #[serde(default)]
    pub from_address: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: default_email_enabled(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            username: None,
            password: None,
            from_name: default_from_name(),
            from_address: None,
        }
    }
}

fn default_email_enabled() -> bool {
    true
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_name() -> String {
    "Inquira Real Estate".to_string()
}

/// Inquiry history storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite inquiry-history database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("inquira").join("inquira.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("inquira.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Batch processing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    /// Fan-out mode: "pooled" (bounded worker pool with a sequential
    /// threshold) or "concurrent" (all items launched at once).
    #[serde(default = "default_batch_mode")]
    pub mode: String,

    /// Batches at or below this size are processed sequentially in pooled mode.
    #[serde(default = "default_sequential_threshold")]
    pub sequential_threshold: usize,

    /// Maximum concurrently processing inquiries in pooled mode.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Per-inquiry timeout in seconds; a timed-out item yields a degraded outcome.
    #[serde(default = "default_item_timeout_secs")]
    pub item_timeout_secs: u64,

    /// Maximum inquiries accepted in one batch submission.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            mode: default_batch_mode(),
            sequential_threshold: default_sequential_threshold(),
            max_concurrency: default_max_concurrency(),
            item_timeout_secs: default_item_timeout_secs(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

fn default_batch_mode() -> String {
    "pooled".to_string()
}

fn default_sequential_threshold() -> usize {
    5
}

fn default_max_concurrency() -> usize {
    5
}

fn default_item_timeout_secs() -> u64 {
    30
}

fn default_max_batch_size() -> usize {
    100
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8000
}
