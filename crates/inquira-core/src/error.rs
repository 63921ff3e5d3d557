// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Inquira inquiry assistant.

use thiserror::Error;

/// The primary error type used across all Inquira adapter traits and core operations.
#[derive(Debug, Error)]
pub enum InquiraError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Language-model provider errors (API failure, quota, malformed output).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Notification delivery errors (SMTP auth failure, transport failure).
    #[error("notification error: {message}")]
    Notification {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A component was used before its `initialize()` lifecycle step.
    #[error("{component} used before initialization")]
    Uninitialized { component: String },

    /// Malformed inbound data (missing required field, unparseable batch row).
    #[error("validation error: {0}")]
    Validation(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl InquiraError {
    /// Shorthand for an [`InquiraError::Uninitialized`] on the named component.
    pub fn uninitialized(component: &str) -> Self {
        InquiraError::Uninitialized {
            component: component.to_string(),
        }
    }
}
