// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as required SMTP credentials when email is enabled and
//! sane batch bounds.

use crate::diagnostic::ConfigError;
use crate::model::InquiraConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &InquiraConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Email notifications need a complete SMTP identity when enabled.
    if config.email.enabled {
        if config.email.username.is_none() {
            errors.push(ConfigError::Validation {
                message: "email.username is required when email.enabled = true".to_string(),
            });
        }
        if config.email.password.is_none() {
            errors.push(ConfigError::Validation {
                message: "email.password is required when email.enabled = true".to_string(),
            });
        }
        if config.email.from_address.is_none() {
            errors.push(ConfigError::Validation {
                message: "email.from_address is required when email.enabled = true".to_string(),
            });
        }
        if config.email.smtp_host.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "email.smtp_host must not be empty".to_string(),
            });
        }
    }

    // Paths must be non-empty.
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }
    if config.retrieval.index_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "retrieval.index_path must not be empty".to_string(),
        });
    }

    // Retrieval bounds.
    if config.retrieval.max_results == 0 {
        errors.push(ConfigError::Validation {
            message: "retrieval.max_results must be at least 1".to_string(),
        });
    }
    if !(0.0..=1.0).contains(&config.retrieval.similarity_floor) {
        errors.push(ConfigError::Validation {
            message: format!(
                "retrieval.similarity_floor must be in 0.0..=1.0, got {}",
                config.retrieval.similarity_floor
            ),
        });
    }
    if config.retrieval.chunk_overlap >= config.retrieval.chunk_size {
        errors.push(ConfigError::Validation {
            message: format!(
                "retrieval.chunk_overlap ({}) must be smaller than retrieval.chunk_size ({})",
                config.retrieval.chunk_overlap, config.retrieval.chunk_size
            ),
        });
    }

    // Sampling temperature per the provider's accepted range.
    if !(0.0..=2.0).contains(&config.openai.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "openai.temperature must be in 0.0..=2.0, got {}",
                config.openai.temperature
            ),
        });
    }

    // Batch bounds.
    match config.batch.mode.as_str() {
        "pooled" | "concurrent" => {}
        other => errors.push(ConfigError::Validation {
            message: format!(
                "batch.mode must be `pooled` or `concurrent`, got `{other}`"
            ),
        }),
    }
    if config.batch.max_concurrency == 0 {
        errors.push(ConfigError::Validation {
            message: "batch.max_concurrency must be at least 1".to_string(),
        });
    }
    if config.batch.item_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "batch.item_timeout_secs must be at least 1".to_string(),
        });
    }
    if config.batch.max_batch_size == 0 {
        errors.push(ConfigError::Validation {
            message: "batch.max_batch_size must be at least 1".to_string(),
        });
    }

    // Gateway bind host.
    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
