// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./inquira.toml` > `~/.config/inquira/inquira.toml` > `/etc/inquira/inquira.toml`
//! with environment variable overrides via `INQUIRA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::InquiraConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/inquira/inquira.toml` (system-wide)
/// 3. `~/.config/inquira/inquira.toml` (user XDG config)
/// 4. `./inquira.toml` (local directory)
/// 5. `INQUIRA_*` environment variables
pub fn load_config() -> Result<InquiraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(InquiraConfig::default()))
        .merge(Toml::file("/etc/inquira/inquira.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("inquira/inquira.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("inquira.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<InquiraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(InquiraConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<InquiraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(InquiraConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `INQUIRA_OPENAI_API_KEY`
/// must map to `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("INQUIRA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: INQUIRA_EMAIL_SMTP_HOST -> "email_smtp_host"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("assistant_", "assistant.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("retrieval_", "retrieval.", 1)
            .replacen("email_", "email.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("batch_", "batch.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}
