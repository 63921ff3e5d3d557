// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration error diagnostics rendered through miette.
//!
//! Figment deserialization errors are converted into [`ConfigError`]s so the
//! binary can render every problem at once instead of failing on the first.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error with diagnostic metadata.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The configuration failed to parse or deserialize.
    #[error("configuration parse error: {message}")]
    #[diagnostic(
        code(inquira::config::parse),
        help("check inquira.toml against the documented sections and key names")
    )]
    Parse {
        /// Figment's description of the failure.
        message: String,
    },

    /// A validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(inquira::config::validation))]
    Validation {
        /// Description of the invalid value.
        message: String,
    },
}

/// Convert a figment error (which may aggregate several failures) into
/// one [`ConfigError::Parse`] per underlying failure.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::Parse {
            message: e.to_string(),
        })
        .collect()
}

/// Render all collected configuration errors to stderr via miette.
pub fn render_errors(errors: &[ConfigError]) {
    eprintln!(
        "error: invalid configuration ({} problem{})",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    );
    for error in errors {
        let report = miette::Report::msg(error.to_string());
        eprintln!("{report:?}");
    }
}
