// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all service adapters must implement.

use async_trait::async_trait;

use crate::error::InquiraError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for all Inquira service adapters.
///
/// Every adapter (provider, retrieval, notifier, storage) implements this
/// trait, which provides identity, health check, and shutdown capabilities.
#[async_trait]
pub trait ServiceAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the type of adapter (provider, retrieval, etc.).
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, InquiraError>;

    /// Gracefully shuts down the adapter, releasing any held resources.
    async fn shutdown(&self) -> Result<(), InquiraError>;
}
