// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retriever trait for the listing context index.

use async_trait::async_trait;

use crate::error::InquiraError;
use crate::traits::adapter::ServiceAdapter;
use crate::types::ScoredChunk;

/// Adapter for nearest-neighbor retrieval over stored listing chunks.
///
/// Read-only and safe for concurrent use after one-time initialization.
/// Calling [`retrieve`] before the index is initialized fails with
/// [`InquiraError::Uninitialized`].
///
/// [`retrieve`]: ListingRetriever::retrieve
/// [`InquiraError::Uninitialized`]: crate::error::InquiraError::Uninitialized
#[async_trait]
pub trait ListingRetriever: ServiceAdapter {
    /// Returns at most K chunks ranked by descending similarity to the query.
    ///
    /// Ordering is stable under identical inputs and index state.
    async fn retrieve(&self, query: &str) -> Result<Vec<ScoredChunk>, InquiraError>;
}
