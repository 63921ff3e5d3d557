// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding trait for vector embedding generation.

use async_trait::async_trait;

use crate::error::InquiraError;
use crate::traits::adapter::ServiceAdapter;
use crate::types::{EmbeddingInput, EmbeddingOutput};

/// Adapter for generating vector embeddings from text.
///
/// Embedding adapters power the listing index: query and chunk texts are
/// converted into vectors compared under cosine similarity.
#[async_trait]
pub trait EmbeddingProvider: ServiceAdapter {
    /// Generates embeddings for the given input, one vector per text.
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, InquiraError>;
}
