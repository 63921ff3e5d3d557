// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vector retriever over the listing chunk store.
//!
//! Embeds the query, cosine-scores it against all stored chunk embeddings,
//! filters by the configured similarity floor, and returns the top K chunks
//! with their listing metadata.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use inquira_config::model::RetrievalConfig;
use inquira_core::types::{AdapterType, EmbeddingInput, HealthStatus, ScoredChunk};
use inquira_core::{EmbeddingProvider, InquiraError, ListingRetriever, ServiceAdapter};

use crate::store::ListingStore;
use crate::types::cosine_similarity;

/// SQLite-backed nearest-neighbor retriever for listing chunks.
///
/// The store is lazily opened on [`initialize`]; retrieval before that
/// fails with [`InquiraError::Uninitialized`]. Ties in similarity break on
/// rowid ascending, so results are stable under identical inputs and index
/// state.
///
/// [`initialize`]: VectorIndex::initialize
/// [`InquiraError::Uninitialized`]: inquira_core::InquiraError::Uninitialized
pub struct VectorIndex {
    config: RetrievalConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    store: OnceCell<ListingStore>,
}

impl VectorIndex {
    /// Create a new index with the given configuration and embedder.
    ///
    /// The backing store is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: VectorIndex::initialize
    pub fn new(config: RetrievalConfig, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            config,
            embedder,
            store: OnceCell::new(),
        }
    }

    /// Opens the backing store, creating the index file and schema if needed.
    pub async fn initialize(&self) -> Result<(), InquiraError> {
        let store = ListingStore::open(&self.config.index_path).await?;
        self.store
            .set(store)
            .map_err(|_| InquiraError::Internal("listing index already initialized".into()))?;
        debug!(path = %self.config.index_path, "listing index initialized");
        Ok(())
    }

    /// Returns a reference to the store, or an error if not initialized.
    fn store(&self) -> Result<&ListingStore, InquiraError> {
        self.store
            .get()
            .ok_or_else(|| InquiraError::uninitialized("listing index"))
    }

    /// Returns the underlying store for ingestion use.
    pub fn ingest_store(&self) -> Result<&ListingStore, InquiraError> {
        self.store()
    }
}

#[async_trait]
impl ServiceAdapter for VectorIndex {
    fn name(&self) -> &str {
        "listing-index"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Retrieval
    }

    async fn health_check(&self) -> Result<HealthStatus, InquiraError> {
        let count = self.store()?.count().await?;
        if count == 0 {
            Ok(HealthStatus::Degraded("index is empty".into()))
        } else {
            Ok(HealthStatus::Healthy)
        }
    }

    async fn shutdown(&self) -> Result<(), InquiraError> {
        Ok(())
    }
}

#[async_trait]
impl ListingRetriever for VectorIndex {
    async fn retrieve(&self, query: &str) -> Result<Vec<ScoredChunk>, InquiraError> {
        let store = self.store()?;

        let output = self
            .embedder
            .embed(EmbeddingInput {
                texts: vec![query.to_string()],
            })
            .await?;
        let query_embedding = output.embeddings.into_iter().next().ok_or_else(|| {
            InquiraError::Internal("embedding returned no results".to_string())
        })?;

        let embeddings = store.all_embeddings().await?;

        let mut scored: Vec<(i64, f32)> = embeddings
            .into_iter()
            .filter_map(|(id, embedding)| {
                if embedding.len() != query_embedding.len() {
                    return None;
                }
                let similarity = cosine_similarity(&query_embedding, &embedding);
                if similarity >= self.config.similarity_floor as f32 {
                    Some((id, similarity))
                } else {
                    None
                }
            })
            .collect();

        // Descending similarity; equal scores keep rowid order for stability.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(self.config.max_results);

        if scored.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<i64> = scored.iter().map(|(id, _)| *id).collect();
        let rows = store.chunks_by_ids(&ids).await?;

        let chunks = rows
            .into_iter()
            .zip(scored.iter())
            .map(|((_, row), (_, score))| ScoredChunk {
                content: row.content,
                listing_id: row.listing_id,
                city: row.city,
                price: row.price,
                bedrooms: row.bedrooms,
                bathrooms: row.bathrooms,
                score: *score,
            })
            .collect();

        Ok(chunks)
    }
}
