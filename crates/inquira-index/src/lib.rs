// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed listing vector index for Inquira.
//!
//! Stores listing chunks with f32 BLOB embeddings, retrieves the top-K
//! nearest chunks by cosine similarity, and ingests listings CSVs into the
//! index.

pub mod ingest;
pub mod retriever;
pub mod store;
pub mod types;

pub use ingest::{ingest_csv, split_text};
pub use retriever::VectorIndex;
pub use store::{ChunkRow, ListingStore};
pub use types::NewChunk;
