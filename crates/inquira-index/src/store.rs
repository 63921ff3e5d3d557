// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed listing chunk store with vector BLOB storage.
//!
//! All access goes through tokio-rusqlite's single background thread, so the
//! store is safe for concurrent read-only use from any number of tasks.

use inquira_core::InquiraError;
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::types::{blob_to_vec, vec_to_blob, NewChunk};

/// Helper to convert tokio_rusqlite errors into InquiraError::Storage.
fn storage_err(e: tokio_rusqlite::Error) -> InquiraError {
    InquiraError::Storage {
        source: Box::new(e),
    }
}

/// Persistent store for listing chunks in SQLite.
///
/// Stores embeddings as little-endian f32 BLOBs alongside the listing
/// metadata carried into retrieval results.
pub struct ListingStore {
    conn: Connection,
}

impl ListingStore {
    /// Opens (creating if needed) the store at the given path and applies
    /// the chunk schema.
    pub async fn open(path: &str) -> Result<Self, InquiraError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| InquiraError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = Connection::open(path.to_owned())
            .await
            .map_err(|e| storage_err(e.into()))?;
        conn.call(|conn| {
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS listing_chunks (
                     id INTEGER PRIMARY KEY AUTOINCREMENT,
                     listing_id TEXT NOT NULL,
                     city TEXT NOT NULL DEFAULT '',
                     price REAL,
                     bedrooms INTEGER,
                     bathrooms REAL,
                     content TEXT NOT NULL,
                     embedding BLOB NOT NULL
                 );
                 CREATE INDEX IF NOT EXISTS idx_listing_chunks_listing_id
                     ON listing_chunks(listing_id);",
            )?;
            Ok(())
        })
        .await
        .map_err(storage_err)?;

        debug!(path, "listing store opened");
        Ok(Self { conn })
    }

    /// Insert a batch of chunks in one transaction.
    pub async fn insert_chunks(&self, chunks: Vec<NewChunk>) -> Result<usize, InquiraError> {
        let count = chunks.len();
        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO listing_chunks
                             (listing_id, city, price, bedrooms, bathrooms, content, embedding)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    )?;
                    for chunk in &chunks {
                        stmt.execute(rusqlite::params![
                            chunk.listing_id,
                            chunk.city,
                            chunk.price,
                            chunk.bedrooms,
                            chunk.bathrooms,
                            chunk.content,
                            vec_to_blob(&chunk.embedding),
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(storage_err)?;
        Ok(count)
    }

    /// Get all chunk embeddings (lightweight -- no content).
    ///
    /// Returns (rowid, embedding) pairs in rowid order for vector search.
    pub async fn all_embeddings(&self) -> Result<Vec<(i64, Vec<f32>)>, InquiraError> {
        self.conn
            .call(|conn| {
                let mut stmt =
                    conn.prepare("SELECT id, embedding FROM listing_chunks ORDER BY id ASC")?;
                let results = stmt
                    .query_map([], |row| {
                        let id: i64 = row.get(0)?;
                        let blob: Vec<u8> = row.get(1)?;
                        Ok((id, blob_to_vec(&blob)))
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(results)
            })
            .await
            .map_err(storage_err)
    }

    /// Fetch full chunk rows by rowid, preserving the requested order.
    pub async fn chunks_by_ids(
        &self,
        ids: &[i64],
    ) -> Result<Vec<(i64, ChunkRow)>, InquiraError> {
        let ids = ids.to_vec();
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, listing_id, city, price, bedrooms, bathrooms, content
                     FROM listing_chunks WHERE id = ?1",
                )?;
                let mut rows = Vec::with_capacity(ids.len());
                for id in &ids {
                    let row = stmt
                        .query_row(rusqlite::params![id], |row| {
                            Ok((
                                row.get::<_, i64>(0)?,
                                ChunkRow {
                                    listing_id: row.get(1)?,
                                    city: row.get(2)?,
                                    price: row.get(3)?,
                                    bedrooms: row.get(4)?,
                                    bathrooms: row.get(5)?,
                                    content: row.get(6)?,
                                },
                            ))
                        })
                        .optional()?;
                    if let Some(row) = row {
                        rows.push(row);
                    }
                }
                Ok(rows)
            })
            .await
            .map_err(storage_err)
    }

    /// Number of stored chunks.
    pub async fn count(&self) -> Result<i64, InquiraError> {
        self.conn
            .call(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM listing_chunks", [], |row| row.get(0))?;
                Ok(count)
            })
            .await
            .map_err(storage_err)
    }
}

/// A full chunk row without its embedding.
#[derive(Debug, Clone)]
pub struct ChunkRow {
    pub listing_id: String,
    pub city: String,
    pub price: Option<f64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<f64>,
    pub content: String,
}
