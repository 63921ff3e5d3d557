// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Listings CSV ingestion: format each row into a retrieval-friendly
//! paragraph, split into overlapping chunks, embed, and store.

use std::sync::Arc;

use tracing::{info, warn};

use inquira_config::model::RetrievalConfig;
use inquira_core::types::EmbeddingInput;
use inquira_core::{EmbeddingProvider, InquiraError};

use crate::store::ListingStore;
use crate::types::NewChunk;

/// Embedding request batch size during ingestion.
const EMBED_BATCH: usize = 64;

/// A parsed listing row before chunking.
#[derive(Debug, Clone)]
struct ListingRow {
    listing_id: String,
    city: String,
    price: Option<f64>,
    bedrooms: Option<i64>,
    bathrooms: Option<f64>,
    content: String,
}

/// Ingest a listings CSV into the store.
///
/// Rows missing a listing id or otherwise unparseable are skipped with a
/// warning; they never abort the ingest. Returns the number of chunks stored.
pub async fn ingest_csv(
    store: &ListingStore,
    embedder: Arc<dyn EmbeddingProvider>,
    config: &RetrievalConfig,
    csv_text: &str,
) -> Result<usize, InquiraError> {
    let rows = parse_listing_rows(csv_text)?;
    if rows.is_empty() {
        return Err(InquiraError::Validation(
            "no valid listings found in CSV".to_string(),
        ));
    }

    // Chunk every row up front so embedding can run in flat batches.
    let mut pending: Vec<NewChunk> = Vec::new();
    for row in &rows {
        for piece in split_text(&row.content, config.chunk_size, config.chunk_overlap) {
            pending.push(NewChunk {
                listing_id: row.listing_id.clone(),
                city: row.city.clone(),
                price: row.price,
                bedrooms: row.bedrooms,
                bathrooms: row.bathrooms,
                content: piece,
                embedding: Vec::new(),
            });
        }
    }

    let mut stored = 0;
    for batch in pending.chunks_mut(EMBED_BATCH) {
        let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
        let output = embedder.embed(EmbeddingInput { texts }).await?;
        if output.embeddings.len() != batch.len() {
            return Err(InquiraError::Internal(format!(
                "embedder returned {} vectors for {} chunks",
                output.embeddings.len(),
                batch.len()
            )));
        }
        for (chunk, embedding) in batch.iter_mut().zip(output.embeddings) {
            chunk.embedding = embedding;
        }
        stored += store.insert_chunks(batch.to_vec()).await?;
    }

    info!(
        listings = rows.len(),
        chunks = stored,
        "listings CSV ingested"
    );
    Ok(stored)
}

/// Parse listing rows from CSV text, skipping malformed or empty rows.
fn parse_listing_rows(csv_text: &str) -> Result<Vec<ListingRow>, InquiraError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| InquiraError::Validation(format!("unreadable CSV header: {e}")))?
        .clone();
    let col = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let listing_id_col = col("Listing ID");
    let title_col = col("Title");
    let address_col = col("Address");
    let city_col = col("City");
    let state_col = col("State/Province");
    let zip_col = col("ZIP/Postal Code");
    let price_col = col("Price");
    let bedrooms_col = col("Bedrooms");
    let bathrooms_col = col("Bathrooms");
    let sqft_col = col("Square Footage");
    let amenities_col = col("Amenities");

    let field = |record: &csv::StringRecord, idx: Option<usize>| -> String {
        idx.and_then(|i| record.get(i))
            .unwrap_or_default()
            .trim()
            .to_string()
    };

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(line = line + 2, error = %e, "skipping malformed listing row");
                continue;
            }
        };

        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let listing_id = field(&record, listing_id_col);
        if listing_id.is_empty() {
            warn!(line = line + 2, "skipping listing row without Listing ID");
            continue;
        }

        let city = field(&record, city_col);
        let price_s = field(&record, price_col);
        let bedrooms_s = field(&record, bedrooms_col);
        let bathrooms_s = field(&record, bathrooms_col);

        let content = format!(
            "{}.\nLocated at {}, {}, {} {}.\nPrice: ${}, {} bedrooms, {} bathrooms, {} sq ft.\nAmenities: {}.",
            field(&record, title_col),
            field(&record, address_col),
            city,
            field(&record, state_col),
            field(&record, zip_col),
            or_na(&price_s),
            or_na(&bedrooms_s),
            or_na(&bathrooms_s),
            or_na(&field(&record, sqft_col)),
            or_na(&field(&record, amenities_col)),
        )
        .replace("  ", " ")
        .replace(" .", ".")
        .trim()
        .to_string();

        rows.push(ListingRow {
            listing_id,
            city,
            price: price_s.replace(',', "").parse().ok(),
            bedrooms: bedrooms_s.parse().ok(),
            bathrooms: bathrooms_s.parse().ok(),
            content,
        });
    }

    Ok(rows)
}

fn or_na(s: &str) -> String {
    if s.is_empty() {
        "N/A".to_string()
    } else {
        s.to_string()
    }
}

/// Split text into chunks of at most `chunk_size` characters with
/// `overlap` characters carried between adjacent chunks.
///
/// Break points prefer, in order: blank line, newline, sentence end,
/// space; falls back to a hard cut for unbroken runs.
pub fn split_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= chunk_size {
        let trimmed = text.trim();
        return if trimmed.is_empty() {
            vec![]
        } else {
            vec![trimmed.to_string()]
        };
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        let cut = if end == chars.len() {
            end
        } else {
            find_break(&chars, start, end)
        };

        let piece: String = chars[start..cut].iter().collect();
        let piece = piece.trim().to_string();
        if !piece.is_empty() {
            chunks.push(piece);
        }

        if cut == chars.len() {
            break;
        }
        start = cut.saturating_sub(overlap).max(start + 1);
    }
    chunks
}

/// Find the best break position in `chars[start..end]`, scanning backwards.
fn find_break(chars: &[char], start: usize, end: usize) -> usize {
    for window in [("\n\n", 2), ("\n", 1)] {
        let (sep, len) = window;
        let sep_chars: Vec<char> = sep.chars().collect();
        for i in (start + 1..end.saturating_sub(len - 1)).rev() {
            if chars[i..i + len] == sep_chars[..] {
                return i + len;
            }
        }
    }
    for i in (start + 1..end).rev() {
        if chars[i] == '.' {
            return i + 1;
        }
    }
    for i in (start + 1..end).rev() {
        if chars[i] == ' ' {
            return i + 1;
        }
    }
    end
}
