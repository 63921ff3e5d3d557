// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `inquira ingest` command implementation.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use inquira_config::model::InquiraConfig;
use inquira_core::error::InquiraError;
use inquira_index::{ingest_csv, ListingStore};
use inquira_openai::OpenAiEmbedder;

/// Runs the `inquira ingest <file>` command: parse the listings CSV, embed
/// its chunks, and store them in the retrieval index.
pub async fn run_ingest(config: InquiraConfig, file: &Path) -> Result<(), InquiraError> {
    let csv_text = std::fs::read_to_string(file).map_err(|e| {
        InquiraError::Validation(format!("cannot read {}: {e}", file.display()))
    })?;

    let embedder = Arc::new(OpenAiEmbedder::new(&config.openai)?);
    let store = ListingStore::open(&config.retrieval.index_path).await?;

    let chunks = ingest_csv(&store, embedder, &config.retrieval, &csv_text).await?;

    info!(chunks, "ingest complete");
    println!(
        "Ingested {chunks} chunks into {}",
        config.retrieval.index_path
    );
    Ok(())
}
