// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `inquira serve` command implementation.
//!
//! Wires the full service set -- OpenAI provider and embedder, listing
//! index, SMTP notifier, SQLite recorder, pipeline, batch runner -- and
//! starts the HTTP gateway. Every component goes through its explicit
//! `new` -> `initialize` lifecycle before the first request.

use std::sync::Arc;

use tracing::{error, info};

use inquira_config::model::InquiraConfig;
use inquira_core::error::InquiraError;
use inquira_core::{CompletionProvider, EmbeddingProvider, ListingRetriever, Notifier};
use inquira_email::SmtpNotifier;
use inquira_gateway::AppState;
use inquira_index::VectorIndex;
use inquira_openai::{OpenAiEmbedder, OpenAiProvider};
use inquira_pipeline::{BatchRunner, ConcurrentBatch, InquiryProcessor, LmGateway, PooledBatch};
use inquira_storage::SqliteRecorder;

/// Runs the `inquira serve` command.
pub async fn run_serve(config: InquiraConfig) -> Result<(), InquiraError> {
    init_tracing(&config.assistant.log_level);

    info!(assistant = config.assistant.name.as_str(), "starting inquira serve");

    // OpenAI provider and embedder.
    let provider: Arc<dyn CompletionProvider> = {
        let p = OpenAiProvider::new(&config.openai).map_err(|e| {
            error!(error = %e, "failed to initialize OpenAI provider");
            eprintln!(
                "error: OpenAI API key required. Set via: config openai.api_key or OPENAI_API_KEY env var"
            );
            e
        })?;
        Arc::new(p)
    };
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbedder::new(&config.openai)?);

    // Listing index.
    let index = VectorIndex::new(config.retrieval.clone(), embedder);
    index.initialize().await?;
    let retriever: Arc<dyn ListingRetriever> = Arc::new(index);
    info!(path = config.retrieval.index_path.as_str(), "listing index ready");

    // Inquiry history recorder.
    let recorder = Arc::new(SqliteRecorder::new(config.storage.clone()));
    recorder.initialize().await?;
    info!(path = config.storage.database_path.as_str(), "inquiry recorder ready");

    // Notifier.
    let notifier: Arc<dyn Notifier> = Arc::new(SmtpNotifier::new(&config.email)?);
    if config.email.enabled {
        info!(
            smtp_host = config.email.smtp_host.as_str(),
            "email notifications enabled"
        );
    } else {
        info!("email notifications disabled by configuration");
    }

    // Pipeline and batch runner.
    let gateway = LmGateway::new(provider, &config.openai);
    let processor = Arc::new(InquiryProcessor::new(
        gateway,
        retriever.clone(),
        notifier.clone(),
    ));

    let batch: Arc<dyn BatchRunner> = match config.batch.mode.as_str() {
        "concurrent" => Arc::new(ConcurrentBatch::new(&config.batch)),
        _ => Arc::new(PooledBatch::new(&config.batch)),
    };
    info!(
        mode = config.batch.mode.as_str(),
        max_concurrency = config.batch.max_concurrency,
        item_timeout_secs = config.batch.item_timeout_secs,
        "batch coordinator ready"
    );

    let state = AppState {
        processor,
        batch,
        recorder,
        retriever,
        notifier,
        max_batch_size: config.batch.max_batch_size,
    };

    inquira_gateway::start_server(&config.gateway, state).await
}

/// Initialize the tracing subscriber with the configured level as default.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
