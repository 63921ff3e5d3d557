// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the inquiry API.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use inquira_config::model::GatewayConfig;
use inquira_core::{InquiraError, ListingRetriever, Notifier};
use inquira_pipeline::{BatchRunner, InquiryProcessor};
use inquira_storage::SqliteRecorder;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Single-inquiry processor.
    pub processor: Arc<InquiryProcessor>,
    /// Batch fan-out strategy selected by configuration.
    pub batch: Arc<dyn BatchRunner>,
    /// History recorder and query surface.
    pub recorder: Arc<SqliteRecorder>,
    /// Listing index, probed by the status endpoint.
    pub retriever: Arc<dyn ListingRetriever>,
    /// Notifier, probed by the status endpoint.
    pub notifier: Arc<dyn Notifier>,
    /// Maximum inquiries accepted per batch submission.
    pub max_batch_size: usize,
}

/// Build the gateway router over the shared state.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_public_health));

    let api_routes = Router::new()
        .route(
            "/v1/inquiries",
            post(handlers::post_inquiry).get(handlers::get_history),
        )
        .route("/v1/inquiries/batch", post(handlers::post_batch))
        .route("/v1/inquiries/import", post(handlers::post_import_csv))
        .route("/v1/inquiries/search", get(handlers::get_search))
        .route("/v1/inquiries/analytics", get(handlers::get_analytics))
        .route("/v1/inquiries/{id}", get(handlers::get_inquiry_by_id))
        .route("/v1/status", get(handlers::get_status))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(CorsLayer::permissive())
}

/// Start the gateway HTTP server and serve until the process exits.
pub async fn start_server(config: &GatewayConfig, state: AppState) -> Result<(), InquiraError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| InquiraError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| InquiraError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
