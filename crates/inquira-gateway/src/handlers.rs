// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the inquiry REST API.
//!
//! Handlers are thin: validate, delegate to the processor/batch runner/
//! recorder, and map errors to status codes. Recording is spawned
//! fire-and-forget after the response is computed; recorder failures are
//! logged, never surfaced.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use inquira_core::types::{HealthStatus, Inquiry, InquiryOutcome};
use inquira_core::{InquiraError, InquiryRecorder, ServiceAdapter};
use inquira_pipeline::BatchRunner;
use inquira_storage::{HistoryFilter, SearchField};

use crate::server::AppState;

/// Request body for single and batch inquiry submission.
#[derive(Debug, Clone, Deserialize)]
pub struct InquiryBody {
    pub listing_id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Request body for POST /v1/inquiries/batch.
#[derive(Debug, Deserialize)]
pub struct BatchBody {
    pub inquiries: Vec<InquiryBody>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Response body for GET /v1/status.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub storage_status: String,
    pub index_status: String,
    pub notifier_status: String,
    pub last_check: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn map_error(e: InquiraError) -> Response {
    let status = match &e {
        InquiraError::Validation(_) => StatusCode::BAD_REQUEST,
        InquiraError::Uninitialized { .. } => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, e.to_string())
}

/// Validate a submission body into a domain [`Inquiry`].
pub fn validate_inquiry(body: &InquiryBody) -> Result<Inquiry, InquiraError> {
    if body.listing_id.trim().is_empty() {
        return Err(InquiraError::Validation("listing_id must not be empty".into()));
    }
    if body.name.trim().is_empty() {
        return Err(InquiraError::Validation("name must not be empty".into()));
    }
    let email = body.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(InquiraError::Validation(format!(
            "invalid email address `{}`",
            body.email
        )));
    }
    if body.message.trim().is_empty() {
        return Err(InquiraError::Validation("message must not be empty".into()));
    }
    Ok(Inquiry {
        listing_id: body.listing_id.trim().to_string(),
        name: body.name.trim().to_string(),
        email: email.to_string(),
        message: body.message.trim().to_string(),
        phone: body.phone.clone().filter(|p| !p.trim().is_empty()),
        submitted_at: Some(chrono::Utc::now().to_rfc3339()),
    })
}

/// Spawn fire-and-forget recording of one processed inquiry.
fn record_in_background(state: &AppState, inquiry: Inquiry, outcome: InquiryOutcome) {
    let recorder = state.recorder.clone();
    tokio::spawn(async move {
        if let Err(e) = recorder.record(&inquiry, &outcome).await {
            error!(error = %e, email = inquiry.email.as_str(), "failed to record inquiry");
        }
    });
}

/// Spawn fire-and-forget recording of a processed batch.
fn record_batch_in_background(
    state: &AppState,
    inquiries: Vec<Inquiry>,
    outcomes: Vec<InquiryOutcome>,
) {
    let recorder = state.recorder.clone();
    tokio::spawn(async move {
        if let Err(e) = recorder.record_batch(&inquiries, &outcomes).await {
            error!(error = %e, "failed to record inquiry batch");
        }
    });
}

/// POST /v1/inquiries
///
/// Process one inquiry and return its outcome; persistence happens in the
/// background after the response is computed.
pub async fn post_inquiry(
    State(state): State<AppState>,
    Json(body): Json<InquiryBody>,
) -> Response {
    let inquiry = match validate_inquiry(&body) {
        Ok(inquiry) => inquiry,
        Err(e) => return map_error(e),
    };

    let outcome = state.processor.process(&inquiry).await;
    record_in_background(&state, inquiry, outcome.clone());
    (StatusCode::OK, Json(outcome)).into_response()
}

/// POST /v1/inquiries/batch
///
/// Process a homogeneous batch. Invalid rows are skipped with a warning,
/// not a batch-wide abort; outcomes are index-aligned with the accepted rows.
pub async fn post_batch(State(state): State<AppState>, Json(body): Json<BatchBody>) -> Response {
    if body.inquiries.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "batch must contain at least one inquiry");
    }
    if body.inquiries.len() > state.max_batch_size {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("batch size cannot exceed {} inquiries", state.max_batch_size),
        );
    }

    let mut inquiries = Vec::with_capacity(body.inquiries.len());
    for (i, row) in body.inquiries.iter().enumerate() {
        match validate_inquiry(row) {
            Ok(inquiry) => inquiries.push(inquiry),
            Err(e) => warn!(row = i, error = %e, "skipping invalid batch row"),
        }
    }
    if inquiries.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "no valid inquiries in batch");
    }

    let report = state.batch.run(state.processor.clone(), inquiries.clone()).await;
    record_batch_in_background(&state, inquiries, report.outcomes.clone());
    (StatusCode::OK, Json(report.outcomes)).into_response()
}

/// POST /v1/inquiries/import
///
/// Accept a raw CSV body of inquiries. Malformed rows are skipped with a
/// warning; a CSV with no valid rows is rejected.
pub async fn post_import_csv(State(state): State<AppState>, body: String) -> Response {
    let rows = parse_inquiries_csv(&body);
    if rows.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "no valid inquiries found in file");
    }
    if rows.len() > state.max_batch_size {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("batch size cannot exceed {} inquiries", state.max_batch_size),
        );
    }

    let report = state.batch.run(state.processor.clone(), rows.clone()).await;
    record_batch_in_background(&state, rows, report.outcomes.clone());
    (StatusCode::OK, Json(report.outcomes)).into_response()
}

/// Parse inquiry rows from CSV text, skipping malformed rows.
pub fn parse_inquiries_csv(csv_text: &str) -> Vec<Inquiry> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers = match reader.headers() {
        Ok(h) => h.clone(),
        Err(e) => {
            warn!(error = %e, "unreadable CSV header");
            return Vec::new();
        }
    };
    let col = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let listing_id_col = col("Listing ID");
    let name_col = col("Inquirer Name");
    let email_col = col("Inquirer Email");
    let message_col = col("Message");
    let phone_col = col("Phone Number");

    let field = |record: &csv::StringRecord, idx: Option<usize>| -> String {
        idx.and_then(|i| record.get(i))
            .unwrap_or_default()
            .trim()
            .to_string()
    };

    let mut inquiries = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(line = line + 2, error = %e, "skipping malformed inquiry row");
                continue;
            }
        };
        let body = InquiryBody {
            listing_id: field(&record, listing_id_col),
            name: field(&record, name_col),
            email: field(&record, email_col),
            message: field(&record, message_col),
            phone: Some(field(&record, phone_col)).filter(|p| !p.is_empty()),
        };
        match validate_inquiry(&body) {
            Ok(inquiry) => inquiries.push(inquiry),
            Err(e) => warn!(line = line + 2, error = %e, "skipping invalid inquiry row"),
        }
    }
    inquiries
}

/// Query parameters for GET /v1/inquiries.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_history_limit")]
    pub limit: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
}

fn default_history_limit() -> i64 {
    100
}

/// GET /v1/inquiries
///
/// History with filters, newest first, skip/limit pagination.
pub async fn get_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Response {
    let filter = HistoryFilter {
        email: params.email,
        category: params.category,
        date_from: params.date_from,
        date_to: params.date_to,
        skip: params.skip.max(0),
        limit: params.limit.clamp(1, 1000),
    };
    match state.recorder.list(filter).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => map_error(e),
    }
}

/// GET /v1/inquiries/{id}
pub async fn get_inquiry_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    match state.recorder.get_by_id(id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "inquiry not found"),
        Err(e) => map_error(e),
    }
}

/// Query parameters for GET /v1/inquiries/search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_search_field")]
    pub field: String,
    #[serde(default = "default_search_limit")]
    pub limit: i64,
}

fn default_search_field() -> String {
    "all".to_string()
}

fn default_search_limit() -> i64 {
    50
}

/// GET /v1/inquiries/search
pub async fn get_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    if params.q.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "search query must not be empty");
    }
    let field = SearchField::from_param(&params.field);
    match state
        .recorder
        .search(params.q.trim(), field, params.limit.clamp(1, 500))
        .await
    {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => map_error(e),
    }
}

/// Query parameters for GET /v1/inquiries/analytics.
#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
    #[serde(default = "default_analytics_days")]
    pub days: i64,
}

fn default_analytics_days() -> i64 {
    30
}

/// GET /v1/inquiries/analytics
pub async fn get_analytics(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> Response {
    match state.recorder.analytics(params.days.clamp(1, 365)).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => map_error(e),
    }
}

/// GET /v1/status
///
/// Probes storage, the listing index, and the notifier.
pub async fn get_status(State(state): State<AppState>) -> Response {
    let storage_status = render_health(state.recorder.health_check().await);
    let index_status = render_health(state.retriever.health_check().await);
    let notifier_status = render_health(state.notifier.health_check().await);

    let overall = if storage_status == "healthy" && index_status == "healthy" {
        "healthy"
    } else {
        "degraded"
    };

    (
        StatusCode::OK,
        Json(StatusResponse {
            status: overall.to_string(),
            storage_status,
            index_status,
            notifier_status,
            last_check: chrono::Utc::now().to_rfc3339(),
        }),
    )
        .into_response()
}

fn render_health(result: Result<HealthStatus, InquiraError>) -> String {
    match result {
        Ok(HealthStatus::Healthy) => "healthy".to_string(),
        Ok(HealthStatus::Degraded(reason)) => format!("degraded: {reason}"),
        Ok(HealthStatus::Unhealthy(reason)) => format!("unhealthy: {reason}"),
        Err(e) => format!("unhealthy: {e}"),
    }
}

/// GET /health (public, unauthenticated)
pub async fn get_public_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "inquira",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
