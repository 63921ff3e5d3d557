// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row models and query parameter types for the inquiry history.

use serde::Serialize;

/// A persisted inquiry-history row.
#[derive(Debug, Clone, Serialize)]
pub struct InquiryRecord {
    /// Auto-assigned row identifier.
    pub id: i64,
    /// Processing invocation identifier from the outcome.
    pub processing_id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Canonical category string.
    pub category: String,
    pub message: String,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<String>,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

/// A history row ready for insertion (no rowid yet).
#[derive(Debug, Clone)]
pub struct NewInquiryRecord {
    pub processing_id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub category: String,
    pub message: String,
    pub response: String,
    pub email_title: Option<String>,
    pub email_body: Option<String>,
    pub listing_id: Option<String>,
    pub created_at: String,
}

/// Filters for history listing.
///
/// All filters are conjunctive; results are ordered by creation time
/// descending and paginated with skip/limit.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub email: Option<String>,
    pub category: Option<String>,
    /// Inclusive ISO 8601 lower bound on created_at.
    pub date_from: Option<String>,
    /// Inclusive ISO 8601 upper bound on created_at.
    pub date_to: Option<String>,
    pub skip: i64,
    pub limit: i64,
}

impl HistoryFilter {
    /// A filter with default pagination (first 100 rows).
    pub fn new() -> Self {
        Self {
            limit: 100,
            ..Self::default()
        }
    }
}

/// Which field substring search scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Message,
    Response,
    Email,
    /// Any of message, response, or email.
    All,
}

impl SearchField {
    /// Parse the API's field selector; unknown values scan all fields.
    pub fn from_param(s: &str) -> Self {
        match s {
            "message" => SearchField::Message,
            "response" => SearchField::Response,
            "email" => SearchField::Email,
            _ => SearchField::All,
        }
    }
}

/// Aggregate analytics over a trailing window.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub total_inquiries: i64,
    pub date_range_days: i64,
    /// Category -> inquiry count.
    pub category_distribution: std::collections::BTreeMap<String, i64>,
    /// Day (YYYY-MM-DD) -> inquiry count.
    pub daily_counts: std::collections::BTreeMap<String, i64>,
    /// Most frequent inquirer emails, descending.
    pub top_users: Vec<TopUser>,
}

/// One entry in the top-inquirers list.
#[derive(Debug, Clone, Serialize)]
pub struct TopUser {
    pub email: String,
    pub count: i64,
}
