// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Inquira inquiry history.
//!
//! [`SqliteRecorder`] implements the [`InquiryRecorder`] seam (append-only
//! record/record_batch) plus the filtered listing, substring search, and
//! analytics queries behind the history API.
//!
//! [`InquiryRecorder`]: inquira_core::InquiryRecorder

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod recorder;

pub use database::Database;
pub use models::{
    AnalyticsSummary, HistoryFilter, InquiryRecord, NewInquiryRecord, SearchField, TopUser,
};
pub use recorder::SqliteRecorder;
