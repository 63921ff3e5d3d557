// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Inquira inquiry assistant.
//!
//! Thin axum surface over the pipeline: single and batch submission, CSV
//! import, history with filters and pagination, substring search,
//! analytics, and status probes.

pub mod handlers;
pub mod server;

pub use server::{build_router, start_server, AppState};
