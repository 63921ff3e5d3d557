// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inquiry processing pipeline for Inquira.
//!
//! [`InquiryProcessor`] runs one inquiry through expand -> categorize ->
//! answer -> notify -> finalize with per-stage fallbacks; the [`batch`]
//! module fans many inquiries out across it with bounded concurrency and
//! per-item isolation.

pub mod batch;
pub mod gateway;
pub mod processor;
pub mod templates;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{
    degraded_outcome, BatchReport, BatchRunner, ConcurrentBatch, PooledBatch,
    BATCH_FALLBACK_RESPONSE,
};
pub use gateway::LmGateway;
pub use processor::{InquiryProcessor, ERROR_FALLBACK_RESPONSE, FALLBACK_RESPONSE};
pub use templates::TemplateId;
