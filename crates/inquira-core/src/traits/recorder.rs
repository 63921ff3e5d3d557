// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recorder trait for durable inquiry persistence.

use async_trait::async_trait;

use crate::error::InquiraError;
use crate::traits::adapter::ServiceAdapter;
use crate::types::{Inquiry, InquiryOutcome};

/// Adapter for recording processed inquiries and their outcomes.
///
/// Append-only from the pipeline's perspective. Callers invoke recording
/// fire-and-forget after the outcome has been returned; failures are logged
/// and never propagate to the original submitter.
#[async_trait]
pub trait InquiryRecorder: ServiceAdapter {
    /// Records a single processed inquiry.
    async fn record(
        &self,
        inquiry: &Inquiry,
        outcome: &InquiryOutcome,
    ) -> Result<(), InquiraError>;

    /// Records a batch of processed inquiries.
    ///
    /// `outcomes[i]` corresponds to `inquiries[i]`; mismatched lengths are
    /// rejected with a validation error.
    async fn record_batch(
        &self,
        inquiries: &[Inquiry],
        outcomes: &[InquiryOutcome],
    ) -> Result<(), InquiraError>;
}
