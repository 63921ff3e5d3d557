// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notifier trait for outbound customer notifications.

use async_trait::async_trait;

use crate::error::InquiraError;
use crate::traits::adapter::ServiceAdapter;
use crate::types::NotifyStatus;

/// Adapter for delivering a generated response to the inquirer.
///
/// Distinguishes "disabled" (a silent no-op, `Ok(NotifyStatus::Disabled)`)
/// from "failed" (`Err(InquiraError::Notification)`). The pipeline logs and
/// swallows failures; they never alter the computed outcome.
///
/// [`InquiraError::Notification`]: crate::error::InquiraError::Notification
#[async_trait]
pub trait Notifier: ServiceAdapter {
    /// Sends `body` to `to` with the given subject line.
    async fn notify(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<NotifyStatus, InquiraError>;
}
