// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP notification adapter for Inquira.
//!
//! [`SmtpNotifier`] delivers generated responses to inquirers over STARTTLS
//! SMTP via lettre. A notifier disabled by configuration is a silent no-op
//! returning [`NotifyStatus::Disabled`]; transport and auth failures surface
//! as [`InquiraError::Notification`].

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use inquira_config::model::EmailConfig;
use inquira_core::types::{AdapterType, HealthStatus, NotifyStatus};
use inquira_core::{InquiraError, Notifier, ServiceAdapter};

fn notification_err(
    message: impl Into<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
) -> InquiraError {
    InquiraError::Notification {
        message: message.into(),
        source,
    }
}

/// SMTP-backed notifier.
///
/// When disabled, no transport is constructed and every call is a no-op.
pub struct SmtpNotifier {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
}

impl SmtpNotifier {
    /// Build a notifier from email configuration.
    ///
    /// Requires username, password, and from_address when enabled; the
    /// config layer validates that before this point, but missing values
    /// still fail here rather than panic.
    pub fn new(config: &EmailConfig) -> Result<Self, InquiraError> {
        if !config.enabled {
            return Ok(Self {
                transport: None,
                from: None,
            });
        }

        let username = config.username.clone().ok_or_else(|| {
            InquiraError::Config("email.username is required when email is enabled".into())
        })?;
        let password = config.password.clone().ok_or_else(|| {
            InquiraError::Config("email.password is required when email is enabled".into())
        })?;
        let from_address = config.from_address.clone().ok_or_else(|| {
            InquiraError::Config("email.from_address is required when email is enabled".into())
        })?;

        let from: Mailbox = format!("{} <{}>", config.from_name, from_address)
            .parse()
            .map_err(|e| {
                InquiraError::Config(format!("invalid email.from_address: {e}"))
            })?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| notification_err(format!("invalid SMTP relay: {e}"), Some(Box::new(e))))?
            .port(config.smtp_port)
            .credentials(Credentials::new(username, password))
            .build();

        Ok(Self {
            transport: Some(transport),
            from: Some(from),
        })
    }
}

#[async_trait]
impl ServiceAdapter for SmtpNotifier {
    fn name(&self) -> &str {
        "smtp"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifier
    }

    async fn health_check(&self) -> Result<HealthStatus, InquiraError> {
        match &self.transport {
            None => Ok(HealthStatus::Degraded("disabled by configuration".into())),
            Some(transport) => match transport.test_connection().await {
                Ok(true) => Ok(HealthStatus::Healthy),
                Ok(false) => Ok(HealthStatus::Unhealthy("SMTP connection refused".into())),
                Err(e) => Ok(HealthStatus::Unhealthy(format!("SMTP check failed: {e}"))),
            },
        }
    }

    async fn shutdown(&self) -> Result<(), InquiraError> {
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<NotifyStatus, InquiraError> {
        let (Some(transport), Some(from)) = (&self.transport, &self.from) else {
            debug!(to, "notifications disabled, skipping delivery");
            return Ok(NotifyStatus::Disabled);
        };

        let recipient: Mailbox = to
            .parse()
            .map_err(|e| notification_err(format!("invalid recipient address `{to}`: {e}"), None))?;

        let message = Message::builder()
            .from(from.clone())
            .to(recipient)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| notification_err(format!("failed to build message: {e}"), Some(Box::new(e))))?;

        transport
            .send(message)
            .await
            .map_err(|e| notification_err(format!("SMTP delivery failed: {e}"), Some(Box::new(e))))?;

        info!(to, subject, "email sent");
        Ok(NotifyStatus::Sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_config() -> EmailConfig {
        EmailConfig {
            enabled: true,
            smtp_host: "smtp.example.com".into(),
            smtp_port: 587,
            username: Some("agent@example.com".into()),
            password: Some("app-password".into()),
            from_name: "Test Estates".into(),
            from_address: Some("agent@example.com".into()),
        }
    }

    #[tokio::test]
    async fn disabled_notifier_is_silent_noop() {
        let config = EmailConfig {
            enabled: false,
            ..EmailConfig::default()
        };
        let notifier = SmtpNotifier::new(&config).unwrap();
        let status = notifier
            .notify("buyer@example.com", "Re: Your Real Estate Inquiry - Price Inquiry", "hi")
            .await
            .unwrap();
        assert_eq!(status, NotifyStatus::Disabled);
    }

    #[tokio::test]
    async fn disabled_notifier_health_is_degraded() {
        let config = EmailConfig {
            enabled: false,
            ..EmailConfig::default()
        };
        let notifier = SmtpNotifier::new(&config).unwrap();
        let status = notifier.health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Degraded(_)));
    }

    #[test]
    fn enabled_without_credentials_is_config_error() {
        let config = EmailConfig {
            enabled: true,
            ..EmailConfig::default()
        };
        let result = SmtpNotifier::new(&config);
        assert!(matches!(result, Err(InquiraError::Config(_))));
    }

    #[test]
    fn enabled_with_full_identity_builds() {
        assert!(SmtpNotifier::new(&enabled_config()).is_ok());
    }

    #[tokio::test]
    async fn invalid_recipient_is_notification_error() {
        let notifier = SmtpNotifier::new(&enabled_config()).unwrap();
        let result = notifier
            .notify("not an address", "subject", "body")
            .await;
        assert!(matches!(
            result,
            Err(InquiraError::Notification { .. })
        ));
    }

    #[test]
    fn adapter_identity() {
        let notifier = SmtpNotifier::new(&EmailConfig {
            enabled: false,
            ..EmailConfig::default()
        })
        .unwrap();
        assert_eq!(notifier.name(), "smtp");
        assert_eq!(notifier.adapter_type(), AdapterType::Notifier);
    }
}
