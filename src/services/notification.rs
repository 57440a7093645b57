//! Outbound email notification for new enquiries.
//!
//! Notification is best effort: callers receive a [`NotificationError`] and
//! decide what to do with it, but nothing here ever touches storage or the
//! HTTP response.

use crate::clients::sendgrid::{MailMessage, NotificationError, SendGridClient};
use crate::config::EmailConfig;
use crate::models::Enquiry;
use std::fmt::Write;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The provider accepted the message.
    Sent,
    /// Email configuration is incomplete; nothing was attempted.
    Skipped,
}

impl NotifyOutcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Skipped => "skipped",
        }
    }
}

#[async_trait::async_trait]
pub trait EnquiryNotifier: Send + Sync {
    async fn notify(&self, enquiry: &Enquiry) -> Result<NotifyOutcome, NotificationError>;
}

struct Route {
    client: SendGridClient,
    to: String,
    from: String,
    from_name: String,
}

/// Sends enquiry notifications through SendGrid when fully configured.
pub struct EmailNotifier {
    route: Option<Route>,
}

impl EmailNotifier {
    /// A notifier that always skips.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { route: None }
    }

    /// Builds the notifier from config. Incomplete or unusable configuration
    /// yields a disabled notifier rather than an error.
    #[must_use]
    pub fn from_config(config: &EmailConfig, http: reqwest::Client) -> Self {
        if !config.is_configured() {
            return Self::disabled();
        }

        let (Some(api_key), Some(to), Some(from)) = (
            config.api_key.as_deref(),
            config.notify_email.as_deref(),
            config.sender(),
        ) else {
            return Self::disabled();
        };

        match SendGridClient::new(http, api_key.trim(), &config.api_base_url) {
            Ok(client) => Self {
                route: Some(Route {
                    client,
                    to: to.trim().to_string(),
                    from: from.to_string(),
                    from_name: config.from_name.clone(),
                }),
            },
            Err(e) => {
                warn!("Email notifications disabled: {}", e);
                Self::disabled()
            }
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.route.is_some()
    }
}

#[async_trait::async_trait]
impl EnquiryNotifier for EmailNotifier {
    async fn notify(&self, enquiry: &Enquiry) -> Result<NotifyOutcome, NotificationError> {
        let Some(route) = &self.route else {
            return Ok(NotifyOutcome::Skipped);
        };

        let (subject, text) = compose(enquiry);
        let message = MailMessage {
            to: route.to.clone(),
            from: route.from.clone(),
            from_name: route.from_name.clone(),
            subject,
            text,
        };

        route.client.send(&message).await?;
        Ok(NotifyOutcome::Sent)
    }
}

/// Subject and plain-text body for an enquiry notification.
#[must_use]
pub fn compose(enquiry: &Enquiry) -> (String, String) {
    let subject = format!("New L&D Enquiry from {}", enquiry.name);

    let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    let mut text = String::new();
    let _ = writeln!(text, "Name: {}", enquiry.name);
    let _ = writeln!(text, "Email: {}", enquiry.email);
    let _ = writeln!(text, "Phone: {}", or_dash(&enquiry.phone));
    let _ = writeln!(text, "Company: {}", or_dash(&enquiry.company));
    let _ = writeln!(text, "Service: {}", or_dash(&enquiry.service));
    let _ = writeln!(text, "Consent: {}", enquiry.consent);
    let _ = writeln!(text, "Source: {}", or_dash(&enquiry.source));
    let _ = write!(text, "\nMessage:\n{}\n", enquiry.message);

    (subject, text)
}
