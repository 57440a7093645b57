use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

const MAIL_SEND_PATH: &str = "v3/mail/send";

/// Longest provider response body kept in an error.
const MAX_ERROR_BODY: usize = 500;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("invalid email provider url: {0}")]
    InvalidUrl(String),

    #[error("email provider request failed: {0}")]
    Transport(String),

    #[error("email provider rejected message: {status} {body}")]
    Rejected { status: u16, body: String },
}

impl From<reqwest::Error> for NotificationError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub from: String,
    pub from_name: String,
    pub subject: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}

impl<'a> From<&'a MailMessage> for SendRequest<'a> {
    fn from(message: &'a MailMessage) -> Self {
        Self {
            personalizations: [Personalization {
                to: [Address {
                    email: &message.to,
                    name: None,
                }],
            }],
            from: Address {
                email: &message.from,
                name: Some(&message.from_name),
            },
            subject: &message.subject,
            content: [Content {
                kind: "text/plain",
                value: &message.text,
            }],
        }
    }
}

/// Minimal client for SendGrid's v3 mail API.
#[derive(Clone)]
pub struct SendGridClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl SendGridClient {
    /// `client` carries the request timeout; reuse the shared one.
    pub fn new(client: Client, api_key: &str, base_url: &str) -> Result<Self, NotificationError> {
        let mut base = Url::parse(base_url).map_err(|e| NotificationError::InvalidUrl(e.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join(MAIL_SEND_PATH)
            .map_err(|e| NotificationError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            endpoint,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one message. Any non-2xx status is reported as `Rejected`.
    pub async fn send(&self, message: &MailMessage) -> Result<(), NotificationError> {
        debug!("Submitting notification to {}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&SendRequest::from(message))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|i| body.is_char_boundary(*i))
                .unwrap_or(0);
            body.truncate(cut);
        }

        Err(NotificationError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> MailMessage {
        MailMessage {
            to: "team@example.com".to_string(),
            from: "site@example.com".to_string(),
            from_name: "L&D Website".to_string(),
            subject: "New L&D Enquiry from Jo".to_string(),
            text: "Name: Jo\n".to_string(),
        }
    }

    #[test]
    fn test_request_shape() {
        let msg = message();
        let json = serde_json::to_value(SendRequest::from(&msg)).unwrap();

        assert_eq!(
            json["personalizations"][0]["to"][0]["email"],
            "team@example.com"
        );
        assert!(json["personalizations"][0]["to"][0].get("name").is_none());
        assert_eq!(json["from"]["email"], "site@example.com");
        assert_eq!(json["from"]["name"], "L&D Website");
        assert_eq!(json["content"][0]["type"], "text/plain");
        assert_eq!(json["subject"], "New L&D Enquiry from Jo");
    }

    #[test]
    fn test_endpoint_join() {
        let client = SendGridClient::new(Client::new(), "key", "https://api.sendgrid.com").unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://api.sendgrid.com/v3/mail/send"
        );

        let client = SendGridClient::new(Client::new(), "key", "http://127.0.0.1:9999/proxy").unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "http://127.0.0.1:9999/proxy/v3/mail/send"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            SendGridClient::new(Client::new(), "key", "not a url"),
            Err(NotificationError::InvalidUrl(_))
        ));
    }
}
