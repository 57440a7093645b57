use chrono::{DateTime, Utc};
use email_address::{EmailAddress, Options};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 120;
pub const MESSAGE_MIN_CHARS: usize = 5;
pub const MESSAGE_MAX_CHARS: usize = 5000;
pub const OPTIONAL_FIELD_MAX_CHARS: usize = 2000;

/// Parses a bare `local@domain.tld` address. Display text, domain literals
/// and single-label domains are refused.
#[must_use]
pub fn parse_bare_address(input: &str) -> Option<String> {
    let options = Options::default()
        .without_display_text()
        .without_domain_literal()
        .with_required_tld();

    EmailAddress::parse_with_options(input, options)
        .ok()
        .map(|address| address.email())
}

/// Raw enquiry form body as submitted by the site.
///
/// Every field is optional here so that missing values are reported as
/// validation failures instead of decoder errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnquiryPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
    pub consent: Option<bool>,
    pub source: Option<String>,
}

/// A validated enquiry that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub message: String,
    pub consent: bool,
    pub source: Option<String>,
}

/// A stored enquiry. Never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enquiry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub message: String,
    pub consent: bool,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub constraint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn single(field: &'static str, constraint: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation {
                field,
                constraint: constraint.into(),
            }],
        }
    }

    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.constraint))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

impl EnquiryPayload {
    /// Checks every field and returns the typed enquiry, or all violations found.
    pub fn validate(self) -> Result<NewEnquiry, ValidationError> {
        let mut violations = Vec::new();
        let mut violate = |field: &'static str, constraint: String| {
            violations.push(FieldViolation { field, constraint });
        };

        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        match self.name {
            None => violate("name", "field required".to_string()),
            Some(_) => {
                let len = name.chars().count();
                if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
                    violate(
                        "name",
                        format!("length must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"),
                    );
                }
            }
        }

        let email = match self.email.as_deref().map(str::trim) {
            None => {
                violate("email", "field required".to_string());
                None
            }
            Some(raw) => {
                let parsed = parse_bare_address(raw);
                if parsed.is_none() {
                    violate("email", "must be a valid email address".to_string());
                }
                parsed
            }
        };

        let message = self.message.as_deref().map(str::trim).unwrap_or_default();
        match self.message {
            None => violate("message", "field required".to_string()),
            Some(_) => {
                let len = message.chars().count();
                if len < MESSAGE_MIN_CHARS {
                    violate(
                        "message",
                        format!("must be at least {MESSAGE_MIN_CHARS} characters"),
                    );
                } else if len > MESSAGE_MAX_CHARS {
                    violate(
                        "message",
                        format!("must be at most {MESSAGE_MAX_CHARS} characters"),
                    );
                }
            }
        }

        let mut optional = |field: &'static str, value: Option<String>| -> Option<String> {
            let value = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())?;
            if value.chars().count() > OPTIONAL_FIELD_MAX_CHARS {
                violate(
                    field,
                    format!("must be at most {OPTIONAL_FIELD_MAX_CHARS} characters"),
                );
            }
            Some(value)
        };

        let phone = optional("phone", self.phone);
        let company = optional("company", self.company);
        let service = optional("service", self.service);
        let source = optional("source", self.source);

        let email = match email {
            Some(email) if violations.is_empty() => email,
            _ => return Err(ValidationError { violations }),
        };

        Ok(NewEnquiry {
            name: name.to_string(),
            email,
            phone,
            company,
            service,
            message: message.to_string(),
            consent: self.consent.unwrap_or(false),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> EnquiryPayload {
        EnquiryPayload {
            name: Some("Jo Bloggs".to_string()),
            email: Some("jo@example.co.uk".to_string()),
            message: Some("Interested in coaching".to_string()),
            ..EnquiryPayload::default()
        }
    }

    #[test]
    fn test_valid_payload_defaults() {
        let enquiry = valid_payload().validate().unwrap();
        assert_eq!(enquiry.name, "Jo Bloggs");
        assert!(!enquiry.consent);
        assert!(enquiry.phone.is_none());
        assert!(enquiry.source.is_none());
    }

    #[test]
    fn test_missing_required_fields_are_all_reported() {
        let err = EnquiryPayload::default().validate().unwrap_err();
        assert!(err.has_field("name"));
        assert!(err.has_field("email"));
        assert!(err.has_field("message"));
        assert_eq!(err.violations.len(), 3);
    }

    #[test]
    fn test_name_bounds() {
        let mut payload = valid_payload();
        payload.name = Some("J".to_string());
        assert!(payload.validate().unwrap_err().has_field("name"));

        let mut payload = valid_payload();
        payload.name = Some("   ".to_string());
        assert!(payload.validate().unwrap_err().has_field("name"));

        let mut payload = valid_payload();
        payload.name = Some("x".repeat(121));
        assert!(payload.validate().unwrap_err().has_field("name"));

        let mut payload = valid_payload();
        payload.name = Some("é".repeat(120));
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_email_grammar() {
        for bad in [
            "",
            "plainaddress",
            "@example.com",
            "jo@",
            "Jo <jo@example.com>",
            "jo@[127.0.0.1]",
            "jo@localhost",
        ] {
            let mut payload = valid_payload();
            payload.email = Some(bad.to_string());
            let err = payload.validate().unwrap_err();
            assert!(err.has_field("email"), "accepted {bad:?}");
        }

        let mut payload = valid_payload();
        payload.email = Some("  jo.bloggs+site@example.co.uk ".to_string());
        assert_eq!(payload.validate().unwrap().email, "jo.bloggs+site@example.co.uk");
    }

    #[test]
    fn test_message_bounds() {
        let mut payload = valid_payload();
        payload.message = Some("hey".to_string());
        assert!(payload.validate().unwrap_err().has_field("message"));

        let mut payload = valid_payload();
        payload.message = Some("m".repeat(MESSAGE_MAX_CHARS + 1));
        assert!(payload.validate().unwrap_err().has_field("message"));

        let mut payload = valid_payload();
        payload.message = Some("Hello".to_string());
        assert!(payload.validate().is_ok());

        let mut payload = valid_payload();
        payload.message = Some(format!("  {}  ", "m".repeat(MESSAGE_MAX_CHARS)));
        assert_eq!(payload.validate().unwrap().message.len(), MESSAGE_MAX_CHARS);

        let mut payload = valid_payload();
        payload.message = Some("\n  Call me back please \n".to_string());
        assert_eq!(payload.validate().unwrap().message, "Call me back please");
    }

    #[test]
    fn test_optional_fields_are_trimmed_and_capped() {
        let mut payload = valid_payload();
        payload.company = Some("  Acme Ltd  ".to_string());
        payload.phone = Some("   ".to_string());
        payload.consent = Some(true);
        let enquiry = payload.validate().unwrap();
        assert_eq!(enquiry.company.as_deref(), Some("Acme Ltd"));
        assert!(enquiry.phone.is_none());
        assert!(enquiry.consent);

        let mut payload = valid_payload();
        payload.source = Some("s".repeat(OPTIONAL_FIELD_MAX_CHARS + 1));
        let err = payload.validate().unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "source");
    }
}
