use serde::Serialize;

use crate::models::{Enquiry, FieldViolation};

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldViolation>,
}

impl ErrorBody {
    pub fn message(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            errors: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct CountedItemsResponse<T> {
    pub items: Vec<T>,
    pub count: usize,
}

impl<T> From<Vec<T>> for CountedItemsResponse<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

/// Enquiry as rendered to API clients: plain-text id, RFC 3339 timestamps.
#[derive(Debug, Serialize)]
pub struct EnquiryDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub message: String,
    pub consent: bool,
    pub source: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Enquiry> for EnquiryDto {
    fn from(enquiry: Enquiry) -> Self {
        Self {
            id: enquiry.id,
            name: enquiry.name,
            email: enquiry.email,
            phone: enquiry.phone,
            company: enquiry.company,
            service: enquiry.service,
            message: enquiry.message,
            consent: enquiry.consent,
            source: enquiry.source,
            created_at: enquiry.created_at.to_rfc3339(),
            updated_at: enquiry.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RootStatus {
    pub message: &'static str,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct StorageDiagnostics {
    pub backend: &'static str,
    pub database: String,
    pub database_url: &'static str,
    pub database_name: &'static str,
    pub connection_status: &'static str,
    pub collections: Vec<String>,
}
