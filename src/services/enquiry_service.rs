//! Domain service for enquiry ingestion and listing.
//!
//! Submission runs validation, storage and best-effort notification in that
//! order. Only validation and storage failures reach the caller.

use crate::db::StorageError;
use crate::models::{Enquiry, EnquiryPayload, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by enquiry operations.
///
/// Notification failures are not represented here; they never leave the
/// pipeline.
#[derive(Debug, Error)]
pub enum EnquiryError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// What the caller gets back after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub id: String,
    pub status: &'static str,
}

impl Receipt {
    pub const RECEIVED: &'static str = "received";

    #[must_use]
    pub fn received(id: String) -> Self {
        Self {
            id,
            status: Self::RECEIVED,
        }
    }
}

#[async_trait::async_trait]
pub trait EnquiryService: Send + Sync {
    /// Validates, stores and announces a new enquiry.
    ///
    /// # Errors
    ///
    /// Returns [`EnquiryError::Validation`] before any side effect, or
    /// [`EnquiryError::Storage`] if the insert fails.
    async fn submit(&self, payload: EnquiryPayload) -> Result<Receipt, EnquiryError>;

    /// Most recent enquiries first, at most `limit`.
    async fn list_recent(&self, limit: u64) -> Result<Vec<Enquiry>, EnquiryError>;
}
