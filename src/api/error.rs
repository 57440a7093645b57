use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorBody;
use crate::db::StorageError;
use crate::models::{FieldViolation, ValidationError};
use crate::services::EnquiryError;

#[derive(Debug)]
pub enum ApiError {
    ValidationError(Vec<FieldViolation>),

    DatabaseError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ValidationError(violations) => {
                let fields: Vec<&str> = violations.iter().map(|v| v.field).collect();
                write!(f, "Validation error on: {}", fields.join(", "))
            }
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    detail: "Validation failed".to_string(),
                    errors,
                },
            ),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("A database error occurred"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::ValidationError(err.violations)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::DatabaseError(err.to_string())
    }
}

impl From<EnquiryError> for ApiError {
    fn from(err: EnquiryError) -> Self {
        match err {
            EnquiryError::Validation(e) => e.into(),
            EnquiryError::Storage(e) => e.into(),
        }
    }
}

impl ApiError {
    pub fn validation(field: &'static str, constraint: impl Into<String>) -> Self {
        ValidationError::single(field, constraint).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let validation = ApiError::validation("limit", "must be between 1 and 1000");
        assert_eq!(
            validation.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let storage: ApiError = EnquiryError::Storage(StorageError::NotConfigured).into();
        assert!(matches!(storage, ApiError::DatabaseError(_)));
        assert_eq!(
            storage.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
