//! Enquiry endpoints: form submission and the newest-first listing.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{DEFAULT_LIMIT, parse_enquiry_body, validate_limit};
use super::{ApiError, AppState, CountedItemsResponse, EnquiryDto};
use crate::services::Receipt;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u64>,
}

/// `GET /enquiries?limit=N`
pub async fn list_enquiries(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<CountedItemsResponse<EnquiryDto>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::validation("limit", e.body_text()))?;
    let limit = validate_limit(query.limit.unwrap_or(DEFAULT_LIMIT))?;

    let items: Vec<EnquiryDto> = state
        .enquiry_service()
        .list_recent(limit)
        .await?
        .into_iter()
        .map(EnquiryDto::from)
        .collect();

    Ok(Json(items.into()))
}

/// `POST /enquiries`
///
/// Responds `201` once the enquiry is stored, whatever happened to the
/// notification email.
pub async fn create_enquiry(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Receipt>), ApiError> {
    let payload = parse_enquiry_body(&body)?;
    let receipt = state.enquiry_service().submit(payload).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
