use axum::Json;

use super::ItemsResponse;
use crate::models::{ACCREDITATIONS, Accreditation, CASE_STUDIES, CaseStudy};

/// `GET /case-studies`
pub async fn list_case_studies() -> Json<ItemsResponse<CaseStudy>> {
    Json(ItemsResponse {
        items: CASE_STUDIES.to_vec(),
    })
}

/// `GET /accreditations`
pub async fn list_accreditations() -> Json<ItemsResponse<Accreditation>> {
    Json(ItemsResponse {
        items: ACCREDITATIONS.to_vec(),
    })
}
