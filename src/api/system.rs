//! Liveness and diagnostic endpoints.

use axum::{Json, extract::State, response::IntoResponse};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;

use super::{AppState, RootStatus, StorageDiagnostics};
use crate::db::Store;

/// Error text in the diagnostic report is cut to this many characters.
const MAX_DIAGNOSTIC_ERROR: usize = 80;

#[derive(Debug, Serialize)]
pub struct HealthLiveResponse {
    pub status: &'static str,
    pub uptime_seconds: u64,
}

/// `GET /`
pub async fn root() -> Json<RootStatus> {
    Json(RootStatus {
        message: "L&D Backend Running",
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
    })
}

/// `GET /health/live`
pub async fn health_live(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthLiveResponse {
        status: "alive",
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// `GET /test`
///
/// Reports storage configuration and connectivity. Always 200; failures are
/// described in the body.
pub async fn test_database(State(state): State<Arc<AppState>>) -> Json<StorageDiagnostics> {
    Json(diagnose(state.store()).await)
}

/// Builds the storage diagnostic report without writing anything.
pub async fn diagnose(store: &Store) -> StorageDiagnostics {
    let settings = store.settings();
    let is_set = |value: &Option<String>| {
        if value.as_deref().is_some_and(|v| !v.trim().is_empty()) {
            "set"
        } else {
            "not set"
        }
    };

    let mut report = StorageDiagnostics {
        backend: "running",
        database: "not available".to_string(),
        database_url: is_set(&settings.url),
        database_name: is_set(&settings.name),
        connection_status: "Not Connected",
        collections: Vec::new(),
    };

    if !store.is_configured() {
        return report;
    }

    match store.collections().await {
        Ok(collections) => {
            report.collections = collections;
            report.connection_status = "Connected";
            report.database = "connected & working".to_string();
        }
        Err(e) => {
            let msg: String = e.to_string().chars().take(MAX_DIAGNOSTIC_ERROR).collect();
            report.database = format!("error: {msg}");
        }
    }

    report
}
