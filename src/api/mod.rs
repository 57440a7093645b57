use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

mod content;
mod enquiries;
mod error;
mod observability;
pub mod system;
pub mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use crate::services::{EnquiryNotifier, EnquiryService};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn enquiry_service(&self) -> &Arc<dyn EnquiryService> {
        &self.shared.enquiry_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config)?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// Builds state around an explicit notifier, e.g. a stub provider in tests.
#[must_use]
pub fn create_app_state_with_notifier(
    config: Config,
    notifier: Arc<dyn EnquiryNotifier>,
) -> Arc<AppState> {
    let shared = Arc::new(SharedState::with_notifier(config, notifier));
    create_app_state(shared, None)
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = &state.config().server.cors_allowed_origins;

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/", get(system::root))
        .route("/test", get(system::test_database))
        .route("/health/live", get(system::health_live))
        .route(
            "/enquiries",
            get(enquiries::list_enquiries).post(enquiries::create_enquiry),
        )
        .route("/case-studies", get(content::list_case_studies))
        .route("/accreditations", get(content::list_accreditations))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(observability::track_requests))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::security_headers))
}
