use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{EmailNotifier, EnquiryNotifier, EnquiryService, SeaOrmEnquiryService};
use tracing::{info, warn};

/// Build a shared HTTP client for outbound calls.
/// The timeout bounds how long a request can wait on the email provider.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("ld-api/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(4)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub enquiry_service: Arc<dyn EnquiryService>,
}

impl SharedState {
    /// Wires the store and the email notifier from config. The store is not
    /// connected here; see [`SharedState::warm_up`].
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.email.timeout_seconds)?;
        let notifier = EmailNotifier::from_config(&config.email, http_client);

        if notifier.is_enabled() {
            info!("Email notifications enabled");
        } else {
            info!("Email notifications disabled: SENDGRID_API_KEY/NOTIFY_EMAIL/FROM_EMAIL not set");
        }

        Ok(Self::with_notifier(config, Arc::new(notifier)))
    }

    /// Same as [`SharedState::new`] with a caller-supplied notifier.
    #[must_use]
    pub fn with_notifier(config: Config, notifier: Arc<dyn EnquiryNotifier>) -> Self {
        let store = Store::new(config.database.clone());

        let enquiry_service =
            Arc::new(SeaOrmEnquiryService::new(store.clone(), notifier)) as Arc<dyn EnquiryService>;

        Self {
            config: Arc::new(config),
            store,
            enquiry_service,
        }
    }

    /// Opens the storage pool ahead of the first request. Failure is logged,
    /// the next storage call retries.
    pub async fn warm_up(&self) {
        if !self.store.is_configured() {
            warn!("DATABASE_URL is not set; enquiry storage will fail until it is configured");
            return;
        }

        if let Err(e) = self.store.ping().await {
            warn!("Database not reachable at startup: {}", e);
        }
    }

    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}
