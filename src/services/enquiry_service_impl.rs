//! `SeaORM`-backed implementation of [`EnquiryService`].

use crate::db::Store;
use crate::models::{Enquiry, EnquiryPayload};
use crate::services::enquiry_service::{EnquiryError, EnquiryService, Receipt};
use crate::services::notification::EnquiryNotifier;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct SeaOrmEnquiryService {
    store: Store,
    notifier: Arc<dyn EnquiryNotifier>,
}

impl SeaOrmEnquiryService {
    #[must_use]
    pub fn new(store: Store, notifier: Arc<dyn EnquiryNotifier>) -> Self {
        Self { store, notifier }
    }

    async fn notify_best_effort(&self, enquiry: &Enquiry) {
        let outcome = match self.notifier.notify(enquiry).await {
            Ok(outcome) => {
                info!(
                    enquiry_id = %enquiry.id,
                    outcome = outcome.as_str(),
                    "Enquiry notification finished"
                );
                outcome.as_str()
            }
            Err(e) => {
                error!(enquiry_id = %enquiry.id, error = %e, "Enquiry notification failed");
                "failed"
            }
        };

        metrics::counter!("enquiry_notifications_total", "outcome" => outcome).increment(1);
    }
}

#[async_trait]
impl EnquiryService for SeaOrmEnquiryService {
    async fn submit(&self, payload: EnquiryPayload) -> Result<Receipt, EnquiryError> {
        let new_enquiry = payload.validate().inspect_err(|e| {
            warn!("Rejected enquiry: {}", e);
        })?;

        let stored = self.store.insert_enquiry(&new_enquiry).await?;
        info!(enquiry_id = %stored.id, "Enquiry stored");
        metrics::counter!("enquiries_received_total").increment(1);

        self.notify_best_effort(&stored).await;

        Ok(Receipt::received(stored.id))
    }

    async fn list_recent(&self, limit: u64) -> Result<Vec<Enquiry>, EnquiryError> {
        Ok(self.store.recent_enquiries(limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::sendgrid::NotificationError;
    use crate::config::DatabaseConfig;
    use crate::services::notification::NotifyOutcome;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FailingNotifier {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EnquiryNotifier for FailingNotifier {
        async fn notify(&self, _enquiry: &Enquiry) -> Result<NotifyOutcome, NotificationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(NotificationError::Rejected {
                status: 401,
                body: "unauthorized".to_string(),
            })
        }
    }

    fn store() -> Store {
        let dir = std::env::temp_dir().join(format!("ld-api-svc-{}", uuid::Uuid::new_v4()));
        Store::new(DatabaseConfig {
            url: Some(format!("sqlite:{}", dir.display())),
            name: Some("appdb".to_string()),
            ..DatabaseConfig::default()
        })
    }

    fn payload() -> EnquiryPayload {
        EnquiryPayload {
            name: Some("Priya".to_string()),
            email: Some("priya@example.com".to_string()),
            message: Some("Tell me about ILM Level 5".to_string()),
            ..EnquiryPayload::default()
        }
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_fail_submit() {
        let notifier = Arc::new(FailingNotifier::default());
        let service = SeaOrmEnquiryService::new(store(), notifier.clone());

        let receipt = service.submit(payload()).await.unwrap();
        assert_eq!(receipt.status, "received");
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);

        let listed = service.list_recent(10).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, receipt.id);
    }

    #[tokio::test]
    async fn test_invalid_payload_has_no_side_effects() {
        let notifier = Arc::new(FailingNotifier::default());
        let store = store();
        let service = SeaOrmEnquiryService::new(store.clone(), notifier.clone());

        let mut bad = payload();
        bad.email = Some("nope".to_string());
        let err = service.submit(bad).await.unwrap_err();

        assert!(matches!(err, EnquiryError::Validation(_)));
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
        assert!(!store.is_connected());
        assert_eq!(store.count_enquiries().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_skips_notification() {
        let notifier = Arc::new(FailingNotifier::default());
        let service =
            SeaOrmEnquiryService::new(Store::new(DatabaseConfig::default()), notifier.clone());

        let err = service.submit(payload()).await.unwrap_err();
        assert!(matches!(err, EnquiryError::Storage(_)));
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
    }
}
