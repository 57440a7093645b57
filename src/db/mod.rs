use crate::config::DatabaseConfig;
use crate::models::{Enquiry, NewEnquiry};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{info, warn};

pub mod migrator;
pub mod repositories;

/// Errors raised by the document store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database url is not configured")]
    NotConfigured,

    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("database query failed: {0}")]
    Query(String),
}

impl From<DbErr> for StorageError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(e) => Self::Connection(e.to_string()),
            DbErr::ConnectionAcquire(e) => Self::Connection(e.to_string()),
            other => Self::Query(other.to_string()),
        }
    }
}

/// Handle to the enquiry store.
///
/// The connection pool is opened on first use and shared by every clone. A
/// failed attempt leaves the handle unconnected so the next call retries.
#[derive(Clone)]
pub struct Store {
    settings: Arc<DatabaseConfig>,
    conn: Arc<OnceCell<DatabaseConnection>>,
}

impl Store {
    #[must_use]
    pub fn new(settings: DatabaseConfig) -> Self {
        Self {
            settings: Arc::new(settings),
            conn: Arc::new(OnceCell::new()),
        }
    }

    /// Builds the handle and opens the pool immediately.
    pub async fn connect(settings: DatabaseConfig) -> Result<Self, StorageError> {
        let store = Self::new(settings);
        store.conn().await?;
        Ok(store)
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.settings.connection_string().is_some()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.conn.initialized()
    }

    #[must_use]
    pub fn settings(&self) -> &DatabaseConfig {
        &self.settings
    }

    async fn conn(&self) -> Result<&DatabaseConnection, StorageError> {
        self.conn
            .get_or_try_init(|| Self::open(&self.settings))
            .await
    }

    async fn open(settings: &DatabaseConfig) -> Result<DatabaseConnection, StorageError> {
        use sea_orm_migration::MigratorTrait;

        let db_url = settings
            .connection_string()
            .ok_or(StorageError::NotConfigured)?;

        if !db_url.starts_with("sqlite:") {
            return Err(StorageError::Connection(format!(
                "unsupported storage url {db_url}: only sqlite: urls are supported"
            )));
        }

        if !db_url.contains(":memory:") && !db_url.contains("mode=memory") {
            let path_str = db_url
                .trim_start_matches("sqlite:")
                .trim_start_matches("//")
                .split('?')
                .next()
                .unwrap_or_default();
            let path = Path::new(path_str);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    StorageError::Connection(format!("cannot create {}: {e}", parent.display()))
                })?;
            }
            if !path.exists() {
                std::fs::File::create(path).map_err(|e| {
                    StorageError::Connection(format!("cannot create {}: {e}", path.display()))
                })?;
            }
        }

        let timeout = Duration::from_secs(settings.connect_timeout_seconds);
        let mut opt = ConnectOptions::new(db_url);
        opt.max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .connect_timeout(timeout)
            .acquire_timeout(timeout)
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            settings.min_connections, settings.max_connections
        );

        Ok(conn)
    }

    pub async fn ping(&self) -> Result<(), StorageError> {
        let conn = self.conn().await?;
        let backend = conn.get_database_backend();
        conn.query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Names of the user tables, i.e. the document collections.
    pub async fn collections(&self) -> Result<Vec<String>, StorageError> {
        let conn = self.conn().await?;
        let backend = conn.get_database_backend();
        let rows = conn
            .query_all(Statement::from_string(
                backend,
                "SELECT name FROM sqlite_master WHERE type = 'table' \
                 AND name NOT LIKE 'sqlite_%' AND name != 'seaql_migrations' \
                 ORDER BY name"
                    .to_string(),
            ))
            .await?;

        let mut names = Vec::with_capacity(rows.len());
        for row in rows {
            names.push(row.try_get::<String>("", "name")?);
        }
        Ok(names)
    }

    /// Closes the pool if it was ever opened.
    pub async fn close(&self) {
        if let Some(conn) = self.conn.get() {
            match conn.clone().close().await {
                Ok(()) => info!("Database connection closed"),
                Err(e) => warn!("Failed to close database connection: {}", e),
            }
        }
    }

    async fn enquiry_repo(&self) -> Result<repositories::enquiry::EnquiryRepository, StorageError> {
        let conn = self.conn().await?;
        Ok(repositories::enquiry::EnquiryRepository::new(conn.clone()))
    }

    pub async fn insert_enquiry(&self, enquiry: &NewEnquiry) -> Result<Enquiry, StorageError> {
        Ok(self.enquiry_repo().await?.insert(enquiry).await?)
    }

    pub async fn recent_enquiries(&self, limit: u64) -> Result<Vec<Enquiry>, StorageError> {
        Ok(self.enquiry_repo().await?.recent(limit).await?)
    }

    pub async fn count_enquiries(&self) -> Result<u64, StorageError> {
        Ok(self.enquiry_repo().await?.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings() -> DatabaseConfig {
        let dir = std::env::temp_dir().join(format!("ld-api-store-{}", uuid::Uuid::new_v4()));
        DatabaseConfig {
            url: Some(format!("sqlite:{}", dir.display())),
            name: Some("appdb".to_string()),
            ..DatabaseConfig::default()
        }
    }

    fn sample(name: &str) -> NewEnquiry {
        NewEnquiry {
            name: name.to_string(),
            email: "lead@example.com".to_string(),
            phone: None,
            company: Some("Acme".to_string()),
            service: None,
            message: "Please call me back".to_string(),
            consent: true,
            source: None,
        }
    }

    #[tokio::test]
    async fn test_unconfigured_store_fails_on_first_use() {
        let store = Store::new(DatabaseConfig::default());
        assert!(!store.is_configured());

        let err = store.count_enquiries().await.unwrap_err();
        assert!(matches!(err, StorageError::NotConfigured));
        assert!(!store.is_connected());
    }

    #[tokio::test]
    async fn test_non_sqlite_url_is_rejected_without_touching_disk() {
        let dir = format!("ld-api-foreign-{}", uuid::Uuid::new_v4());
        for url in [
            format!("postgres:///{dir}/db"),
            format!("mongodb://localhost:27017/{dir}"),
        ] {
            let store = Store::new(DatabaseConfig {
                url: Some(url.clone()),
                name: Some("appdb".to_string()),
                ..DatabaseConfig::default()
            });

            let err = store.count_enquiries().await.unwrap_err();
            match err {
                StorageError::Connection(msg) => assert!(msg.contains("unsupported storage url")),
                other => panic!("unexpected error for {url}: {other:?}"),
            }
            assert!(!store.is_connected());
        }

        assert!(!Path::new("postgres:").exists());
        assert!(!Path::new("mongodb:").exists());
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_equal_timestamps() {
        let store = Store::connect(temp_settings()).await.unwrap();

        let stored = store.insert_enquiry(&sample("Ada")).await.unwrap();
        assert!(!stored.id.is_empty());
        assert_eq!(stored.created_at, stored.updated_at);
        assert_eq!(stored.company.as_deref(), Some("Acme"));

        assert_eq!(store.count_enquiries().await.unwrap(), 1);
        store.close().await;
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_limited() {
        let store = Store::connect(temp_settings()).await.unwrap();

        for name in ["First", "Second", "Third"] {
            store.insert_enquiry(&sample(name)).await.unwrap();
        }

        let all = store.recent_enquiries(10).await.unwrap();
        let names: Vec<&str> = all.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Third", "Second", "First"]);

        let one = store.recent_enquiries(1).await.unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].name, "Third");
    }

    #[tokio::test]
    async fn test_collections_lists_enquiry_table() {
        let store = Store::connect(temp_settings()).await.unwrap();
        store.ping().await.unwrap();
        assert_eq!(store.collections().await.unwrap(), vec!["enquiry".to_string()]);
    }
}
