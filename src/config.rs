use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub email: EmailConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// "pretty" or "json"
    pub log_format: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Storage connection string, e.g. `sqlite:data` or `sqlite:data/ld.db`.
    pub url: Option<String>,

    /// Database name inside the storage location given by `url`.
    pub name: Option<String>,

    /// Maximum database connections (default: 5)
    pub max_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_connections: u32,

    pub connect_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            name: None,
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 10,
        }
    }
}

impl DatabaseConfig {
    /// Resolves the sqlx connection string, or `None` when no url is configured.
    ///
    /// A bare SQLite location (`sqlite:data`) combined with a `name` resolves to
    /// `sqlite:data/<name>.db`. In-memory urls and urls that already name a file
    /// are used verbatim.
    #[must_use]
    pub fn connection_string(&self) -> Option<String> {
        let url = self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;

        if url.contains(":memory:") || url.contains("mode=memory") {
            return Some(url.to_string());
        }

        let Some(path) = url.strip_prefix("sqlite:") else {
            return Some(url.to_string());
        };
        let path = path.trim_start_matches("//");

        match self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) if !path.ends_with(".db") && !path.contains('?') => {
                let dir = path.trim_end_matches('/');
                if dir.is_empty() {
                    Some(format!("sqlite:{name}.db"))
                } else {
                    Some(format!("sqlite:{dir}/{name}.db"))
                }
            }
            _ => Some(format!("sqlite:{path}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub api_key: Option<String>,

    /// Recipient of enquiry notifications.
    pub notify_email: Option<String>,

    /// Sender address. Falls back to `notify_email` when unset.
    pub from_email: Option<String>,

    pub from_name: String,

    pub api_base_url: String,

    /// Request timeout in seconds (default: 8)
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            notify_email: None,
            from_email: None,
            from_name: "L&D Website".to_string(),
            api_base_url: "https://api.sendgrid.com".to_string(),
            timeout_seconds: 8,
        }
    }
}

impl EmailConfig {
    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        non_empty(self.from_email.as_deref()).or_else(|| non_empty(self.notify_email.as_deref()))
    }

    /// True when key, recipient and sender are all present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        non_empty(self.api_key.as_deref()).is_some()
            && non_empty(self.notify_email.as_deref()).is_some()
            && self.sender().is_some()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Loads the config file (if any), then applies `.env` and process
    /// environment overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Applies the recognised environment variables on top of the current values.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = Some(url);
        }
        if let Some(name) = lookup("DATABASE_NAME") {
            self.database.name = Some(name);
        }
        if let Some(key) = lookup("SENDGRID_API_KEY") {
            self.email.api_key = Some(key);
        }
        if let Some(to) = lookup("NOTIFY_EMAIL") {
            self.email.notify_email = Some(to);
        }
        if let Some(from) = lookup("FROM_EMAIL") {
            self.email.from_email = Some(from);
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.general.log_level = level;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("ld-api").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".ld-api").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let mut config = Self::default();
            config.database.url = Some("sqlite:data".to_string());
            config.database.name = Some("appdb".to_string());
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.server.cors_allowed_origins.is_empty() {
            anyhow::bail!("At least one CORS origin must be configured (use \"*\" for any)");
        }

        if self.email.timeout_seconds == 0 {
            anyhow::bail!("Email timeout must be > 0 seconds");
        }

        if self.database.max_connections < self.database.min_connections {
            anyhow::bail!("database.max_connections cannot be below database.min_connections");
        }

        for (label, address) in [
            ("notify_email", self.email.notify_email.as_deref()),
            ("from_email", self.email.from_email.as_deref()),
        ] {
            if let Some(address) = non_empty(address) {
                if crate::models::enquiry::parse_bare_address(address).is_none() {
                    anyhow::bail!("email.{label} is not a valid email address: {address}");
                }
            }
        }

        Ok(())
    }
}
