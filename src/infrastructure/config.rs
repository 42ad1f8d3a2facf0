//! Configuration infrastructure
//!
//! Configuration is loaded from a JSON file under the user's config
//! directory and then overlaid with environment variables. The environment
//! wins for credentials and the base URL so deployments can stay file-free.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

pub const ENV_CLIENT_ID: &str = "OZON_CLIENT_ID";
pub const ENV_API_KEY: &str = "OZON_API_KEY";
pub const ENV_BASE_URL: &str = "OZON_BASE_URL";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Marketplace API access settings
    pub api: ApiConfig,

    /// Synchronization behavior settings
    pub sync: SyncConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Marketplace API access settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Seller API base URL
    pub base_url: String,

    /// Public storefront URL, used for product links
    pub storefront_url: String,

    /// Seller account client id (opaque; usually from OZON_CLIENT_ID)
    pub client_id: String,

    /// Seller API key (opaque; usually from OZON_API_KEY)
    pub api_key: String,

    /// Per-call timeout in seconds
    pub request_timeout_seconds: u64,

    /// Request rate cap toward the seller API
    pub max_requests_per_second: u32,
}

/// Synchronization behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Maximum items requested from the listing endpoint per refresh
    pub listing_limit: u32,

    /// Maximum concurrent description lookups
    pub description_max_concurrent: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Also write daily-rotated log files next to the executable
    pub file_output: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            sync: SyncConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-seller.ozon.ru".to_string(),
            storefront_url: "https://www.ozon.ru".to_string(),
            client_id: String::new(),
            api_key: String::new(),
            request_timeout_seconds: 10,
            max_requests_per_second: 5,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            listing_limit: 20,
            description_max_concurrent: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_output: false,
        }
    }
}

impl AppConfig {
    /// Overlay environment variables onto the loaded configuration.
    ///
    /// The original deployment was environment-only, so the environment
    /// stays authoritative over file contents.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(client_id) = std::env::var(ENV_CLIENT_ID) {
            self.api.client_id = client_id;
        }
        if let Ok(api_key) = std::env::var(ENV_API_KEY) {
            self.api.api_key = api_key;
        }
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            self.api.base_url = base_url;
        }
    }

    /// Whether both credential values are present.
    pub fn has_credentials(&self) -> bool {
        !self.api.client_id.is_empty() && !self.api.api_key.is_empty()
    }
}

/// Loads and persists the configuration file
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Manager for the default config location under the user config dir.
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join("ozon-catalog-sync");
        Ok(Self {
            config_path: config_dir.join("config.json"),
        })
    }

    /// Manager for an explicit config file path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Load the configuration, creating a default file on first run, then
    /// apply environment overrides.
    pub async fn initialize(&self) -> Result<AppConfig> {
        let mut config = self.load_config().await?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from file, creating a default if it doesn't exist.
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!(
                "Configuration file not found, creating default: {:?}",
                self.config_path
            );
            let default_config = AppConfig::default();
            self.save_config(&default_config).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .context("Failed to read configuration file")?;

        let config: AppConfig = serde_json::from_str(&content).with_context(|| {
            format!("Configuration file is not valid: {:?}", self.config_path)
        })?;

        info!("Loaded configuration from: {:?}", self.config_path);
        Ok(config)
    }

    /// Save configuration to file.
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, content)
            .await
            .context("Failed to write configuration file")?;

        info!("Saved configuration to: {:?}", self.config_path);
        Ok(())
    }

    /// Get the configuration file path.
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "https://api-seller.ozon.ru");
        assert_eq!(config.sync.listing_limit, 20);
        assert_eq!(config.api.request_timeout_seconds, 10);
        assert!(!config.has_credentials());
    }

    #[tokio::test]
    async fn test_first_run_creates_default_file() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("config.json"));

        let config = manager.load_config().await.unwrap();
        assert!(manager.config_path().exists());
        assert_eq!(config.sync.listing_limit, 20);
    }

    #[tokio::test]
    async fn test_save_and_reload_round_trip() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("config.json"));

        let mut config = AppConfig::default();
        config.sync.listing_limit = 50;
        config.api.client_id = "987654".to_string();
        manager.save_config(&config).await.unwrap();

        let reloaded = manager.load_config().await.unwrap();
        assert_eq!(reloaded.sync.listing_limit, 50);
        assert_eq!(reloaded.api.client_id, "987654");
    }

    #[tokio::test]
    async fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let manager = ConfigManager::with_path(path);
        assert!(manager.load_config().await.is_err());
    }
}
