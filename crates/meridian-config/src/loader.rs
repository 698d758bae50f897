//! Configuration loader with layered sources.

use crate::{AppConfig, StorageBackend};
use config::{Config, ConfigError, Environment, File};
use meridian_core::MeridianError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Prefix of environment variables that override file configuration.
pub const ENV_PREFIX: &str = "MERIDIAN";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `{config_dir}/default.toml` - Default values
    /// 2. `{config_dir}/{environment}.toml` - Environment-specific overrides
    /// 3. `{config_dir}/local.toml` - Local overrides, not committed
    /// 4. Environment variables with `MERIDIAN_` prefix and `__` nesting
    pub fn new(config_dir: impl Into<String>) -> Result<Self, MeridianError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, MeridianError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), MeridianError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, MeridianError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var(format!("{ENV_PREFIX}_ENVIRONMENT"))
            .unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{config_dir}/{name}.toml");
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder
            .set_override("app.environment", environment.clone())
            .map_err(config_error_to_meridian_error)?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            );

        let config = builder.build().map_err(config_error_to_meridian_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_meridian_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Gets a specific configuration value by dotted key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

/// Rejects configurations the server cannot start with.
pub fn validate_config(config: &AppConfig) -> Result<(), MeridianError> {
    if config.database.backend == StorageBackend::Mysql {
        if config.database.url.trim().is_empty() {
            return Err(MeridianError::Configuration(
                "Database URL is required for the mysql backend".to_string(),
            ));
        }
        if config.database.max_connections == 0 {
            return Err(MeridianError::Configuration(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if config.database.min_connections > config.database.max_connections {
            return Err(MeridianError::Configuration(
                "database.min_connections exceeds database.max_connections".to_string(),
            ));
        }
    }

    if config.security.password_hash_cost == 0 {
        return Err(MeridianError::Configuration(
            "security.password_hash_cost must be at least 1".to_string(),
        ));
    }

    if config.app.environment == "production" && config.database.backend == StorageBackend::Memory {
        warn!("In-memory storage configured in production; data will not survive a restart");
    }

    Ok(())
}

fn config_error_to_meridian_error(err: ConfigError) -> MeridianError {
    MeridianError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogFormat;
    use std::fs;

    #[tokio::test]
    async fn test_missing_directory_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let loader = ConfigLoader::new(missing.to_string_lossy()).unwrap();

        let config = loader.get().await;
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.app.name, "meridian");
    }

    #[tokio::test]
    async fn test_default_file_is_layered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
            [server]
            port = 9000

            [database]
            backend = "memory"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();
        fs::write(
            dir.path().join("local.toml"),
            r#"
            [server]
            port = 9100
            "#,
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy()).unwrap();
        let config = loader.get().await;

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(loader.get_value::<u16>("server.port").await, Some(9100));
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        fs::write(&path, "[server]\nport = 7000\n").unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy()).unwrap();
        assert_eq!(loader.get().await.server.port, 7000);

        fs::write(&path, "[server]\nport = 7001\n").unwrap();
        loader.reload().await.unwrap();
        assert_eq!(loader.get().await.server.port, 7001);
    }

    #[tokio::test]
    async fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[database]\nurl = \"\"\n",
        )
        .unwrap();

        let err = ConfigLoader::new(dir.path().to_string_lossy()).err().unwrap();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_memory_backend_skips_url_check() {
        let mut config = AppConfig::default();
        config.database.backend = StorageBackend::Memory;
        config.database.url = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_pool_bounds_are_checked() {
        let mut config = AppConfig::default();
        config.database.min_connections = 20;
        config.database.max_connections = 5;
        assert!(validate_config(&config).is_err());
    }
}
