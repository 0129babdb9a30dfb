//! Configuration loader with layered sources.

use crate::AppConfig;
use atrium_core::AtriumError;
use config::{Config, Environment, File};
use std::path::Path;
use tracing::{debug, info};

/// Loads the application configuration.
///
/// Configuration is loaded from multiple sources in order:
/// 1. Built-in defaults
/// 2. `{config_dir}/default.toml`
/// 3. `{config_dir}/{environment}.toml` - environment-specific overrides
/// 4. `{config_dir}/local.toml` - local overrides, not committed
/// 5. Environment variables with `ATRIUM` prefix (`ATRIUM_CACHE__ENABLED`)
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<AppConfig, AtriumError> {
        Self::load("./config")
    }

    /// Loads configuration from the specified directory.
    pub fn load(config_dir: &str) -> Result<AppConfig, AtriumError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("ATRIUM_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        let default_path = format!("{}/default.toml", config_dir);
        if Path::new(&default_path).exists() {
            debug!("Loading default config from: {}", default_path);
            builder = builder.add_source(File::with_name(&default_path).required(false));
        }

        let env_path = format!("{}/{}.toml", config_dir, environment);
        if Path::new(&env_path).exists() {
            debug!("Loading environment config from: {}", env_path);
            builder = builder.add_source(File::with_name(&env_path).required(false));
        }

        let local_path = format!("{}/local.toml", config_dir);
        if Path::new(&local_path).exists() {
            debug!("Loading local config from: {}", local_path);
            builder = builder.add_source(File::with_name(&local_path).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("ATRIUM")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| AtriumError::Configuration(e.to_string()))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| AtriumError::Configuration(e.to_string()))?;

        Self::validate(&app_config)?;

        Ok(app_config)
    }

    /// Validates critical configuration values.
    fn validate(config: &AppConfig) -> Result<(), AtriumError> {
        if config.cache.default_sliding_secs == 0 {
            return Err(AtriumError::Configuration(
                "cache.default_sliding_secs must be greater than zero".to_string(),
            ));
        }

        if config.app.environment == "production" && config.token.secret.is_empty() {
            return Err(AtriumError::Configuration(
                "token.secret must be set in production".to_string(),
            ));
        }

        Ok(())
    }
}
