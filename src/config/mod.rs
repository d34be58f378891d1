//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CALL_ANALYZER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use call_analyzer::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod error;
mod server;
mod storage;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Plain environment variable accepted as the API credential.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, HTTP limits)
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat-completion provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Record log configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Uses `GROQ_API_KEY` as the default API key when set
    /// 3. Reads environment variables with `CALL_ANALYZER` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `CALL_ANALYZER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CALL_ANALYZER__AI__MODEL=...` -> `ai.model = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            builder = builder.set_default("ai.api_key", key)?;
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("CALL_ANALYZER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        API_KEY_ENV,
        "CALL_ANALYZER__AI__API_KEY",
        "CALL_ANALYZER__AI__MODEL",
        "CALL_ANALYZER__AI__TEMPERATURE",
        "CALL_ANALYZER__SERVER__PORT",
        "CALL_ANALYZER__SERVER__ENVIRONMENT",
        "CALL_ANALYZER__STORAGE__LOG_PATH",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_plain_api_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(API_KEY_ENV, "gsk_plain");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.api_key.as_deref(), Some("gsk_plain"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prefixed_key_overrides_plain_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(API_KEY_ENV, "gsk_plain");
        env::set_var("CALL_ANALYZER__AI__API_KEY", "gsk_prefixed");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.api_key.as_deref(), Some("gsk_prefixed"));
    }

    #[test]
    fn test_defaults_without_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(API_KEY_ENV, "gsk_plain");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.ai.model, "llama-3.3-70b-versatile");
        assert_eq!(config.storage.log_path, PathBuf::from("call_analysis.csv"));
    }

    #[test]
    fn test_custom_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(API_KEY_ENV, "gsk_plain");
        env::set_var("CALL_ANALYZER__SERVER__PORT", "3000");
        env::set_var("CALL_ANALYZER__SERVER__ENVIRONMENT", "production");
        env::set_var("CALL_ANALYZER__AI__MODEL", "llama-3.1-8b-instant");
        env::set_var("CALL_ANALYZER__AI__TEMPERATURE", "0.5");
        env::set_var("CALL_ANALYZER__STORAGE__LOG_PATH", "logs/calls.csv");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.ai.model, "llama-3.1-8b-instant");
        assert_eq!(config.ai.temperature, 0.5);
        assert_eq!(config.storage.log_path, PathBuf::from("logs/calls.csv"));
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }
}
