//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Record store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Exchange rate provider configuration.
    #[serde(default)]
    pub rates: RatesConfig,
}

/// Record store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Storage backend to use.
    #[serde(default = "default_backend")]
    pub backend: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
        }
    }
}

fn default_backend() -> String {
    "memory".to_string()
}

/// Exchange rate provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Base URL of the online rate-quote service.
    #[serde(default = "default_provider_url")]
    pub provider_url: String,
    /// Request timeout in seconds for the provider.
    ///
    /// A timed-out fetch is treated like any other provider failure and
    /// triggers fallback-table substitution.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            provider_url: default_provider_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_provider_url() -> String {
    "https://open.er-api.com/v6/latest".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("VANTRA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
