//! API configuration
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `config/default.toml`, if present
//! 3. `API_`-prefixed environment variables, `__` separating nested keys
//!    (`API_PORT=9090`, `API_PROFILE__BASE_EA=0.21`)

use std::sync::Arc;

use serde::Deserialize;

use core_kernel::{Clock, Timezone};
use domain_quote::{InstitutionProfile, InstitutionRegistry, ProfileConfig, QuoteError};

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level, overridden by `RUST_LOG`
    pub log_level: String,
    /// PostgreSQL connection string; applications are kept in memory when unset
    pub database_url: Option<String>,
    /// Timezone in which quote validity dates are computed
    pub timezone: Timezone,
    /// Pricing profile of the adapter's institution
    pub profile: ProfileConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            database_url: None,
            timezone: Timezone::default(),
            profile: ProfileConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `config/default.toml` and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config/default")
    }

    /// Loads configuration with an explicit file stem, e.g. `config/staging`
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix("API")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configured profile
    pub fn institution_profile(&self) -> Result<InstitutionProfile, QuoteError> {
        InstitutionProfile::try_from(self.profile.clone())
    }

    /// Registry holding the configured institution
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::InvalidProfile` when the configured profile is invalid
    pub fn registry(&self, clock: Arc<dyn Clock>) -> Result<InstitutionRegistry, QuoteError> {
        let mut registry = InstitutionRegistry::new(clock);
        registry.register(self.institution_profile()?)?;
        Ok(registry)
    }
}
