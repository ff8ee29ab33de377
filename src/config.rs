//! Registry endpoint configuration.
//!
//! Settings are layered: compiled defaults, then an optional
//! `fleetdeck.toml` in the working directory, then `FLEETDECK_*`
//! environment variables.

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default registry endpoint.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8443/api/v1/";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration file consulted when present.
const CONFIG_FILE: &str = "fleetdeck.toml";

/// Environment variable prefix.
const ENV_PREFIX: &str = "FLEETDECK_";

/// Error raised while loading configuration.
#[derive(Debug, Error)]
#[error("invalid registry configuration: {0}")]
pub struct ConfigError(Box<figment::Error>);

/// Connection settings for the remote fleet registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    base_url: String,
    timeout_secs: u64,
    bearer_token: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            bearer_token: None,
        }
    }
}

impl RegistryConfig {
    /// Loads configuration from defaults, file, and environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a layer fails to parse or the merged
    /// settings do not extract.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Self::default()))
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .extract()
            .map_err(|error| ConfigError(Box::new(error)))
    }

    /// Returns the registry base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the bearer token, if configured.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::RegistryConfig;

    #[test]
    fn defaults_apply_without_file_or_env() {
        figment::Jail::expect_with(|_jail| {
            let config = RegistryConfig::load().map_err(|error| error.to_string())?;
            assert_eq!(config.base_url(), "http://127.0.0.1:8443/api/v1/");
            assert_eq!(config.timeout().as_secs(), 30);
            assert!(config.bearer_token().is_none());
            Ok(())
        });
    }

    #[test]
    fn file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "fleetdeck.toml",
                r#"
                    base_url = "https://fleet.example.com/api/v1/"
                    timeout_secs = 5
                "#,
            )?;
            let config = RegistryConfig::load().map_err(|error| error.to_string())?;
            assert_eq!(config.base_url(), "https://fleet.example.com/api/v1/");
            assert_eq!(config.timeout().as_secs(), 5);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("fleetdeck.toml", r#"timeout_secs = 5"#)?;
            jail.set_env("FLEETDECK_TIMEOUT_SECS", "60");
            jail.set_env("FLEETDECK_BEARER_TOKEN", "tok-123");
            let config = RegistryConfig::load().map_err(|error| error.to_string())?;
            assert_eq!(config.timeout().as_secs(), 60);
            assert_eq!(config.bearer_token(), Some("tok-123"));
            Ok(())
        });
    }
}
