//! Centralized console configuration.
//!
//! Loaded via the `config` crate from environment variables, e.g.
//! `API__BASE_URL=https://contable.example/api`.

use serde::Deserialize;

/// Console configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsoleConfig {
    /// Accounting backend settings.
    #[serde(default)]
    pub api: ApiSettings,
}

/// Where the accounting backend lives.
///
/// Handed to server functions as a request extension.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// Base URL every API path is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(
            config::Environment::default()
                .separator("__")
                .try_parsing(true),
        )
    }

    fn from_source(
        source: impl config::Source + Send + Sync + 'static,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}
