use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Deployment configuration for the identity backend connection.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the identity service (scheme + host)
    pub endpoint: String,
    /// Platform identifier sent with every request (e.g. an app bundle id)
    pub platform_id: String,
    /// Project identifier sent with every request
    pub project_id: String,
    /// Whole-request timeout applied to every backend call
    pub timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let endpoint = std::env::var("IDENTITY_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let project_id = std::env::var("IDENTITY_PROJECT_ID").unwrap_or_default();

        let platform_id =
            std::env::var("IDENTITY_PLATFORM_ID").unwrap_or_else(|_| "dev".to_string());

        let timeout = std::env::var("IDENTITY_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs);

        let config = Config {
            endpoint,
            platform_id,
            project_id,
            timeout,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "IDENTITY_ENDPOINT must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }

        if self.project_id.is_empty() {
            return Err(ConfigError::ValidationError(
                "IDENTITY_PROJECT_ID cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
