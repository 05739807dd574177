//! Application configuration loaded from environment variables.

use postify_infra::{FileStoreConfig, JwtInspectorConfig, RemoteConfig};

use crate::telemetry::TelemetryConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub remote: RemoteConfig,
    pub credentials: FileStoreConfig,
    pub tokens: JwtInspectorConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            remote: RemoteConfig::from_env(),
            credentials: FileStoreConfig::from_env(),
            tokens: JwtInspectorConfig::from_env(),
            telemetry: TelemetryConfig::from_env(),
        }
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.remote.base_url = url;
        }
        self
    }
}
