//! Configuration management

use anyhow::{Context, Result};

use crate::services::travel_time::MatrixConfig;

/// Scheduling-core configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Fixed start/end point of every day route (the groomer's home base).
    pub base_location: String,

    /// Distance-matrix service URL (optional; the deterministic fallback
    /// estimator is used when unset or unreachable).
    pub matrix_api_url: Option<String>,

    /// Distance-matrix request timeout in seconds.
    pub matrix_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let base_location = std::env::var("BASE_LOCATION")
            .context("BASE_LOCATION must be set — the street address routes start and end at")?;

        if base_location.trim().is_empty() {
            anyhow::bail!("BASE_LOCATION must not be blank");
        }

        let matrix_api_url = std::env::var("MATRIX_API_URL").ok();

        let matrix_timeout_seconds = match std::env::var("MATRIX_TIMEOUT_SECONDS") {
            Ok(raw) => raw
                .parse()
                .context("MATRIX_TIMEOUT_SECONDS must be a whole number of seconds")?,
            Err(_) => MatrixConfig::default().timeout_seconds,
        };

        Ok(Self {
            base_location,
            matrix_api_url,
            matrix_timeout_seconds,
        })
    }

    /// Matrix client config, when a live service is configured.
    pub fn matrix_config(&self) -> Option<MatrixConfig> {
        self.matrix_api_url.as_ref().map(|url| MatrixConfig {
            base_url: url.clone(),
            timeout_seconds: self.matrix_timeout_seconds,
        })
    }
}
