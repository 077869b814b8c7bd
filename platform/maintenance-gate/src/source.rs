use async_trait::async_trait;
use thiserror::Error;

use crate::models::MaintenanceConfig;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Unexpected status {status} from maintenance endpoint")]
    Status { status: u16 },

    #[error("Failed to decode maintenance config: {0}")]
    Decode(String),
}

/// Collaborator that produces fresh maintenance configuration snapshots
#[async_trait]
pub trait MaintenanceSource: Send + Sync {
    async fn fetch(&self) -> Result<MaintenanceConfig, SourceError>;
}

/// Source that always returns the same configuration (dev and tests)
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    config: MaintenanceConfig,
}

impl StaticSource {
    pub fn new(config: MaintenanceConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl MaintenanceSource for StaticSource {
    async fn fetch(&self) -> Result<MaintenanceConfig, SourceError> {
        Ok(self.config.clone())
    }
}

/// Source that GETs the configuration as JSON from the admin service
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl MaintenanceSource for HttpSource {
    async fn fetch(&self) -> Result<MaintenanceConfig, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status().as_u16(),
            });
        }

        response
            .json::<MaintenanceConfig>()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))
    }
}
