//! Link liveness checks.

use std::time::Duration;

use async_trait::async_trait;
use learning_core::{FetchError, UrlValidator};
use reqwest::{Client, StatusCode};
use tracing::debug;

/// Validates a link with a HEAD request that follows redirects.
///
/// Only a final `200 OK` counts as valid. Timeouts, transport errors and any
/// other status are treated as invalid.
#[derive(Clone)]
pub struct HttpUrlValidator {
    client: Client,
}

impl HttpUrlValidator {
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; GrowWiseBot/1.0)")
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl UrlValidator for HttpUrlValidator {
    async fn is_valid(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => {
                let ok = response.status() == StatusCode::OK;
                if !ok {
                    debug!(url, status = %response.status(), "Link rejected");
                }
                ok
            }
            Err(e) => {
                debug!(url, "Link check failed: {}", e);
                false
            }
        }
    }
}
