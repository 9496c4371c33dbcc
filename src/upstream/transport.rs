//! Outbound HTTP transport
//!
//! The client never talks to reqwest directly; it goes through [`Transport`]
//! so the whole memoization and aggregation stack can run against canned
//! responses.

use crate::config::UpstreamConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;

/// Fetches a JSON document by absolute URL.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and return the decoded body.
    ///
    /// Non-2xx answers map to `Error::Upstream` with the status attached;
    /// connection failures map to `Error::Upstream` without one.
    async fn get_json(&self, url: &str) -> Result<serde_json::Value>;
}

/// reqwest-backed transport used in production.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the configured timeouts
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(concat!("pokedex-explorer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream(
                Some(status.as_u16()),
                format!("GET {} returned {}: {}", url, status, body.trim()),
            ));
        }

        response.json().await.map_err(|e| {
            Error::upstream(
                Some(status.as_u16()),
                format!("GET {} returned an unreadable body: {}", url, e),
            )
        })
    }
}
