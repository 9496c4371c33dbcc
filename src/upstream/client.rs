//! Memoizing PokeAPI client

use super::transport::{HttpTransport, Transport};
use super::types::GenerationRoster;
use crate::cache::{CacheValue, SharedCache};
use crate::config::UpstreamConfig;
use crate::error::Result;
use serde::Deserialize;
use std::sync::Arc;

/// Thin client over the upstream catalog.
///
/// Every read except the generation roster is memoized in the shared cache
/// under a key built from the operation and its arguments. Failures are
/// returned as-is; retrying is left to callers.
#[derive(Clone)]
pub struct UpstreamClient {
    transport: Arc<dyn Transport>,
    cache: Arc<SharedCache>,
    base_url: String,
}

impl UpstreamClient {
    /// Create a client over an arbitrary transport
    pub fn new(
        transport: Arc<dyn Transport>,
        cache: Arc<SharedCache>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            cache,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client that talks HTTP to the configured upstream
    pub fn from_config(config: &UpstreamConfig, cache: Arc<SharedCache>) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config)?);
        Ok(Self::new(transport, cache, &config.base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `/pokemon?limit&offset`
    pub async fn list_entries(&self, limit: usize, offset: usize) -> Result<Arc<serde_json::Value>> {
        let url = format!("{}/pokemon?limit={}&offset={}", self.base_url, limit, offset);
        self.fetch_memoized(format!("pokemon-list:{}:{}", limit, offset), &url)
            .await
    }

    /// `/pokemon/{id}`; `id` is a number or a lowercase name
    pub async fn entry_detail(&self, id: &str) -> Result<Arc<serde_json::Value>> {
        let url = format!("{}/pokemon/{}", self.base_url, id);
        self.fetch_memoized(format!("pokemon:{}", id), &url).await
    }

    /// `/pokemon-species/{id}`
    pub async fn species_info(&self, id: &str) -> Result<Arc<serde_json::Value>> {
        let url = format!("{}/pokemon-species/{}", self.base_url, id);
        self.fetch_memoized(format!("pokemon-species:{}", id), &url)
            .await
    }

    /// Evolution chain at an absolute URL taken from a species body
    pub async fn lineage_graph(&self, url: &str) -> Result<Arc<serde_json::Value>> {
        self.fetch_memoized(format!("evolution-chain:{}", url), url)
            .await
    }

    /// `/generation/{n}` species roster. Not memoized: only the aggregated
    /// sequence built from it is.
    pub async fn generation_roster(&self, generation: u8) -> Result<GenerationRoster> {
        let url = format!("{}/generation/{}", self.base_url, generation);
        let body = self.transport.get_json(&url).await?;
        Ok(GenerationRoster::deserialize(&body)?)
    }

    async fn fetch_memoized(&self, key: String, url: &str) -> Result<Arc<serde_json::Value>> {
        if let Some(CacheValue::Body(body)) = self.cache.get(&key).await {
            tracing::debug!(key = %key, "Upstream cache hit");
            return Ok(body);
        }

        tracing::debug!(key = %key, url, "Upstream cache miss");
        let body = Arc::new(self.transport.get_json(url).await.map_err(|e| {
            tracing::warn!(url, "Upstream request failed: {}", e);
            e
        })?);
        self.cache
            .set_default(key, CacheValue::Body(body.clone()))
            .await;
        Ok(body)
    }
}

/// Decode a cached body into one of the typed views.
pub fn decode<'a, T: Deserialize<'a>>(body: &'a serde_json::Value) -> Result<T> {
    Ok(T::deserialize(body)?)
}
