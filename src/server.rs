//! HTTP server assembly
//!
//! Wires the shared cache, upstream client, catalog engine and collection
//! stores into one axum application and runs it until shutdown.

use crate::api::build_app;
use crate::cache::SharedCache;
use crate::catalog::{CatalogEngine, CatalogState};
use crate::collection::{CaughtStore, CollectionState, TeamStore};
use crate::config::AppConfig;
use crate::error::Result;
use crate::upstream::UpstreamClient;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Fully wired service
pub struct Server {
    config: AppConfig,
    cache: Arc<SharedCache>,
    engine: Arc<CatalogEngine>,
    caught: Arc<CaughtStore>,
    teams: Arc<TeamStore>,
}

impl Server {
    /// Validate `config` and build every component
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;

        let cache = Arc::new(SharedCache::new(config.cache.ttl()));
        let client = UpstreamClient::from_config(&config.upstream, cache.clone())?;
        let engine = Arc::new(CatalogEngine::new(
            client,
            cache.clone(),
            config.catalog.clone(),
        ));

        Ok(Self {
            config,
            cache,
            engine,
            caught: Arc::new(CaughtStore::new()),
            teams: Arc::new(TeamStore::new()),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<SharedCache> {
        &self.cache
    }

    pub fn engine(&self) -> &Arc<CatalogEngine> {
        &self.engine
    }

    /// The complete router with CORS and tracing layers
    pub fn router(&self) -> Router {
        build_app(
            CatalogState {
                engine: self.engine.clone(),
            },
            CollectionState {
                caught: self.caught.clone(),
                teams: self.teams.clone(),
            },
            &self.config.server.cors_origins,
        )
    }

    /// Bind the configured host and port
    pub async fn bind(&self) -> Result<TcpListener> {
        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        Ok(TcpListener::bind(&addr).await?)
    }

    /// Serve on `listener` until `shutdown` resolves
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local: SocketAddr = listener.local_addr()?;
        tracing::info!("Pokedex Explorer listening on http://{}", local);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }

    /// Bind and serve until `shutdown` resolves
    pub async fn run<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }
}

/// Builder for Server
pub struct ServerBuilder {
    config: AppConfig,
}

impl ServerBuilder {
    /// Create a new builder with default config
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Set the configuration
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the listen host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.server.host = host.into();
        self
    }

    /// Set the listen port
    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    /// Override the upstream base URL
    pub fn upstream_url(mut self, url: impl Into<String>) -> Self {
        self.config.upstream.base_url = url.into();
        self
    }

    /// Build the server
    pub fn build(self) -> Result<Server> {
        Server::new(self.config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
