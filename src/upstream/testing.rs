//! Canned-response transport for tests

use super::transport::Transport;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

enum Canned {
    Json(serde_json::Value),
    Status(u16),
}

struct Route {
    response: Canned,
    delay: Duration,
}

/// In-memory [`Transport`] keyed by absolute URL.
///
/// Unregistered URLs answer 404. Every call is counted per URL, and each
/// route can be given a delay to reorder fan-out completion.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, url: impl Into<String>, body: serde_json::Value) -> Self {
        self.route(url.into(), Canned::Json(body));
        self
    }

    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.route(url.into(), Canned::Status(status));
        self
    }

    /// Delay the response for `url`, which must already be registered.
    pub fn with_delay(self, url: &str, delay: Duration) -> Self {
        if let Some(route) = self.routes.lock().unwrap().get_mut(url) {
            route.delay = delay;
        }
        self
    }

    fn route(&self, url: String, response: Canned) {
        self.routes.lock().unwrap().insert(
            url,
            Route {
                response,
                delay: Duration::ZERO,
            },
        );
    }

    /// Number of requests made for `url`.
    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    /// Number of requests made across all URLs.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        *self.calls.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;

        let (response, delay) = {
            let routes = self.routes.lock().unwrap();
            match routes.get(url) {
                Some(Route {
                    response: Canned::Json(body),
                    delay,
                }) => (Ok(body.clone()), *delay),
                Some(Route {
                    response: Canned::Status(status),
                    delay,
                }) => (Err(*status), *delay),
                None => (Err(404), Duration::ZERO),
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        response.map_err(|status| Error::upstream(Some(status), format!("GET {} returned {}", url, status)))
    }
}
