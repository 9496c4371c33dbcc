//! Memoization layer shared by the upstream client and the catalog engine
//!
//! One [`MemoCache`] is built at startup and handed to every component that
//! memoizes, so tests can construct and reset their own.

mod coalesce;
mod memo;

pub use coalesce::Coalescer;
pub use memo::{MemoCache, DEFAULT_TTL};

use crate::catalog::{CatalogEntry, Page};
use std::sync::Arc;

/// Values stored in the shared cache.
#[derive(Debug, Clone)]
pub enum CacheValue {
    /// Raw upstream response body
    Body(Arc<serde_json::Value>),
    /// Fully ordered generation sequence
    Sequence(Arc<Vec<CatalogEntry>>),
    /// One page of name-search results
    SearchPage(Arc<Page<CatalogEntry>>),
}

/// The cache type shared across the service.
pub type SharedCache = MemoCache<CacheValue>;
