//! Pokedex Explorer - generation-ordered species catalog service
//!
//! Pokedex Explorer sits between a browser client and the public PokeAPI
//! catalog. Its core job is turning a generation's unordered species roster
//! into one stable, evolution-aware sequence that can be paged cheaply.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     HTTP API (axum)                           │
//! │   /api/pokemon*            /api/caught*   /api/teams*         │
//! └───────┬──────────────────────────┬───────────────────────────┘
//!         │                          │
//! ┌───────▼──────────────┐   ┌───────▼──────────────┐
//! │   Catalog Engine     │   │   Collection Stores  │
//! │  - roster fan-out    │   │  - caught records    │
//! │  - family grouping   │   │  - teams (max 6)     │
//! │  - ordering, paging  │   └──────────────────────┘
//! └───────┬──────────────┘
//!         │
//! ┌───────▼──────────────┐   ┌──────────────────────┐
//! │   Upstream Client    │──▶│   Memo Cache (TTL)   │
//! │  - reqwest transport │   │  - bodies, sequences │
//! └──────────────────────┘   └──────────────────────┘
//! ```
//!
//! ## Ordering
//!
//! Within a generation, starter families come first in their canonical
//! order, remaining families follow by their lowest catalog number, each
//! family lists its base form first, and species whose evolution chain could
//! not be resolved are appended last.
//!
//! ## Modules
//!
//! - [`catalog`]: Generation aggregation, search and detail
//! - [`upstream`]: PokeAPI client and transport
//! - [`cache`]: TTL memo cache and single-flight coalescing
//! - [`collection`]: Caught records and teams
//! - [`api`]: Router assembly and response envelope
//! - [`server`]: Service wiring and lifecycle
//! - [`config`]: Configuration management

pub mod api;
pub mod cache;
pub mod catalog;
pub mod collection;
pub mod config;
pub mod error;
pub mod server;
pub mod upstream;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use server::{Server, ServerBuilder};
