//! Generation catalog aggregation
//!
//! Given a generation number, builds one deterministically ordered species
//! sequence: starter families first, remaining families by their lowest
//! catalog number, base form first within each family, species without a
//! resolvable evolution chain last. The sequence is cached whole and paged on
//! demand.

mod engine;
pub mod family;
mod handler;
pub mod lineage;
mod page;
pub mod starters;

pub use crate::upstream::CatalogEntry;
pub use engine::{sequence_cache_key, CatalogEngine, SEQUENCE_CACHE_VERSION};
pub use handler::{catalog_router, CatalogState};
pub use lineage::{LineageInfo, SENTINEL_CATALOG_NUMBER};
pub use page::{paginate, Page};
pub use starters::{is_valid_generation, starters_for};
