//! Upstream catalog access (PokeAPI)
//!
//! Four memoized reads (entry list, entry detail, species info, evolution
//! chain) plus the un-memoized generation roster used by the aggregation
//! engine.

mod client;
mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{decode, UpstreamClient};
pub use transport::{HttpTransport, Transport};
pub use types::{CatalogEntry, EntryList, GenerationRoster, LineageGraph, SpeciesInfo};
