//! Typed views over upstream response bodies
//!
//! Bodies are cached as opaque JSON; only the fields the catalog needs are
//! read back out of them. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Minimal roster reference: a name and the upstream URL it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// `/generation/{n}` body
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRoster {
    pub pokemon_species: Vec<CatalogEntry>,
}

/// `/pokemon?limit&offset` body
#[derive(Debug, Clone, Deserialize)]
pub struct EntryList {
    pub count: usize,
    pub results: Vec<CatalogEntry>,
}

/// A reference that only needs its name read.
#[derive(Debug, Clone, Deserialize)]
pub struct NameRef {
    pub name: String,
}

/// A reference that only needs its URL read.
#[derive(Debug, Clone, Deserialize)]
pub struct UrlRef {
    pub url: String,
}

/// `/pokemon-species/{id}` body
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesInfo {
    #[serde(default)]
    pub evolves_from_species: Option<NameRef>,
    #[serde(default)]
    pub evolution_chain: Option<UrlRef>,
}

/// Evolution chain body; only the root link is read.
#[derive(Debug, Clone, Deserialize)]
pub struct LineageGraph {
    pub chain: ChainLink,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainLink {
    pub species: NameRef,
}

impl LineageGraph {
    /// Name of the species with no predecessor in this lineage.
    pub fn root_name(&self) -> &str {
        &self.chain.species.name
    }
}
