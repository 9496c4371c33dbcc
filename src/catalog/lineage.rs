//! Per-species lineage enrichment

use crate::upstream::CatalogEntry;

/// Catalog number used when the real one cannot be determined. Sorts after
/// every parsable number.
pub const SENTINEL_CATALOG_NUMBER: u32 = 999_999;

/// A roster entry enriched with its catalog number and lineage references.
///
/// Lives for a single generation build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageInfo {
    pub name: String,
    pub url: String,
    pub catalog_number: u32,
    pub evolves_from_name: Option<String>,
    pub lineage_graph_url: Option<String>,
}

impl LineageInfo {
    /// Enrichment failed: keep the entry, with the sentinel number and no
    /// lineage.
    pub fn unresolved(entry: &CatalogEntry) -> Self {
        Self {
            name: entry.name.clone(),
            url: entry.url.clone(),
            catalog_number: SENTINEL_CATALOG_NUMBER,
            evolves_from_name: None,
            lineage_graph_url: None,
        }
    }
}

impl From<LineageInfo> for CatalogEntry {
    fn from(info: LineageInfo) -> Self {
        CatalogEntry {
            name: info.name,
            url: info.url,
        }
    }
}

/// Read the catalog number from the last non-empty path segment of a species
/// URL, e.g. `.../pokemon-species/25/` → 25.
pub fn parse_catalog_number(url: &str) -> Option<u32> {
    url.split('/')
        .filter(|segment| !segment.is_empty())
        .last()
        .and_then(|segment| segment.parse().ok())
}

/// Catalog number for `url`, or the sentinel when it has none.
pub fn catalog_number_or_sentinel(url: &str) -> u32 {
    parse_catalog_number(url).unwrap_or(SENTINEL_CATALOG_NUMBER)
}
