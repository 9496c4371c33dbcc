//! Generation catalog aggregation engine
//!
//! Builds the ordered species sequence for a generation by fanning out to the
//! upstream API, caches the whole sequence, and serves pages from it. Also
//! serves the plain list, name search and detail reads.

use super::family::{arrange, group_families};
use super::lineage::{catalog_number_or_sentinel, LineageInfo};
use super::page::{paginate, Page};
use super::starters::starters_for;
use crate::cache::{CacheValue, Coalescer, SharedCache};
use crate::config::CatalogConfig;
use crate::error::{Error, Result};
use crate::upstream::{decode, CatalogEntry, EntryList, LineageGraph, SpeciesInfo, UpstreamClient};
use futures::future::join_all;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Instant;

/// Bump when the ordering logic changes so stale sequences are never served.
pub const SEQUENCE_CACHE_VERSION: &str = "v4";

/// Cache key of the full ordered sequence for `generation`.
pub fn sequence_cache_key(generation: u8) -> String {
    format!("generation-sequence:{}:{}", generation, SEQUENCE_CACHE_VERSION)
}

/// Aggregates and pages the upstream catalog.
pub struct CatalogEngine {
    client: UpstreamClient,
    cache: Arc<SharedCache>,
    coalescer: Coalescer,
    config: CatalogConfig,
}

impl CatalogEngine {
    /// Create an engine sharing `cache` with `client`
    pub fn new(client: UpstreamClient, cache: Arc<SharedCache>, config: CatalogConfig) -> Self {
        Self {
            client,
            cache,
            coalescer: Coalescer::new(),
            config,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// One page of a generation's ordered catalog.
    ///
    /// The full sequence is built at most once per cache lifetime; every other
    /// call only re-slices it.
    pub async fn generation_page(
        &self,
        generation: u8,
        limit: usize,
        offset: usize,
    ) -> Result<Page<CatalogEntry>> {
        let sequence = self.generation_sequence(generation).await?;
        Ok(paginate(&sequence, limit, offset))
    }

    /// The full ordered sequence for `generation`, cached or freshly built.
    pub async fn generation_sequence(&self, generation: u8) -> Result<Arc<Vec<CatalogEntry>>> {
        starters_for(generation)?;
        let key = sequence_cache_key(generation);

        if let Some(sequence) = self.cached_sequence(&key).await {
            return Ok(sequence);
        }

        // Single flight: whoever waited here finds the sequence already built
        let _guard = self.coalescer.acquire(&key).await;
        if let Some(sequence) = self.cached_sequence(&key).await {
            return Ok(sequence);
        }

        self.build_generation(generation).await
    }

    async fn cached_sequence(&self, key: &str) -> Option<Arc<Vec<CatalogEntry>>> {
        match self.cache.get(key).await {
            Some(CacheValue::Sequence(sequence)) => {
                tracing::debug!(key, "Generation sequence cache hit");
                Some(sequence)
            }
            _ => None,
        }
    }

    /// Build, cache and return the ordered sequence for `generation`.
    ///
    /// Only a roster failure aborts the build; per-species and per-chain
    /// failures degrade that entry and the build carries on.
    pub async fn build_generation(&self, generation: u8) -> Result<Arc<Vec<CatalogEntry>>> {
        let starters = starters_for(generation)?;
        let started = Instant::now();

        let roster = self
            .client
            .generation_roster(generation)
            .await
            .map_err(|e| {
                tracing::error!(generation, "Failed to fetch generation roster: {}", e);
                e
            })?
            .pokemon_species;

        let infos: Vec<LineageInfo> =
            join_all(roster.iter().map(|entry| self.resolve_lineage(entry))).await;

        let urls: BTreeSet<&str> = infos
            .iter()
            .filter_map(|info| info.lineage_graph_url.as_deref())
            .collect();
        let roots: HashMap<String, String> =
            join_all(urls.into_iter().map(|url| self.resolve_root(url)))
                .await
                .into_iter()
                .flatten()
                .collect();

        let grouping = group_families(infos, &roots);
        let family_count = grouping.families.len();
        let ungrouped_count = grouping.ungrouped.len();
        let sequence = Arc::new(arrange(grouping, starters));

        self.cache
            .set_default(
                sequence_cache_key(generation),
                CacheValue::Sequence(sequence.clone()),
            )
            .await;

        tracing::info!(
            generation,
            species = sequence.len(),
            families = family_count,
            ungrouped = ungrouped_count,
            elapsed = ?started.elapsed(),
            "Built generation catalog"
        );

        Ok(sequence)
    }

    /// Species info for one roster entry; failures yield an unresolved entry.
    async fn resolve_lineage(&self, entry: &CatalogEntry) -> LineageInfo {
        let species = match self.client.species_info(&entry.name).await {
            Ok(body) => decode::<SpeciesInfo>(&body),
            Err(e) => Err(e),
        };

        match species {
            Ok(species) => LineageInfo {
                name: entry.name.clone(),
                url: entry.url.clone(),
                catalog_number: catalog_number_or_sentinel(&entry.url),
                evolves_from_name: species.evolves_from_species.map(|s| s.name),
                lineage_graph_url: species.evolution_chain.map(|c| c.url),
            },
            Err(e) => {
                tracing::warn!(species = %entry.name, "Species lookup failed, using sentinel: {}", e);
                LineageInfo::unresolved(entry)
            }
        }
    }

    /// Root species name of the chain at `url`, or `None` if it cannot be read.
    async fn resolve_root(&self, url: &str) -> Option<(String, String)> {
        let root = match self.client.lineage_graph(url).await {
            Ok(body) => decode::<LineageGraph>(&body).map(|g| g.root_name().to_string()),
            Err(e) => Err(e),
        };

        match root {
            Ok(root) => Some((url.to_string(), root)),
            Err(e) => {
                tracing::warn!(url, "Evolution chain lookup failed, leaving members ungrouped: {}", e);
                None
            }
        }
    }

    /// Plain upstream list, paged by the upstream itself.
    pub async fn list_page(&self, limit: usize, offset: usize) -> Result<Page<CatalogEntry>> {
        let body = self.client.list_entries(limit, offset).await?;
        let list: EntryList = decode(&body)?;

        Ok(Page {
            count: list.count,
            has_next: offset.saturating_add(limit) < list.count,
            has_previous: offset > 0,
            results: list.results,
        })
    }

    /// Case-insensitive substring search over entry names.
    pub async fn search(&self, query: &str, limit: usize, offset: usize) -> Result<Page<CatalogEntry>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Err(Error::Validation(
                "Search query is required and must be at least 1 character".to_string(),
            ));
        }

        let key = format!("pokemon-search:{}:{}:{}", query, limit, offset);
        if let Some(CacheValue::SearchPage(page)) = self.cache.get(&key).await {
            return Ok(page.as_ref().clone());
        }

        let body = self
            .client
            .list_entries(self.config.search_roster_size, 0)
            .await?;
        let list: EntryList = decode(&body)?;
        let matches: Vec<CatalogEntry> = list
            .results
            .into_iter()
            .filter(|entry| entry.name.to_lowercase().contains(&query))
            .collect();

        let page = paginate(&matches, limit, offset);
        self.cache
            .set_default(key, CacheValue::SearchPage(Arc::new(page.clone())))
            .await;
        Ok(page)
    }

    /// Entry detail with its evolution chain attached as `evolutionChain`.
    pub async fn entry_detail(&self, id: &str) -> Result<serde_json::Value> {
        let id = id.trim().to_lowercase();
        let not_found = |e: Error| {
            if e.is_upstream_not_found() {
                Error::NotFound("Pokemon not found".to_string())
            } else {
                e
            }
        };

        let detail = self.client.entry_detail(&id).await.map_err(not_found)?;
        let species_body = self.client.species_info(&id).await.map_err(not_found)?;
        let species: SpeciesInfo = decode(&species_body)?;

        let evolution_chain = match species.evolution_chain {
            Some(chain) => self.client.lineage_graph(&chain.url).await?.as_ref().clone(),
            None => serde_json::Value::Null,
        };

        let mut merged = detail.as_ref().clone();
        match merged.as_object_mut() {
            Some(object) => {
                object.insert("evolutionChain".to_string(), evolution_chain);
            }
            None => {
                return Err(Error::upstream(
                    None,
                    format!("Pokemon detail for '{}' is not a JSON object", id),
                ))
            }
        }
        Ok(merged)
    }
}
