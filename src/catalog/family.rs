//! Family grouping and ranking
//!
//! Pure functions over already-resolved lineage data. Ordering depends only on
//! roster position, catalog numbers and the starter list, never on the order
//! in which upstream fetches completed.

use super::lineage::{LineageInfo, SENTINEL_CATALOG_NUMBER};
use crate::upstream::CatalogEntry;
use std::collections::HashMap;

/// Species sharing one evolution chain, keyed by the chain's root species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    pub root: String,
    /// Members in roster order
    pub members: Vec<LineageInfo>,
}

impl Family {
    fn new(root: String) -> Self {
        Self {
            root,
            members: Vec::new(),
        }
    }

    /// Smallest catalog number among the members.
    pub fn min_catalog_number(&self) -> u32 {
        self.members
            .iter()
            .map(|m| m.catalog_number)
            .min()
            .unwrap_or(SENTINEL_CATALOG_NUMBER)
    }

    /// Root-named member first, everyone else in roster order.
    pub fn into_ordered_members(mut self) -> Vec<LineageInfo> {
        let root = self.root;
        // Stable: siblings keep roster order
        self.members.sort_by_key(|m| m.name != root);
        self.members
    }

    fn rank(&self, starters: &[&str]) -> FamilyRank {
        match starters.iter().position(|s| *s == self.root) {
            Some(order) => FamilyRank {
                tier: RankTier::Starter,
                starter_order: order,
                min_catalog_number: self.min_catalog_number(),
            },
            None => FamilyRank {
                tier: RankTier::Regular,
                starter_order: 0,
                min_catalog_number: self.min_catalog_number(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum RankTier {
    Starter,
    Regular,
}

/// Cross-family sort key. Field order is comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FamilyRank {
    tier: RankTier,
    starter_order: usize,
    min_catalog_number: u32,
}

/// Result of assigning every roster entry to a family or to the ungrouped
/// bucket.
#[derive(Debug, Default)]
pub struct Grouping {
    /// Families in first-seen roster order
    pub families: Vec<Family>,
    /// Entries without a resolved lineage, in roster order
    pub ungrouped: Vec<LineageInfo>,
}

/// Assign each entry to the family named by its chain's root.
///
/// `roots` maps a lineage URL to its root species name and only contains
/// chains that resolved; entries whose URL is missing from it, or who have no
/// URL at all, end up ungrouped.
pub fn group_families(infos: Vec<LineageInfo>, roots: &HashMap<String, String>) -> Grouping {
    let mut grouping = Grouping::default();
    let mut index_by_root: HashMap<String, usize> = HashMap::new();

    for info in infos {
        let root = info
            .lineage_graph_url
            .as_ref()
            .and_then(|url| roots.get(url));

        match root {
            Some(root) => {
                let idx = *index_by_root.entry(root.clone()).or_insert_with(|| {
                    grouping.families.push(Family::new(root.clone()));
                    grouping.families.len() - 1
                });
                grouping.families[idx].members.push(info);
            }
            None => grouping.ungrouped.push(info),
        }
    }

    grouping
}

/// Rank families, order members, and flatten into the final sequence.
///
/// Starter families come first in `starters` order; the rest ascend by their
/// smallest catalog number, ties keeping first-seen order. Ungrouped entries
/// are appended last.
pub fn arrange(grouping: Grouping, starters: &[&str]) -> Vec<CatalogEntry> {
    let Grouping {
        mut families,
        ungrouped,
    } = grouping;

    families.sort_by_cached_key(|family| family.rank(starters));

    families
        .into_iter()
        .flat_map(Family::into_ordered_members)
        .chain(ungrouped)
        .map(CatalogEntry::from)
        .collect()
}
