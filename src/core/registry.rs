//! Route registry.
//!
//! Merges scanned pages with the router inventory into one identifier to path
//! table and resolves paths claimed by more than one page.
//!
//! ## Precedence
//!
//! A path declared in the page file itself is authoritative. The inventory
//! path is used only when the page declares none, or when the page was not
//! scanned at all. Empty paths never enter the registry.
//!
//! ## Conflicts
//!
//! Paths are compared as exact strings. When several identifiers claim one
//! path, a [`DuplicatePolicy`] picks the winner; every contested path is
//! recorded in a [`DuplicateReport`].

use std::{
    cmp::{Ordering, Reverse},
    collections::{BTreeMap, HashSet},
    fmt,
};

use anyhow::{Result, bail};
use serde::Serialize;

use super::{inventory::InventoryEntry, scanner::PageRecord};

/// One canonical `(identifier, path)` pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RouteEntry {
    pub identifier: String,
    pub path: String,
}

impl RouteEntry {
    pub fn new(identifier: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            path: path.into(),
        }
    }
}

/// Identifier to path mapping, sorted by path.
///
/// No two entries share a path or an identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteRegistry {
    entries: Vec<RouteEntry>,
}

impl RouteRegistry {
    /// Build a registry, rejecting duplicate paths, duplicate identifiers
    /// and empty fields.
    pub fn try_from_entries(mut entries: Vec<RouteEntry>) -> Result<Self> {
        let mut identifiers = HashSet::new();
        let mut paths = HashSet::new();
        for entry in &entries {
            if entry.identifier.is_empty() || entry.path.is_empty() {
                bail!("Registry entries need a non-empty identifier and path");
            }
            if !identifiers.insert(entry.identifier.as_str()) {
                bail!("Identifier \"{}\" is registered twice", entry.identifier);
            }
            if !paths.insert(entry.path.as_str()) {
                bail!("Path \"{}\" is registered twice", entry.path);
            }
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path_of(&self, identifier: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.identifier == identifier)
            .map(|e| e.path.as_str())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }
}

/// Where a merged path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteSource {
    Scanner,
    Inventory,
}

/// An identifier competing for a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claimant {
    pub identifier: String,
    /// Byte size of the page file; 0 when the page was not scanned.
    pub source_size: u64,
    pub source: RouteSource,
}

/// Why a claimant lost a contested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ExclusionReason {
    SmallerSource { size: u64, winner_size: u64 },
    /// Equal sizes; the identifier sorting first won.
    EqualSourceTieBreak { size: u64 },
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SmallerSource { size, winner_size } => {
                write!(f, "smaller source ({} < {} bytes)", size, winner_size)
            }
            Self::EqualSourceTieBreak { size } => {
                write!(f, "equal source size ({} bytes), lost tie-break", size)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedClaimant {
    pub claimant: Claimant,
    pub reason: ExclusionReason,
}

/// Resolution of one path claimed by several identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateReport {
    pub path: String,
    pub winner: Claimant,
    pub losers: Vec<ExcludedClaimant>,
}

/// A page whose own declaration disagrees with the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathMismatch {
    pub identifier: String,
    pub scanned_path: String,
    pub router_path: String,
}

/// Picks the canonical claimant for a contested path.
pub trait DuplicatePolicy {
    fn name(&self) -> &'static str;

    /// Index of the winner in `claimants`. Called with at least two
    /// claimants; must be deterministic.
    fn select_winner(&self, claimants: &[Claimant]) -> usize;

    fn exclusion_reason(&self, winner: &Claimant, loser: &Claimant) -> ExclusionReason;
}

/// The largest page file is taken as the canonical one. Equal sizes go to
/// the identifier that sorts first.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestSourceWins;

impl LargestSourceWins {
    fn rank(claimant: &Claimant) -> (u64, Reverse<&str>) {
        (claimant.source_size, Reverse(claimant.identifier.as_str()))
    }
}

impl DuplicatePolicy for LargestSourceWins {
    fn name(&self) -> &'static str {
        "largest-source-wins"
    }

    fn select_winner(&self, claimants: &[Claimant]) -> usize {
        claimants
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| Self::rank(a).cmp(&Self::rank(b)))
            .map(|(index, _)| index)
            .unwrap_or(0)
    }

    fn exclusion_reason(&self, winner: &Claimant, loser: &Claimant) -> ExclusionReason {
        match loser.source_size.cmp(&winner.source_size) {
            Ordering::Equal => ExclusionReason::EqualSourceTieBreak {
                size: loser.source_size,
            },
            _ => ExclusionReason::SmallerSource {
                size: loser.source_size,
                winner_size: winner.source_size,
            },
        }
    }
}

/// Output of [`RegistryBuilder::build`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegistryBuild {
    pub registry: RouteRegistry,
    pub duplicates: Vec<DuplicateReport>,
    pub mismatches: Vec<PathMismatch>,
    /// Merged entries taken from page files, before conflict resolution.
    pub from_scanner: usize,
    /// Merged entries taken from the router inventory, before conflict resolution.
    pub from_inventory: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder<P = LargestSourceWins> {
    policy: P,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

struct Candidate {
    path: String,
    source_size: u64,
    source: RouteSource,
}

impl<P: DuplicatePolicy> RegistryBuilder<P> {
    pub fn with_policy(policy: P) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn build(&self, pages: &[PageRecord], inventory: &[InventoryEntry]) -> RegistryBuild {
        let mut first_inventory_path: BTreeMap<&str, &str> = BTreeMap::new();
        for entry in inventory {
            first_inventory_path
                .entry(entry.identifier.as_str())
                .or_insert(entry.path.as_str());
        }

        let mut candidates: BTreeMap<String, Candidate> = BTreeMap::new();
        let mut mismatches = Vec::new();
        let mut scanned: HashSet<&str> = HashSet::new();

        for page in pages {
            scanned.insert(page.identifier.as_str());
            let router_path = first_inventory_path.get(page.identifier.as_str()).copied();

            let (path, source) = match (page.path(), router_path) {
                (Some(path), router) if !path.is_empty() => {
                    if let Some(router_path) = router.filter(|r| !r.is_empty() && *r != path) {
                        mismatches.push(PathMismatch {
                            identifier: page.identifier.clone(),
                            scanned_path: path.to_string(),
                            router_path: router_path.to_string(),
                        });
                    }
                    (path, RouteSource::Scanner)
                }
                (_, Some(router_path)) if !router_path.is_empty() => {
                    (router_path, RouteSource::Inventory)
                }
                _ => continue,
            };

            candidates.insert(
                page.identifier.clone(),
                Candidate {
                    path: path.to_string(),
                    source_size: page.source_size,
                    source,
                },
            );
        }

        for (identifier, path) in &first_inventory_path {
            if scanned.contains(identifier) || path.is_empty() {
                continue;
            }
            candidates.insert(
                identifier.to_string(),
                Candidate {
                    path: path.to_string(),
                    source_size: 0,
                    source: RouteSource::Inventory,
                },
            );
        }

        let from_scanner = candidates
            .values()
            .filter(|c| c.source == RouteSource::Scanner)
            .count();
        let from_inventory = candidates.len() - from_scanner;

        let mut claims: BTreeMap<String, Vec<Claimant>> = BTreeMap::new();
        for (identifier, candidate) in candidates {
            claims.entry(candidate.path).or_default().push(Claimant {
                identifier,
                source_size: candidate.source_size,
                source: candidate.source,
            });
        }

        let mut entries = Vec::with_capacity(claims.len());
        let mut duplicates = Vec::new();
        for (path, mut claimants) in claims {
            if claimants.len() == 1 {
                let claimant = claimants.remove(0);
                entries.push(RouteEntry::new(claimant.identifier, path));
                continue;
            }

            let winner = claimants.remove(self.policy.select_winner(&claimants));
            let losers = claimants
                .into_iter()
                .map(|loser| ExcludedClaimant {
                    reason: self.policy.exclusion_reason(&winner, &loser),
                    claimant: loser,
                })
                .collect();

            entries.push(RouteEntry::new(winner.identifier.clone(), path.clone()));
            duplicates.push(DuplicateReport {
                path,
                winner,
                losers,
            });
        }

        // Claims are keyed by path and each identifier claims one path, so
        // the entries are already sorted and unique.
        RegistryBuild {
            registry: RouteRegistry { entries },
            duplicates,
            mismatches,
            from_scanner,
            from_inventory,
        }
    }
}
