//! Recommendation catalog and selector
//!
//! The catalog maps a behavioural cluster id to a list of pre-authored
//! advice entries, with a `default` list for users without a cluster.
//! Selection is a uniform random draw among the alternatives of the
//! resolved key.

use crate::error::{AppError, AppResult};
use crate::models::CatalogEntry;
use lazy_static::lazy_static;
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub mod random;
pub mod rules;

pub use random::{RandomSource, SystemRandom};

pub const DEFAULT_KEY: &str = "default";

lazy_static! {
    static ref BUILTIN_CATALOG: Arc<RecommendationCatalog> = Arc::new(RecommendationCatalog {
        clusters: BTreeMap::from([
            (0, rules::disciplined()),
            (1, rules::socially_active()),
            (2, rules::high_performers()),
            (3, rules::at_risk()),
        ]),
        default: rules::unassigned(),
    });
}

/// Which list of the catalog a cluster resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKey {
    Cluster(i64),
    Default,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationCatalog {
    clusters: BTreeMap<i64, Vec<CatalogEntry>>,
    default: Vec<CatalogEntry>,
}

impl RecommendationCatalog {
    /// Builds a catalog, rejecting empty lists.
    pub fn new(clusters: BTreeMap<i64, Vec<CatalogEntry>>, default: Vec<CatalogEntry>) -> AppResult<Self> {
        let catalog = Self { clusters, default };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn builtin() -> Arc<RecommendationCatalog> {
        BUILTIN_CATALOG.clone()
    }

    /// Parses `{ "0": [...], "1": [...], "default": [...] }`.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let raw: HashMap<String, Vec<CatalogEntry>> = serde_json::from_str(json)?;

        let mut clusters = BTreeMap::new();
        let mut default = None;
        for (key, entries) in raw {
            if key == DEFAULT_KEY {
                default = Some(entries);
                continue;
            }
            let cluster: i64 = key
                .trim()
                .parse()
                .map_err(|_| AppError::config(format!("Catalog key '{}' is not a cluster id", key)))?;
            if clusters.insert(cluster, entries).is_some() {
                return Err(AppError::config(format!(
                    "Duplicate catalog key for cluster {} ('{}')",
                    cluster, key
                )));
            }
        }

        let default = default
            .ok_or_else(|| AppError::config("Catalog has no 'default' list"))?;
        Self::new(clusters, default)
    }

    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.default.is_empty() {
            return Err(AppError::config("Catalog 'default' list is empty"));
        }
        for (cluster, entries) in &self.clusters {
            if entries.is_empty() {
                return Err(AppError::config(format!("Catalog list for cluster {} is empty", cluster)));
            }
        }
        for entry in self.clusters.values().flatten().chain(self.default.iter()) {
            if let Some(action) = &entry.action {
                if !action.duration_hours.is_finite() || action.duration_hours <= 0.0 {
                    return Err(AppError::config(format!(
                        "Action '{}' has invalid duration {}",
                        action.title, action.duration_hours
                    )));
                }
            }
        }
        Ok(())
    }

    /// Fails when any of `clusters` has no list of its own.
    pub fn require_clusters(&self, clusters: impl IntoIterator<Item = i64>) -> AppResult<()> {
        for cluster in clusters {
            if !self.clusters.contains_key(&cluster) {
                return Err(AppError::config(format!("Catalog has no list for cluster {}", cluster)));
            }
        }
        Ok(())
    }

    pub fn resolve_key(&self, cluster: Option<i64>) -> CatalogKey {
        match cluster {
            Some(cluster) if self.clusters.contains_key(&cluster) => CatalogKey::Cluster(cluster),
            _ => CatalogKey::Default,
        }
    }

    pub fn entries(&self, key: CatalogKey) -> &[CatalogEntry] {
        match key {
            CatalogKey::Cluster(cluster) => self
                .clusters
                .get(&cluster)
                .map_or(self.default.as_slice(), Vec::as_slice),
            CatalogKey::Default => &self.default,
        }
    }

    pub fn cluster_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.clusters.keys().copied()
    }

    /// Picks one entry for `cluster`. Unknown or missing clusters use the
    /// default list.
    pub fn select(&self, cluster: Option<i64>, random: &mut dyn RandomSource) -> &CatalogEntry {
        let key = self.resolve_key(cluster);
        let entries = self.entries(key);
        debug_assert!(!entries.is_empty(), "catalog list for {:?} is empty", key);

        let index = random.pick(entries.len()) % entries.len();
        debug!("Selected catalog entry {} of {} for {:?}", index, entries.len(), key);
        &entries[index]
    }
}

/// Picks a catalog entry for a cluster.
#[cfg_attr(test, mockall::automock)]
pub trait Selector: Send + Sync {
    fn select(&self, cluster: Option<i64>) -> CatalogEntry;
}

/// `Selector` over a catalog with an injected random source.
pub struct CatalogSelector {
    catalog: Arc<RecommendationCatalog>,
    random: Mutex<Box<dyn RandomSource>>,
}

impl CatalogSelector {
    pub fn new(catalog: Arc<RecommendationCatalog>, random: Box<dyn RandomSource>) -> Self {
        Self {
            catalog,
            random: Mutex::new(random),
        }
    }

    pub fn builtin() -> Self {
        Self::new(RecommendationCatalog::builtin(), Box::new(SystemRandom::new()))
    }

    pub fn catalog(&self) -> &RecommendationCatalog {
        &self.catalog
    }
}

impl Selector for CatalogSelector {
    fn select(&self, cluster: Option<i64>) -> CatalogEntry {
        let mut random = self.random.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.catalog.select(cluster, &mut **random).clone()
    }
}

/// Picks a random entry from the built-in catalog.
pub fn select_recommendation(cluster: Option<i64>) -> CatalogEntry {
    BUILTIN_CATALOG.select(cluster, &mut SystemRandom::new()).clone()
}
