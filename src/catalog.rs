//! Venue catalog access
//!
//! The catalog is the engine's only data source: a fully materialized,
//! bounded collection of venues loaded from a JSON file, with an embedded
//! demo dataset as the fallback. The engine never mutates it.
//!
//! Searches read an `Arc` snapshot, so a concurrent [`VenueCatalog::reload`]
//! swaps the collection atomically and in-flight searches finish against the
//! snapshot they started with.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};

use crate::models::Venue;

/// Embedded demo catalog, used when no data file is available.
const DEMO_CATALOG: &str = include_str!("../data/demo_venues.json");

/// Read-only venue collection with snapshot semantics
pub struct VenueCatalog {
    venues: RwLock<Arc<Vec<Venue>>>,
    path: Option<PathBuf>,
}

impl VenueCatalog {
    /// Catalog backed by the embedded demo dataset.
    pub fn demo() -> Self {
        Self::from_venues(demo_venues())
    }

    /// Catalog over an explicit collection (fixtures, tests, upstream data).
    pub fn from_venues(venues: Vec<Venue>) -> Self {
        Self { venues: RwLock::new(Arc::new(venues)), path: None }
    }

    /// Load from a JSON file, falling back to the demo dataset when the file
    /// is missing, unreadable, or empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match read_venues(&path) {
            Ok(venues) if !venues.is_empty() => {
                log::info!("loaded {} venues from {}", venues.len(), path.display());
                Self { venues: RwLock::new(Arc::new(venues)), path: Some(path) }
            }
            Ok(_) => {
                log::warn!("{} contains no venues, using demo catalog", path.display());
                Self { venues: RwLock::new(Arc::new(demo_venues())), path: Some(path) }
            }
            Err(e) => {
                log::warn!("failed to load {} ({e:#}), using demo catalog", path.display());
                Self { venues: RwLock::new(Arc::new(demo_venues())), path: Some(path) }
            }
        }
    }

    /// A consistent snapshot of the collection. Cheap to take; searches hold
    /// it for their whole run.
    pub fn snapshot(&self) -> Arc<Vec<Venue>> {
        Arc::clone(&self.venues.read().expect("catalog lock poisoned"))
    }

    /// Re-read the backing file and swap the snapshot atomically. Returns the
    /// new venue count.
    pub fn reload(&self) -> Result<usize> {
        let path = self.path.as_ref().context("catalog has no backing file to reload")?;
        let venues = read_venues(path)?;
        let count = venues.len();

        *self.venues.write().expect("catalog lock poisoned") = Arc::new(venues);
        log::info!("reloaded {} venues from {}", count, path.display());
        Ok(count)
    }

    /// Look up a single venue by its opaque id.
    pub fn venue_by_id(&self, id: &str) -> Option<Venue> {
        self.snapshot().iter().find(|v| v.id == id).cloned()
    }

    /// Distinct city names in the catalog, sorted.
    pub fn cities(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|v| v.location.city.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

fn read_venues(path: &Path) -> Result<Vec<Venue>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog file {}", path.display()))
}

fn demo_venues() -> Vec<Venue> {
    serde_json::from_str(DEMO_CATALOG).expect("embedded demo catalog is valid JSON")
}
