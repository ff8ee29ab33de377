//! In-memory staleness store.

use crate::cache::domain::CacheTag;
use crate::cache::ports::CacheStore;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

/// Thread-safe in-memory stale-tag set.
///
/// Counts fresh-to-stale transitions so tests can verify that repeated
/// invalidation sweeps are idempotent.
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    stale: RwLock<HashSet<CacheTag>>,
    transitions: AtomicUsize,
}

impl InMemoryCacheStore {
    /// Creates an empty store with every tag fresh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many fresh-to-stale transitions have occurred.
    #[must_use]
    pub fn transition_count(&self) -> usize {
        self.transitions.load(Ordering::Relaxed)
    }
}

impl CacheStore for InMemoryCacheStore {
    fn mark_stale(&self, tag: CacheTag) -> bool {
        let newly_stale = self
            .stale
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(tag);
        if newly_stale {
            self.transitions.fetch_add(1, Ordering::Relaxed);
        }
        newly_stale
    }

    fn is_stale(&self, tag: CacheTag) -> bool {
        self.stale
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&tag)
    }

    fn clear(&self, tag: CacheTag) {
        self.stale
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&tag);
    }

    fn stale_tags(&self) -> Vec<CacheTag> {
        self.stale
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }
}
