//! Lookup result cache.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::Serialize;

use crate::config::CacheConfig;
use crate::observability::metrics;
use crate::routing::types::Target;

/// Hit/miss counters and current size of a [`LookupCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// A thread-safe memo table from exact address to resolved lookup result.
///
/// `None` results (no route) are cached too.
#[derive(Debug)]
pub struct LookupCache {
    inner: DashMap<u32, Option<Target>>,
    enabled: bool,
    max_entries: Option<usize>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupCache {
    /// Create an empty, unbounded cache.
    pub fn new() -> Self {
        Self::from_config(&CacheConfig::default())
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            inner: DashMap::new(),
            enabled: config.enabled,
            max_entries: config.max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached result for `address`, or compute, store and return it.
    ///
    /// Two threads missing on the same address may both compute; the result is
    /// the same either way.
    pub fn get_or_compute<F>(&self, address: u32, compute: F) -> Option<Target>
    where
        F: FnOnce() -> Option<Target>,
    {
        if !self.enabled {
            return compute();
        }

        if let Some(hit) = self.inner.get(&address) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            metrics::record_lookup(true);
            return *hit;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        metrics::record_lookup(false);

        let result = compute();
        let full = self
            .max_entries
            .is_some_and(|max| self.inner.len() >= max);
        if !full {
            self.inner.insert(address, result);
            metrics::record_cache_size(self.inner.len());
        }
        result
    }

    /// Cached result for `address` without computing anything.
    pub fn get(&self, address: u32) -> Option<Option<Target>> {
        self.inner.get(&address).map(|r| *r.value())
    }

    /// Drop every entry. Required whenever the route set changes.
    pub fn clear(&self) {
        if self.inner.is_empty() {
            return;
        }
        tracing::debug!(entries = self.inner.len(), "Clearing lookup cache");
        self.inner.clear();
        metrics::record_cache_clear();
        metrics::record_cache_size(0);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.inner.len(),
        }
    }
}
