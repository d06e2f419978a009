//! Route resolution caching
//!
//! Matching is a linear scan over the route table. The cache remembers, per
//! path, which route matched and with which parameters, with LRU eviction. Any
//! change to the route table invalidates it.

use crate::params::RouteParams;
use crate::trace_log;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Cached outcome of scanning the route table for one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedMatch {
    /// Index of the matching route in scan order, `None` when nothing matched
    pub index: Option<usize>,
    pub params: RouteParams,
}

/// Cache performance statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub invalidations: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Path → match cache with LRU eviction
///
/// A capacity of zero disables caching entirely.
#[derive(Debug)]
pub struct ResolutionCache {
    entries: Option<LruCache<String, CachedMatch>>,
    stats: CacheStats,
}

impl ResolutionCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity).map(LruCache::new),
            stats: CacheStats::default(),
        }
    }

    pub fn get(&mut self, path: &str) -> Option<CachedMatch> {
        let entries = self.entries.as_mut()?;
        if let Some(entry) = entries.get(path) {
            self.stats.hits += 1;
            trace_log!("resolution cache hit for '{}'", path);
            Some(entry.clone())
        } else {
            self.stats.misses += 1;
            trace_log!("resolution cache miss for '{}'", path);
            None
        }
    }

    pub fn insert(&mut self, path: &str, entry: CachedMatch) {
        if let Some(entries) = self.entries.as_mut() {
            entries.push(path.to_string(), entry);
        }
    }

    /// Drop every entry; the route table changed
    pub fn clear(&mut self) {
        trace_log!("clearing resolution cache");
        if let Some(entries) = self.entries.as_mut() {
            entries.clear();
        }
        self.stats.invalidations += 1;
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
