//! Content-keyed result caching
//!
//! Lap tables and stint analyses are recomputed only when their inputs
//! change. Entries live as long as the owning cache and never expire; a
//! changed input produces a different key and therefore a fresh entry.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::trace;

use crate::types::{LapTable, PitThreshold};

/// Cache entry with the time it was computed
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// Cached value
    pub value: Arc<V>,
    /// When the value was computed
    pub computed_at: SystemTime,
}

impl<V> CacheEntry<V> {
    /// Create new cache entry
    pub fn new(value: V) -> Self {
        Self { value: Arc::new(value), computed_at: SystemTime::now() }
    }
}

/// Hit and miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Mapping from a content-derived key to a previously computed value
#[derive(Debug, Clone)]
pub struct ContentCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    stats: CacheStats,
}

impl<K, V> Default for ContentCache<K, V> {
    fn default() -> Self {
        Self { entries: HashMap::new(), stats: CacheStats::default() }
    }
}

impl<K: Eq + Hash, V> ContentCache<K, V> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, computing and storing it on a miss
    pub fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce() -> V) -> Arc<V> {
        if let Some(entry) = self.entries.get(&key) {
            self.stats.hits += 1;
            trace!("Content cache hit");
            return Arc::clone(&entry.value);
        }

        self.stats.misses += 1;
        trace!("Content cache miss");
        let entry = CacheEntry::new(compute());
        let value = Arc::clone(&entry.value);
        self.entries.insert(key, entry);
        value
    }

    /// Cached value without computing anything
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries.get(key).map(|entry| Arc::clone(&entry.value))
    }

    /// Full entry including its computation time
    pub fn entry(&self, key: &K) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    /// Store a value, replacing any previous entry for the key
    pub fn insert(&mut self, key: K, value: V) -> Arc<V> {
        let entry = CacheEntry::new(value);
        let value = Arc::clone(&entry.value);
        self.entries.insert(key, entry);
        value
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Key identifying one segmentation run by the content of its inputs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentationKey {
    table_fingerprint: u64,
    table_len: usize,
    threshold_bits: u64,
    excluded: BTreeSet<u32>,
}

impl SegmentationKey {
    pub fn new(table: &LapTable, threshold: PitThreshold, excluded: &BTreeSet<u32>) -> Self {
        Self {
            table_fingerprint: table.fingerprint(),
            table_len: table.len(),
            threshold_bits: threshold.key_bits(),
            excluded: excluded.clone(),
        }
    }
}
