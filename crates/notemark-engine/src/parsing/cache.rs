//! Fixed-capacity LRU of parse results, keyed by a hash of the input text and
//! the limits it was parsed under.
//!
//! Insertion order of the inner [`IndexMap`] doubles as recency order: the
//! front is the least recently used entry.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    sync::{Arc, Mutex, MutexGuard},
};

use indexmap::IndexMap;

use super::{
    diagnostics::Diagnostics,
    limits::{CACHE_CAPACITY, ParseLimits},
    types::MarkdownElement,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub elements: Arc<[MarkdownElement]>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug)]
pub struct ParseCache {
    capacity: usize,
    entries: Mutex<IndexMap<u64, CacheEntry>>,
}

impl ParseCache {
    /// A capacity of zero disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(IndexMap::with_capacity(capacity)),
        }
    }

    pub fn key_for(text: &str, limits: &ParseLimits) -> u64 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        limits.hash(&mut hasher);
        hasher.finish()
    }

    /// Returns a copy of the entry and marks it most recently used.
    pub fn lookup(&self, key: u64) -> Option<CacheEntry> {
        let mut entries = self.entries();
        let index = entries.get_index_of(&key)?;
        let last = entries.len() - 1;
        entries.move_index(index, last);
        entries.get_index(last).map(|(_, entry)| entry.clone())
    }

    pub fn store(&self, key: u64, entry: CacheEntry) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries();
        entries.shift_remove(&key);
        while entries.len() >= self.capacity {
            if let Some((evicted, _)) = entries.shift_remove_index(0) {
                log::debug!("parse cache evicted {evicted:016x}");
            }
        }
        entries.insert(key, entry);
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn entries(&self) -> MutexGuard<'_, IndexMap<u64, CacheEntry>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new(CACHE_CAPACITY)
    }
}
