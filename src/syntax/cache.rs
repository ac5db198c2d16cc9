//! Content-addressed cache of classification results
//!
//! Classification is deterministic, so identical text can reuse a prior
//! result. Owned by the dispatcher's router task; nothing else touches it.

use lru::LruCache;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use super::analysis::SyntaxAnalysis;

/// Content-based hash for caching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash(u64);

impl ContentHash {
    pub fn from_content(content: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

/// LRU of text hash to analysis; capacity 0 disables it
pub struct ClassificationCache {
    cache: Option<LruCache<ContentHash, SyntaxAnalysis>>,
    hits: u64,
    misses: u64,
}

impl ClassificationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: NonZeroUsize::new(capacity).map(LruCache::new),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached analysis for `key`, counting the hit or miss
    pub fn lookup(&mut self, key: ContentHash) -> Option<SyntaxAnalysis> {
        let cache = self.cache.as_mut()?;
        match cache.get(&key) {
            Some(hit) => {
                self.hits += 1;
                Some(hit.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Remember `analysis`; empty analyses are not worth a slot
    pub fn store(&mut self, key: ContentHash, analysis: &SyntaxAnalysis) {
        if analysis.is_empty() {
            return;
        }
        if let Some(cache) = self.cache.as_mut() {
            cache.put(key, analysis.clone());
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.cache.as_ref().map_or(0, LruCache::len),
            capacity: self.cache.as_ref().map_or(0, |c| c.cap().get()),
            hits: self.hits,
            misses: self.misses,
        }
    }
}
