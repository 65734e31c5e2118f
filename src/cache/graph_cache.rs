use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::graph::Graph;

/// Thread-safe LRU cache of parsed scene graphs
///
/// Keyed by the exact sentence text. Repeated sentences skip both the
/// annotation round-trip and graph construction.
pub struct GraphCache {
    cache: Mutex<LruCache<String, Graph>>,
}

impl GraphCache {
    /// Create a new graph cache holding at most `capacity` graphs
    ///
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: Mutex::new(LruCache::new(cap)),
        }
    }

    /// Get the cached graph for a sentence, marking it most recently used
    pub fn get(&self, sentence: &str) -> Option<Graph> {
        self.lock().get(sentence).cloned()
    }

    /// Store the graph of a sentence
    pub fn put(&self, sentence: String, graph: Graph) {
        self.lock().put(sentence, graph);
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clear all entries from the cache
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Graph>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
